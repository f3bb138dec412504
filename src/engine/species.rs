//! Species resolution.
//!
//! REACLIB writes nuclides as lower-case `elementA` tokens (`c12`, `he4`) with
//! single-letter shorthands for the light particles. The rest of the crate
//! works with canonical `Element-A` names (`C-12`, `He-4`, `n-1`), which is the
//! key of the external species table.
//!
//! ```text
//! "p"   ── LightNucleus::Proton ──▶ "H-1"
//! "c12" ── element + mass split ──▶ "C-12" ──▶ SpeciesTable::lookup
//! ```

use crate::species_data::BUILTIN_NUCLIDES;
use crate::{Chapter, Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// A nuclide as known to the species table.
#[derive(Debug, Clone, PartialEq)]
pub struct Species {
    /// Canonical name, e.g. `He-4`.
    pub name: String,
    pub z: u32,
    pub a: u32,
    /// Atomic mass in u.
    pub atomic_mass: f64,
}

impl Species {
    pub fn new(name: impl Into<String>, z: u32, a: u32, atomic_mass: f64) -> Self {
        Species { name: name.into(), z, a, atomic_mass }
    }
}

/// Read-only lookup of species by canonical name.
pub trait SpeciesTable {
    fn lookup(&self, canonical: &str) -> Option<&Species>;
}

/// In-memory species table.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    entries: HashMap<String, Species>,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog seeded with the light and intermediate nuclides shipped with the crate.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for &(name, z, a, mass) in BUILTIN_NUCLIDES {
            catalog.insert(Species::new(name, z, a, mass));
        }
        catalog
    }

    /// Insert or replace a species, keyed by its canonical name.
    pub fn insert(&mut self, species: Species) {
        self.entries.insert(species.name.clone(), species);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse a whitespace-separated `name Z A mass` table.
    ///
    /// Blank lines and `#` comments are ignored. Later lines override earlier
    /// ones with the same name.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut catalog = Self::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            catalog.insert(parse_table_line(line, idx + 1)?);
        }
        Ok(catalog)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Builtin catalog overlaid with the entries of `text`.
    pub fn builtin_with(text: &str) -> Result<Self> {
        let mut catalog = Self::builtin();
        catalog.entries.extend(Self::from_text(text)?.entries);
        Ok(catalog)
    }
}

impl SpeciesTable for SpeciesCatalog {
    fn lookup(&self, canonical: &str) -> Option<&Species> {
        self.entries.get(canonical)
    }
}

fn parse_table_line(line: &str, line_no: usize) -> Result<Species> {
    let malformed = |details: &str| Error::SpeciesTable { line: line_no, details: details.to_string() };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let [name, z, a, mass] = fields.as_slice() else {
        return Err(malformed("expected `name Z A mass`"));
    };
    let z = z.parse::<u32>().map_err(|_| malformed("Z is not an unsigned integer"))?;
    let a = a.parse::<u32>().map_err(|_| malformed("A is not an unsigned integer"))?;
    let mass = mass.parse::<f64>().map_err(|_| malformed("mass is not a number"))?;
    Ok(Species::new(*name, z, a, mass))
}

// --- Light-particle shorthands ----------------------------------------------

/// The particles REACLIB abbreviates to a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightNucleus {
    Proton,
    Deuteron,
    Triton,
    Neutron,
    Alpha,
}

impl LightNucleus {
    pub const ALL: [LightNucleus; 5] = [
        LightNucleus::Proton,
        LightNucleus::Deuteron,
        LightNucleus::Triton,
        LightNucleus::Neutron,
        LightNucleus::Alpha,
    ];

    /// REACLIB shorthand token.
    pub fn token(self) -> &'static str {
        match self {
            LightNucleus::Proton => "p",
            LightNucleus::Deuteron => "d",
            LightNucleus::Triton => "t",
            LightNucleus::Neutron => "n",
            LightNucleus::Alpha => "a",
        }
    }

    /// Canonical species-table name.
    pub fn canonical(self) -> &'static str {
        match self {
            LightNucleus::Proton => "H-1",
            LightNucleus::Deuteron => "H-2",
            LightNucleus::Triton => "H-3",
            LightNucleus::Neutron => "n-1",
            LightNucleus::Alpha => "He-4",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.token() == token)
    }

    pub fn from_canonical(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.canonical() == name)
    }
}

// --- Name normalization -----------------------------------------------------

/// Map a REACLIB token to its canonical `Element-A` name.
///
/// `p d t n a` map through [`LightNucleus`]; anything else must be an
/// alphabetic element followed by an optional `-`, `+` or `*` and the mass
/// number.
pub fn canonical_name(token: &str) -> Result<String> {
    if let Some(light) = LightNucleus::from_token(token) {
        return Ok(light.canonical().to_string());
    }

    let re = regex!(r"^([A-Za-z]+)[-+*]?(\d+)$");
    let caps = re.captures(token).ok_or_else(|| Error::species(token, token))?;
    Ok(format!("{}-{}", capitalize(&caps[1]), &caps[2]))
}

fn capitalize(element: &str) -> String {
    let lower = element.to_ascii_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Lower-case REACLIB-style token for a nucleus (`He-3` → `he3`), with the
/// hydrogen isotopes and the neutron folded to `p d t n`.
pub(crate) fn nuclide_token(canonical: &str) -> String {
    match LightNucleus::from_canonical(canonical) {
        Some(LightNucleus::Alpha) | None => canonical.replace('-', "").to_ascii_lowercase(),
        Some(light) => light.token().to_string(),
    }
}

/// Like [`nuclide_token`] but `He-4` becomes `a`; used for projectiles and ejectiles.
pub(crate) fn particle_token(canonical: &str) -> String {
    match LightNucleus::from_canonical(canonical) {
        Some(light) => light.token().to_string(),
        None => nuclide_token(canonical),
    }
}

// --- Resolution -------------------------------------------------------------

/// Split a species group into reactants and products by chapter.
///
/// Tokens beyond `nReactants + nProducts` are ignored.
pub fn split_group(group: &str, chapter: Chapter) -> Result<(Vec<String>, Vec<String>)> {
    let tokens: Vec<&str> = group.split_whitespace().collect();
    let (n_reactants, n_products) = chapter.cardinality();
    let expected = n_reactants + n_products;

    if tokens.len() < expected {
        return Err(Error::SpeciesCount { chapter, expected, found: tokens.len() });
    }

    let reactants = tokens[..n_reactants].iter().map(|s| s.to_string()).collect();
    let products = tokens[n_reactants..expected].iter().map(|s| s.to_string()).collect();
    Ok((reactants, products))
}

/// Resolve REACLIB tokens against `table`, preserving order.
pub fn resolve_species(tokens: &[String], table: &dyn SpeciesTable) -> Result<Vec<Species>> {
    tokens
        .iter()
        .map(|token| {
            let canonical = canonical_name(token)?;
            table.lookup(&canonical).cloned().ok_or_else(|| Error::species(token.as_str(), canonical))
        })
        .collect()
}
