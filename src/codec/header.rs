//! Registration source generator.
//!
//! Emits a C++ header whose single function registers every retained
//! reaction into a caller-owned registry. Each registration is guarded by the
//! species feature flags it needs, so a build that does not define a species
//! compiles the reactions involving it out:
//!
//! ```text
//! #if defined(SERIF_SPECIES_H_1) && defined(SERIF_SPECIES_C_12) && defined(SERIF_SPECIES_N_13)
//!     registry.try_emplace("H_1_C_12_to_N_13_LS09", REACLIBReaction(...));
//! #endif
//! ```

use crate::engine::canonical_name;
use crate::{Reaction, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Lowercase hex sha256 of `content`.
pub fn content_hash(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Provenance lines written at the top of the generated header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBanner {
    /// Path (or other label) of the REACLIB input.
    pub source: String,
    pub content_hash: String,
    pub generated_at: DateTime<Utc>,
    pub culling: f64,
    pub reference_t9: f64,
}

impl HeaderBanner {
    /// Banner for `content` read from `source`, stamped with the current time.
    pub fn new(source: impl Into<String>, content: &[u8], culling: f64, reference_t9: f64) -> Self {
        HeaderBanner {
            source: source.into(),
            content_hash: content_hash(content),
            generated_at: Utc::now(),
            culling,
            reference_t9,
        }
    }
}

/// Insert-if-absent registry of reactions keyed by registration label.
///
/// Owned by the caller; rendering into the same registry twice emits each
/// reaction once.
#[derive(Debug, Clone, Default)]
pub struct ReactionRegistry {
    index: HashMap<String, usize>,
    entries: Vec<(String, Reaction)>,
}

impl ReactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `reaction` under `label`. Returns `false` (and keeps the
    /// existing entry) when the label is already taken.
    pub fn try_insert(&mut self, label: impl Into<String>, reaction: &Reaction) -> bool {
        let label = label.into();
        if self.index.contains_key(&label) {
            return false;
        }
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push((label, reaction.clone()));
        true
    }

    pub fn get(&self, label: &str) -> Option<&Reaction> {
        self.index.get(label).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }
}

/// Compile-time feature flag for a canonical species name.
///
/// Built from the source identifier, so `He-4` → `SERIF_SPECIES_HE_4`. A `+`
/// or `*` left after that is spelled out (`_add_`, `_mult_`).
pub fn feature_flag(canonical: &str) -> String {
    let name = identifier(canonical).to_uppercase().replace('+', "_add_").replace('*', "_mult_");
    format!("SERIF_SPECIES_{name}")
}

/// Source identifier for a canonical name: `He-4` → `He_4`.
fn identifier(canonical: &str) -> String {
    canonical.replace('-', "_")
}

fn canonical_all(tokens: &[String]) -> Result<Vec<String>> {
    tokens.iter().map(|t| canonical_name(t)).collect()
}

/// `H_1_C_12_to_N_13_LS09N`.
pub fn registration_label(reaction: &Reaction) -> Result<String> {
    let join = |tokens: &[String]| -> Result<String> {
        Ok(canonical_all(tokens)?.iter().map(|n| identifier(n)).collect::<Vec<_>>().join("_"))
    };
    Ok(format!("{}_to_{}_{}", join(&reaction.reactants)?, join(&reaction.products)?, reaction.label.to_uppercase()))
}

/// One `registry.try_emplace(...)` statement for `reaction`.
pub fn registration_statement(reaction: &Reaction) -> Result<String> {
    let label = registration_label(reaction)?;
    let species = |tokens: &[String]| -> Result<String> {
        Ok(canonical_all(tokens)?
            .iter()
            .map(|n| format!("fourdst::atomic::{}", identifier(n)))
            .collect::<Vec<_>>()
            .join(", "))
    };
    let coeffs = reaction.coeffs.iter().map(|c| format!("{c:?}")).collect::<Vec<_>>().join(", ");

    Ok(format!(
        "registry.try_emplace(\"{label}\", \
         REACLIBReaction(\"{label}\", \"{}\", {}, {{{}}}, {{{}}}, {}, \"{}\", {{{coeffs}}}, {}));",
        reaction.rp_name,
        reaction.chapter,
        species(&reaction.reactants)?,
        species(&reaction.products)?,
        scientific(reaction.q_value, 6),
        reaction.label,
        reaction.reverse,
    ))
}

/// `#if` condition for `reaction`: one `defined(...)` per distinct species,
/// reactants first, in first-occurrence order.
fn guard(reaction: &Reaction) -> Result<String> {
    let mut flags: Vec<String> = Vec::new();
    for name in canonical_all(&reaction.reactants)?.into_iter().chain(canonical_all(&reaction.products)?) {
        let flag = feature_flag(&name);
        if !flags.contains(&flag) {
            flags.push(flag);
        }
    }
    Ok(flags.iter().map(|f| format!("defined({f})")).collect::<Vec<_>>().join(" && "))
}

/// `1.943000e+00`: fixed mantissa precision and a signed two-digit exponent.
fn scientific(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => format!("{mantissa}e{}{:02}", if exp < 0 { '-' } else { '+' }, exp.abs()),
            Err(_) => formatted,
        },
        None => formatted,
    }
}

/// Render the full header for `reactions`.
///
/// Reactions whose registration label is already in `registry` are left out.
/// The banner's count is the number of registrations actually emitted. Every
/// reaction is rendered before the first registration, so an error leaves
/// `registry` untouched.
pub fn render_header(
    banner: &HeaderBanner,
    reactions: &[Reaction],
    registry: &mut ReactionRegistry,
) -> Result<String> {
    let mut blocks = Vec::with_capacity(reactions.len());
    for reaction in reactions {
        blocks.push((registration_label(reaction)?, guard(reaction)?, registration_statement(reaction)?));
    }

    let mut body = String::new();
    let mut emitted = 0usize;
    for ((label, condition, statement), reaction) in blocks.into_iter().zip(reactions) {
        if !registry.try_insert(label.as_str(), reaction) {
            tracing::debug!(label = %label, reaction = %reaction, "registration label already present, skipping");
            continue;
        }
        let _ = writeln!(body, "        #if {condition}");
        let _ = writeln!(body, "            {statement}");
        let _ = writeln!(body, "        #endif // {condition}");
        emitted += 1;
    }

    let mut out = String::new();
    let _ = writeln!(out, "// This file is automatically generated. Do not edit!");
    let _ = writeln!(out, "// Generated on: {}", banner.generated_at.format("%Y-%m-%dT%H:%M:%S"));
    let _ = writeln!(out, "// REACLIB file hash (sha256): {}", banner.content_hash);
    let _ = writeln!(out, "// Generated from REACLIB data file: {}", banner.source);
    let _ = writeln!(out, "// Culling threshold: rate >{:?} at T9 = {:?}", banner.culling, banner.reference_t9);
    let _ = writeln!(out, "// Note that if the culling threshold is set to 0.0, no reactions are culled.");
    let _ = writeln!(out, "// Includes {emitted} reactions.");
    let _ = writeln!(
        out,
        "// Note: Only reactions with species defined in the atomicSpecies.h header will be included at compile time."
    );
    let _ = writeln!(out, "#pragma once");
    let _ = writeln!(out, "#include \"fourdst/composition/atomicSpecies.h\"");
    let _ = writeln!(out, "#include \"fourdst/composition/species.h\"");
    let _ = writeln!(out, "#include \"reaclib.h\"");
    let _ = writeln!(out);
    let _ = writeln!(out, "namespace gridfire::reaclib {{");
    let _ = writeln!(out);
    let _ = writeln!(out, "    inline void registerReaclibReactions(ReaclibReactionRegistry& registry) {{");
    let _ = writeln!(out, "        registry.reserve({emitted});");
    out.push_str(&body);
    let _ = writeln!(out, "    }}");
    let _ = writeln!(out, "}} // namespace gridfire::reaclib");

    tracing::info!(emitted, registry = registry.len(), "rendered registration header");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chapter, Error, ParsedRecord, SpeciesCatalog, build_reaction};
    use chrono::TimeZone;

    fn reaction(group: &str, chapter: u8, label: &str, q: f64) -> Reaction {
        let record = ParsedRecord {
            line: 1,
            chapter: Chapter::new(chapter).unwrap(),
            species_group: group.to_string(),
            label: label.to_string(),
            q_value: q,
            coeffs: [17.1482, 0.0, -13.692, -0.230881, 4.44362, -3.15898, -0.666667],
            reverse: false,
        };
        build_reaction(&record, &SpeciesCatalog::builtin()).unwrap()
    }

    fn banner() -> HeaderBanner {
        HeaderBanner {
            source: "reaclib.dat".to_string(),
            content_hash: content_hash(b"abc"),
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            culling: 0.0,
            reference_t9: 0.01,
        }
    }

    #[test]
    fn sha256_of_known_input() {
        assert_eq!(content_hash(b"abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }

    #[test]
    fn flags_escape_punctuation() {
        assert_eq!(feature_flag("He-4"), "SERIF_SPECIES_HE_4");
        assert_eq!(feature_flag("H-1"), "SERIF_SPECIES_H_1");
        assert_eq!(feature_flag("n-1"), "SERIF_SPECIES_N_1");
        assert_eq!(feature_flag("Al+26"), "SERIF_SPECIES_AL_add_26");
        assert_eq!(feature_flag("Al*26"), "SERIF_SPECIES_AL_mult_26");
    }

    #[test]
    fn statement_shape() {
        let r = reaction("p c12 n13", 4, "ls09", 1.943);
        assert_eq!(registration_label(&r).unwrap(), "H_1_C_12_to_N_13_LS09");
        assert_eq!(
            registration_statement(&r).unwrap(),
            "registry.try_emplace(\"H_1_C_12_to_N_13_LS09\", REACLIBReaction(\"H_1_C_12_to_N_13_LS09\", \
             \"c12(p,g)n13\", 4, {fourdst::atomic::H_1, fourdst::atomic::C_12}, {fourdst::atomic::N_13}, \
             1.943000e+00, \"ls09\", {17.1482, 0.0, -13.692, -0.230881, 4.44362, -3.15898, -0.666667}, false));"
        );
    }

    #[test]
    fn guard_deduplicates_species() {
        let r = reaction("he3 he3 he4 p p", 6, "nacr", 12.86);
        assert_eq!(
            guard(&r).unwrap(),
            "defined(SERIF_SPECIES_HE_3) && defined(SERIF_SPECIES_HE_4) && defined(SERIF_SPECIES_H_1)"
        );
    }

    #[test]
    fn scientific_matches_printf() {
        assert_eq!(scientific(1.943, 6), "1.943000e+00");
        assert_eq!(scientific(-0.00042, 6), "-4.200000e-04");
        assert_eq!(scientific(12.86, 6), "1.286000e+01");
    }

    #[test]
    fn header_counts_only_registered_reactions() {
        let reactions = vec![
            reaction("p c12 n13", 4, "ls09", 1.943),
            reaction("p c12 n13", 4, "ls09", 1.943),
            reaction("he3 he3 he4 p p", 6, "nacr", 12.86),
        ];
        let mut registry = ReactionRegistry::new();
        let text = render_header(&banner(), &reactions, &mut registry).unwrap();

        assert!(text.starts_with("// This file is automatically generated. Do not edit!\n"));
        assert!(text.contains("// Generated on: 2024-05-01T12:00:00\n"));
        assert!(text.contains("// Culling threshold: rate >0.0 at T9 = 0.01\n"));
        assert!(text.contains("// Includes 2 reactions.\n"));
        assert_eq!(text.matches("#if defined(").count(), 2);
        assert_eq!(text.matches("#endif").count(), 2);
        assert_eq!(
            registry.labels().collect::<Vec<_>>(),
            vec!["H_1_C_12_to_N_13_LS09", "He_3_He_3_to_He_4_H_1_H_1_NACR"]
        );
        assert_eq!(registry.get("H_1_C_12_to_N_13_LS09").map(|r| r.rp_name.as_str()), Some("c12(p,g)n13"));
        assert!(registry.get("H_1_C_12_to_N_13_XXXX").is_none());

        // Same registry, second pass: nothing new to register.
        let again = render_header(&banner(), &reactions, &mut registry).unwrap();
        assert!(again.contains("// Includes 0 reactions.\n"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unresolvable_species_fails_before_registering_anything() {
        let mut broken = reaction("p c12 n13", 4, "ls09", 1.943);
        broken.reactants = vec!["??".to_string()];
        let reactions = vec![reaction("he3 he3 he4 p p", 6, "nacr", 12.86), broken];

        let mut registry = ReactionRegistry::new();
        let err = render_header(&banner(), &reactions, &mut registry).unwrap_err();
        assert!(matches!(err, Error::SpeciesResolution { ref token, .. } if token == "??"));
        assert!(registry.is_empty());
    }
}
