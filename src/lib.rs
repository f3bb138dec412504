extern crate self as reaclib_forge;

#[macro_use]
mod macros;
mod api;
mod codec;
mod engine;
mod error;
mod species_data;

pub use api::{Context, IngestResult, Options, ingest, ingest_with};
pub use codec::{
    HeaderBanner, PARTITION_RECORD_SIZE, PartitionRecord, REACTION_RECORD_SIZE, RT_TEMPERATURE_GRID_T9,
    ReactionRecord, ReactionRegistry, content_hash, energy_report, feature_flag, parse_partition_table,
    read_partition_records, read_reactions, registration_label, registration_statement, render_header, table_id,
    write_partition_records, write_reactions, write_table,
};
pub use engine::{
    Classification, ImportanceGrid, IngestStats, LightNucleus, RawEntry, Species, SpeciesCatalog, SpeciesTable,
    build_reaction, canonical_name, classify, evaluate_rate, parse_entry, peak_importance, peak_importance_on,
    resolve_species, split_entries, split_group,
};
pub use error::{Error, Result};

// --- Core value types --------------------------------------------------------

/// The seven REACLIB fit parameters `a0..a6`.
pub type RateCoefficients = [f64; 7];

/// REACLIB chapter (1–11): fixes how many of the listed species are reactants
/// and how many are products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Chapter(u8);

const CHAPTER_CARDINALITY: [(usize, usize); 11] =
    [(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3), (2, 4), (3, 1), (3, 2), (4, 2), (1, 4)];

impl Chapter {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 11;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Chapter(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// `(nReactants, nProducts)` for this chapter.
    pub fn cardinality(self) -> (usize, usize) {
        CHAPTER_CARDINALITY[usize::from(self.0 - Self::MIN)]
    }
}

impl std::fmt::Display for Chapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A tokenized REACLIB entry, before any species lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    /// 1-based line number of the chapter header in the source file.
    pub line: usize,
    pub chapter: Chapter,
    /// Whitespace-separated species tokens exactly as they appear in the file.
    pub species_group: String,
    pub label: String,
    /// Q-value in MeV.
    pub q_value: f64,
    pub coeffs: RateCoefficients,
    /// Set when column 48 of the species line holds `v`.
    pub reverse: bool,
}

bitflags::bitflags! {
    /// Implicit participants inferred by the classifier.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ProcessFlags: u8 {
        const ELECTRON_CAPTURE    = 1 << 0;
        const BETA_MINUS          = 1 << 1;
        const BETA_PLUS           = 1 << 2;
        const RADIATIVE_CAPTURE   = 1 << 3;
        const PHOTODISINTEGRATION = 1 << 4;

        const WEAK = Self::ELECTRON_CAPTURE.bits() | Self::BETA_MINUS.bits() | Self::BETA_PLUS.bits();
        const PHOTON = Self::RADIATIVE_CAPTURE.bits() | Self::PHOTODISINTEGRATION.bits();
    }
}

/// A classified reaction. Built once from a [`ParsedRecord`] and never mutated.
///
/// `reactants`/`products` keep the raw REACLIB tokens in file order (after
/// the reverse swap); the classifier's view lives in `target`, `residual`,
/// `projectiles` and `ejectiles`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reaction {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    pub label: String,
    pub chapter: Chapter,
    pub q_value: f64,
    pub coeffs: RateCoefficients,
    pub target: String,
    pub residual: String,
    pub projectiles: Vec<String>,
    pub ejectiles: Vec<String>,
    /// Canonical key, e.g. `c12(p,g)n13`.
    pub rp_name: String,
    /// The bracketed part of the key, e.g. `(p,g)`.
    pub reaction_type: String,
    pub process: ProcessFlags,
    pub reverse: bool,
}

impl std::fmt::Display for Reaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}{}]", self.rp_name, self.label, if self.reverse { ", reverse" } else { "" })
    }
}
