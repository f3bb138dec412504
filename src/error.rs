use crate::Chapter;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a raw REACLIB block and an encoded record.
///
/// Per-record variants (`Format`, `SpeciesCount`, `SpeciesResolution`,
/// `Conservation`) reject one entry and let the batch continue; the caller
/// decides whether to count, log or escalate them. `NumericDomain` and `Io`
/// always propagate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("entry starting at line {line} does not match the REACLIB layout")]
    Format { line: usize },

    #[error("chapter {chapter} needs {expected} species but the entry lists {found}")]
    SpeciesCount { chapter: Chapter, expected: usize, found: usize },

    #[error("species '{token}' (as '{canonical}') not found in species table")]
    SpeciesResolution { token: String, canonical: String },

    #[error("baryon number not conserved: A(reactants)={reactants}, A(products)={products}")]
    Conservation { reactants: u32, products: u32 },

    #[error("a reaction needs at least one reactant and one product")]
    EmptyReaction,

    #[error("rate is undefined at non-positive temperature T9={t9}")]
    NumericDomain { t9: f64 },

    #[error("partition record Z={z} A={a} carries {found} coefficients, expected 24")]
    PartitionFormat { z: i32, a: i32, found: usize },

    #[error("binary record length mismatch: expected a multiple of {expected} bytes, found {found}")]
    RecordSize { expected: usize, found: usize },

    #[error("malformed species table line {line}: {details}")]
    SpeciesTable { line: usize, details: String },
}

impl Error {
    pub fn species(token: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self::SpeciesResolution { token: token.into(), canonical: canonical.into() }
    }
}
