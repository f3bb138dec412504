//! REACLIB ingestion engine.
//!
//! Turning a REACLIB file into classified reactions is a strictly forward
//! pipeline; no stage reads state written by a later one:
//!
//! ```text
//! file content
//!     │  split_entries / parse_entry        (tokenizer.rs)
//!     v
//! ParsedRecord ── split_group + resolve_species (species.rs)
//!     │                 └─ SpeciesTable lookup (A, Z, atomic mass)
//!     v
//! classify                                  (classify.rs)
//!     │  - baryon conservation
//!     │  - lepton / photon inference
//!     │  - target, residual, canonical key
//!     v
//! Reaction ──┬─ evaluate_rate                (rate.rs)
//!            └─ peak_importance              (importance.rs)
//! ```
//!
//! Each entry is transformed independently; the unit of failure is one entry.
//! `metrics.rs` holds the per-run counters the orchestration layer in
//! `api.rs` fills while walking a file.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/importance.rs"]
mod importance;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/rate.rs"]
mod rate;
#[path = "engine/species.rs"]
mod species;
#[path = "engine/tokenizer.rs"]
mod tokenizer;

pub use classify::{Classification, build_reaction, classify};
pub use importance::{ImportanceGrid, peak_importance, peak_importance_on};
pub use metrics::IngestStats;
pub use rate::evaluate_rate;
pub use species::{LightNucleus, Species, SpeciesCatalog, SpeciesTable, canonical_name, resolve_species, split_group};
pub use tokenizer::{RawEntry, parse_entry, split_entries};

#[cfg(test)]
pub(crate) use tokenizer::fixtures;
