//! Ingestion run counters.
//!
//! Every 4-line block ends up in exactly one bucket, so
//! `entries == included + skipped()`.

use crate::Error;
use std::time::Duration;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestStats {
    /// Non-blank 4-line blocks seen.
    pub entries: usize,
    /// Reactions that survived every stage, including culling.
    pub included: usize,
    /// Blocks that did not match the entry layout.
    pub format_skipped: usize,
    /// Entries with too few species or a species missing from the table.
    pub species_skipped: usize,
    /// Entries rejected for violating baryon conservation.
    pub conservation_skipped: usize,
    /// Classified reactions dropped because their rate was below the culling threshold.
    pub culled: usize,
    pub elapsed: Duration,
}

impl IngestStats {
    pub fn skipped(&self) -> usize {
        self.format_skipped + self.species_skipped + self.conservation_skipped + self.culled
    }

    /// Book a record-local failure. Returns `false` for errors that must propagate.
    pub(crate) fn record_skip(&mut self, err: &Error) -> bool {
        match err {
            Error::Format { .. } => self.format_skipped += 1,
            Error::SpeciesCount { .. } | Error::SpeciesResolution { .. } => self.species_skipped += 1,
            Error::Conservation { .. } | Error::EmptyReaction => self.conservation_skipped += 1,
            _ => return false,
        }
        true
    }
}
