use crate::engine::{self, IngestStats, SpeciesCatalog, SpeciesTable};
use crate::{Reaction, Result};
use once_cell::sync::Lazy;
use std::time::Instant;

static BUILTIN_SPECIES: Lazy<SpeciesCatalog> = Lazy::new(SpeciesCatalog::builtin);

/// Ingestion context: the external collaborators a run depends on.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    /// Species table used to resolve A, Z and atomic mass.
    pub species: &'a dyn SpeciesTable,
}

impl<'a> Context<'a> {
    pub fn new(species: &'a dyn SpeciesTable) -> Self {
        Context { species }
    }
}

impl Default for Context<'static> {
    /// Context backed by the built-in nuclide catalog.
    fn default() -> Self {
        Context { species: &*BUILTIN_SPECIES }
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("species", &"<table>").finish()
    }
}

/// Options that affect which reactions are retained.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Minimum rate at `reference_t9`; `0.0` disables culling.
    pub culling: f64,
    /// Temperature (GK) the culling threshold is evaluated at.
    pub reference_t9: f64,
    /// Log every skipped or culled entry at `warn`/`info` instead of `debug`.
    pub verbose: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options { culling: 0.0, reference_t9: 0.01, verbose: false }
    }
}

/// Result of [`ingest`] and [`ingest_with`].
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Retained reactions, in input order.
    pub reactions: Vec<Reaction>,
    pub stats: IngestStats,
}

/// Ingest REACLIB `content` with the built-in species catalog and default options.
///
/// # Example
/// ```
/// let content = "\
/// 1
///          n    p                            wc12w     7.82300e-01
/// -6.781610e+00 0.000000e+00 0.000000e+00 0.000000e+00
///  0.000000e+00 0.000000e+00 0.000000e+00
/// ";
/// let out = reaclib_forge::ingest(content).unwrap();
/// assert_eq!(out.reactions[0].rp_name, "n(e-,)p");
/// ```
pub fn ingest(content: &str) -> Result<IngestResult> {
    ingest_with(content, &Context::default(), &Options::default())
}

/// Ingest REACLIB `content` using `context`/`options`.
///
/// Entries that fail to tokenize, resolve or conserve baryon number are
/// counted in [`IngestStats`] and skipped. Culling evaluates each rate at
/// `options.reference_t9`; a non-positive reference temperature is an error
/// for the whole run.
pub fn ingest_with(content: &str, context: &Context<'_>, options: &Options) -> Result<IngestResult> {
    let start = Instant::now();
    let mut stats = IngestStats::default();
    let mut reactions = Vec::new();

    for entry in engine::split_entries(content) {
        stats.entries += 1;

        let parsed = engine::parse_entry(&entry).and_then(|record| engine::build_reaction(&record, context.species));
        let reaction = match parsed {
            Ok(reaction) => reaction,
            Err(err) => {
                if !stats.record_skip(&err) {
                    return Err(err);
                }
                if options.verbose {
                    tracing::warn!(line = entry.line, "skipping entry: {err}");
                } else {
                    tracing::debug!(line = entry.line, "skipping entry: {err}");
                }
                continue;
            }
        };

        if options.culling > 0.0 {
            let rate = engine::evaluate_rate(&reaction.coeffs, options.reference_t9)?;
            if rate < options.culling {
                stats.culled += 1;
                if options.verbose {
                    tracing::info!(
                        reaction = %reaction,
                        rate,
                        t9 = options.reference_t9,
                        threshold = options.culling,
                        "culling reaction"
                    );
                }
                continue;
            }
        }

        tracing::debug!(line = entry.line, reaction = %reaction, coeffs = ?reaction.coeffs, "parsed reaction");
        stats.included += 1;
        reactions.push(reaction);
    }

    stats.elapsed = start.elapsed();
    tracing::info!(
        entries = stats.entries,
        included = stats.included,
        skipped = stats.skipped(),
        culled = stats.culled,
        "ingest finished"
    );

    Ok(IngestResult { reactions, stats })
}
