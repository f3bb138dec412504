//! Peak energy-generation estimate used to judge whether a reaction matters.
//!
//! For every `(T9, ρ)` on a log grid the estimator forms
//!
//! ```text
//! proxy = rate(T9) · ρ^n · Π(Y/(m_i·u)) / (Π k! · N_A^(n−1)) · |Q|
//! ```
//!
//! with `n` reactants at equal abundance `Y = 1/n`, `k` the multiplicity of
//! each repeated reactant and `m_i` the atomic mass in u. The grid maximum
//! is a filter signal only; it is never stored on the reaction.

use super::rate::evaluate_rate;
use super::species::{SpeciesTable, canonical_name};
use crate::{Reaction, Result};

/// Avogadro constant, mol⁻¹.
pub const AVOGADRO: f64 = 6.022_140_76e23;
/// Atomic mass unit in grams.
pub const ATOMIC_MASS_UNIT_G: f64 = 1.660_539_066_60e-24;

const GRID_POINTS: usize = 100;

/// Temperature × density grid the estimator maximizes over.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceGrid {
    pub t9: Vec<f64>,
    pub rho: Vec<f64>,
}

impl Default for ImportanceGrid {
    /// T9 ∈ [1e-3, 1e2], ρ ∈ [1, 1e6] g/cm³, 100 log-spaced points each.
    fn default() -> Self {
        ImportanceGrid { t9: logspace(-3.0, 2.0, GRID_POINTS), rho: logspace(0.0, 6.0, GRID_POINTS) }
    }
}

impl ImportanceGrid {
    /// `points` log-spaced values per axis between the given powers of ten.
    pub fn logarithmic(t9_decades: (f64, f64), rho_decades: (f64, f64), points: usize) -> Self {
        ImportanceGrid {
            t9: logspace(t9_decades.0, t9_decades.1, points),
            rho: logspace(rho_decades.0, rho_decades.1, points),
        }
    }
}

/// `points` values from `10^start` to `10^end` inclusive, evenly spaced in log10.
fn logspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![10f64.powf(start)],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points).map(|i| 10f64.powf(start + step * i as f64)).collect()
        }
    }
}

/// Peak energy proxy (MeV-weighted) over the default grid.
pub fn peak_importance(reaction: &Reaction, table: &dyn SpeciesTable) -> Result<f64> {
    peak_importance_on(reaction, table, &ImportanceGrid::default())
}

/// Peak energy proxy over `grid`.
///
/// A reactant missing from `table` makes the estimate `0.0`. Grid
/// temperatures must be positive; a non-positive one propagates
/// [`crate::Error::NumericDomain`].
pub fn peak_importance_on(reaction: &Reaction, table: &dyn SpeciesTable, grid: &ImportanceGrid) -> Result<f64> {
    let n = reaction.reactants.len();
    if n == 0 {
        return Ok(0.0);
    }

    let Some(mass_term) = mass_term(&reaction.reactants, table) else {
        tracing::debug!(reaction = %reaction.rp_name, "reactant missing from species table, importance is zero");
        return Ok(0.0);
    };

    let exponent = i32::try_from(n).unwrap_or(i32::MAX);
    let density_free = mass_term / multiplicity_factorial(&reaction.reactants);
    let molar = AVOGADRO.powi(exponent - 1);
    let q = reaction.q_value.abs();

    let mut peak = 0.0_f64;
    for &t9 in &grid.t9 {
        let rate = evaluate_rate(&reaction.coeffs, t9)?;
        for &rho in &grid.rho {
            let proxy = density_free * rho.powi(exponent) * rate / molar * q;
            if proxy > peak {
                peak = proxy;
            }
        }
    }

    tracing::trace!(reaction = %reaction.rp_name, peak, "peak energy proxy");
    Ok(peak)
}

/// `Π (Y / (m_i · u))` with `Y = 1/n`; `None` if any reactant is unknown.
fn mass_term(reactants: &[String], table: &dyn SpeciesTable) -> Option<f64> {
    let y = 1.0 / reactants.len() as f64;
    reactants.iter().try_fold(1.0, |acc, token| {
        let canonical = canonical_name(token).ok()?;
        let species = table.lookup(&canonical)?;
        Some(acc * y / (species.atomic_mass * ATOMIC_MASS_UNIT_G))
    })
}

/// `Π k!` over identical reactants appearing `k > 1` times.
fn multiplicity_factorial(reactants: &[String]) -> f64 {
    let mut seen: Vec<(&str, u32)> = Vec::new();
    for r in reactants {
        match seen.iter_mut().find(|(name, _)| *name == r.as_str()) {
            Some((_, k)) => *k += 1,
            None => seen.push((r.as_str(), 1)),
        }
    }
    seen.iter().map(|&(_, k)| (1..=k).map(f64::from).product::<f64>()).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chapter, ProcessFlags, SpeciesCatalog};

    fn reaction(reactants: &[&str], q_value: f64, coeffs: [f64; 7]) -> Reaction {
        Reaction {
            reactants: reactants.iter().map(|s| s.to_string()).collect(),
            products: vec![],
            label: "test".to_string(),
            chapter: Chapter::new(4).unwrap(),
            q_value,
            coeffs,
            target: String::new(),
            residual: String::new(),
            projectiles: vec![],
            ejectiles: vec![],
            rp_name: "test".to_string(),
            reaction_type: String::new(),
            process: ProcessFlags::empty(),
            reverse: false,
        }
    }

    #[test]
    fn default_grid_spans_documented_ranges() {
        let grid = ImportanceGrid::default();
        assert_eq!(grid.t9.len(), 100);
        assert!((grid.t9[0] - 1e-3).abs() < 1e-15);
        assert!((grid.t9[99] - 1e2).abs() < 1e-9);
        assert!((grid.rho[0] - 1.0).abs() < 1e-15);
        assert!((grid.rho[99] - 1e6).abs() < 1e-6);
    }

    #[test]
    fn factorial_counts_repeats_only() {
        let tokens = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(multiplicity_factorial(&tokens(&["p", "c12"])), 1.0);
        assert_eq!(multiplicity_factorial(&tokens(&["he4", "he4", "he4"])), 6.0);
        assert_eq!(multiplicity_factorial(&tokens(&["p", "p", "he3", "he3"])), 4.0);
    }

    #[test]
    fn constant_rate_peaks_at_highest_density() {
        let catalog = SpeciesCatalog::builtin();
        let r = reaction(&["p", "p"], 1.0, [0.0; 7]);
        let peak = peak_importance(&r, &catalog).unwrap();

        let m = 1.007_825_032_23 * ATOMIC_MASS_UNIT_G;
        let expected = (0.5 / m) * (0.5 / m) / 2.0 * 1e12 / AVOGADRO;
        assert!((peak / expected - 1.0).abs() < 1e-6, "peak={peak} expected={expected}");
    }

    #[test]
    fn unknown_reactant_gives_zero() {
        let catalog = SpeciesCatalog::builtin();
        let r = reaction(&["p", "xx99"], 5.0, [0.0; 7]);
        assert_eq!(peak_importance(&r, &catalog).unwrap(), 0.0);
    }

    #[test]
    fn zero_q_value_is_never_important() {
        let catalog = SpeciesCatalog::builtin();
        let r = reaction(&["p", "c12"], 0.0, [10.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(peak_importance(&r, &catalog).unwrap(), 0.0);
    }

    #[test]
    fn coarse_grid_picks_hottest_densest_corner() {
        let grid = ImportanceGrid::logarithmic((-1.0, 1.0), (0.0, 2.0), 3);
        assert_eq!(grid.t9.len(), 3);
        assert!((grid.t9[1] - 1.0).abs() < 1e-15);
        assert!((grid.rho[2] - 100.0).abs() < 1e-12);

        // rate = T9 via the ln(T9) term.
        let catalog = SpeciesCatalog::builtin();
        let r = reaction(&["p", "p"], -2.0, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
        let peak = peak_importance_on(&r, &catalog, &grid).unwrap();

        let m = 1.007_825_032_23 * ATOMIC_MASS_UNIT_G;
        let expected = (0.5 / m) * (0.5 / m) / 2.0 * 1e4 * 10.0 / AVOGADRO * 2.0;
        assert!((peak / expected - 1.0).abs() < 1e-9, "peak={peak} expected={expected}");
    }

    #[test]
    fn single_point_and_empty_grids() {
        let one = ImportanceGrid::logarithmic((0.0, 5.0), (1.0, 5.0), 1);
        assert_eq!(one.t9, vec![1.0]);
        assert_eq!(one.rho, vec![10.0]);

        let empty = ImportanceGrid::logarithmic((0.0, 1.0), (0.0, 1.0), 0);
        let r = reaction(&["p", "c12"], 1.0, [0.0; 7]);
        assert_eq!(peak_importance_on(&r, &SpeciesCatalog::builtin(), &empty).unwrap(), 0.0);
    }

    #[test]
    fn non_positive_grid_temperature_propagates() {
        let grid = ImportanceGrid { t9: vec![0.0], rho: vec![1.0] };
        let r = reaction(&["p", "c12"], 1.0, [0.0; 7]);
        let err = peak_importance_on(&r, &SpeciesCatalog::builtin(), &grid).unwrap_err();
        assert!(matches!(err, crate::Error::NumericDomain { .. }));
    }
}
