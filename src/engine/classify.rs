//! Quantum-number bookkeeping and role assignment.
//!
//! REACLIB lists nuclei only. Everything else has to be inferred from the
//! conserved quantities:
//!
//! ```text
//! ΔA = ΣA(reactants) − ΣA(products)   must be 0, otherwise the entry is rejected
//! ΔZ = ΣZ(reactants) − ΣZ(products)   ±1 ⇒ a charged lepton is involved
//! ΔN = #reactants − #products          ±1 with ΔZ = 0 ⇒ a photon is involved
//!
//! ΔZ = -1, Q > 0, ΔN = 0   electron capture        e-  projectile
//! ΔZ = -1, otherwise       β⁻ decay                e-  ejectile
//! ΔZ = +1                  β⁺ / weak p-capture     e+  ejectile
//! ΔZ =  0, ΔN = +1, Q > 0  radiative capture       g   ejectile
//! ΔZ =  0, ΔN = -1, Q < 0  photodisintegration     g   projectile
//! ```
//!
//! Neutrinos are never written. The heaviest reactant (by atomic mass) is
//! the target, the heaviest product the residual; remaining nuclei are
//! projectiles/ejectiles, appended after any inferred lepton or photon.

use super::species::{Species, SpeciesTable, nuclide_token, particle_token, resolve_species, split_group};
use crate::{Error, ParsedRecord, ProcessFlags, Reaction, Result};

/// Classifier output for one reactant/product set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub target: String,
    pub residual: String,
    pub projectiles: Vec<String>,
    pub ejectiles: Vec<String>,
    pub rp_name: String,
    pub reaction_type: String,
    pub process: ProcessFlags,
}

/// Classify resolved reactants/products given the Q-value (MeV).
///
/// Fails with [`Error::Conservation`] when baryon number is not conserved;
/// nothing else can fail once species are resolved.
pub fn classify(reactants: &[Species], products: &[Species], q_value: f64) -> Result<Classification> {
    let (Some(target_idx), Some(residual_idx)) = (heaviest(reactants), heaviest(products)) else {
        return Err(Error::EmptyReaction);
    };

    let a_reactants: u32 = reactants.iter().map(|s| s.a).sum();
    let a_products: u32 = products.iter().map(|s| s.a).sum();
    if a_reactants != a_products {
        return Err(Error::Conservation { reactants: a_reactants, products: a_products });
    }

    let dz = charge(reactants) - charge(products);
    let dn = reactants.len() as i64 - products.len() as i64;

    let mut projectiles: Vec<String> = Vec::new();
    let mut ejectiles: Vec<String> = Vec::new();
    let mut process = ProcessFlags::empty();

    match dz {
        -1 if q_value > 0.0 && dn == 0 => {
            projectiles.push("e-".to_string());
            process |= ProcessFlags::ELECTRON_CAPTURE;
        }
        -1 => {
            ejectiles.push("e-".to_string());
            process |= ProcessFlags::BETA_MINUS;
        }
        1 => {
            ejectiles.push("e+".to_string());
            process |= ProcessFlags::BETA_PLUS;
        }
        0 if dn == 1 && q_value > 0.0 => {
            ejectiles.push("g".to_string());
            process |= ProcessFlags::RADIATIVE_CAPTURE;
        }
        0 if dn == -1 && q_value < 0.0 => {
            projectiles.push("g".to_string());
            process |= ProcessFlags::PHOTODISINTEGRATION;
        }
        _ => {}
    }

    projectiles.extend(others(reactants, target_idx).map(|s| particle_token(&s.name)));
    ejectiles.extend(others(products, residual_idx).map(|s| particle_token(&s.name)));

    let target = nuclide_token(&reactants[target_idx].name);
    let residual = nuclide_token(&products[residual_idx].name);
    let reaction_type = format!("({},{})", group_particles(&projectiles), group_particles(&ejectiles));
    let rp_name = format!("{target}{reaction_type}{residual}");

    Ok(Classification { target, residual, projectiles, ejectiles, rp_name, reaction_type, process })
}

/// Tokenized entry → classified [`Reaction`].
///
/// Splits the species group by chapter, applies the reverse swap, resolves
/// every token against `table` and classifies.
pub fn build_reaction(record: &ParsedRecord, table: &dyn SpeciesTable) -> Result<Reaction> {
    let (mut reactants, mut products) = split_group(&record.species_group, record.chapter)?;
    if record.reverse {
        std::mem::swap(&mut reactants, &mut products);
    }

    let reactant_species = resolve_species(&reactants, table)?;
    let product_species = resolve_species(&products, table)?;
    let class = classify(&reactant_species, &product_species, record.q_value)?;

    Ok(Reaction {
        reactants,
        products,
        label: record.label.clone(),
        chapter: record.chapter,
        q_value: record.q_value,
        coeffs: record.coeffs,
        target: class.target,
        residual: class.residual,
        projectiles: class.projectiles,
        ejectiles: class.ejectiles,
        rp_name: class.rp_name,
        reaction_type: class.reaction_type,
        process: class.process,
        reverse: record.reverse,
    })
}

/// Index of the heaviest species; the first one wins ties.
fn heaviest(species: &[Species]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, s) in species.iter().enumerate() {
        match best {
            Some(b) if species[b].atomic_mass >= s.atomic_mass => {}
            _ => best = Some(idx),
        }
    }
    best
}

fn charge(species: &[Species]) -> i64 {
    species.iter().map(|s| i64::from(s.z)).sum()
}

fn others(species: &[Species], skip: usize) -> impl Iterator<Item = &Species> {
    species.iter().enumerate().filter(move |(idx, _)| *idx != skip).map(|(_, s)| s)
}

/// `["p", "p", "g"]` → `"2p g"`; groups keep first-occurrence order.
fn group_particles(particles: &[String]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for p in particles {
        match counts.iter_mut().find(|(name, _)| *name == p.as_str()) {
            Some((_, n)) => *n += 1,
            None => counts.push((p.as_str(), 1)),
        }
    }

    counts
        .into_iter()
        .map(|(name, n)| if n > 1 { format!("{n}{name}") } else { name.to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chapter, SpeciesCatalog};

    fn resolve(tokens: &[&str]) -> Vec<Species> {
        let catalog = SpeciesCatalog::builtin();
        let tokens: Vec<String> = tokens.iter().map(|s| s.to_string()).collect();
        resolve_species(&tokens, &catalog).unwrap()
    }

    fn class(reactants: &[&str], products: &[&str], q: f64) -> Classification {
        classify(&resolve(reactants), &resolve(products), q).unwrap()
    }

    #[test]
    fn he3_he3_to_alpha_and_two_protons() {
        let c = class(&["he3", "he3"], &["he4", "p", "p"], 12.86);
        assert_eq!(c.target, "he3");
        assert_eq!(c.residual, "he4");
        assert_eq!(c.projectiles, vec!["he3"]);
        assert_eq!(c.ejectiles, vec!["p", "p"]);
        assert_eq!(c.rp_name, "he3(he3,2p)he4");
        assert_eq!(c.reaction_type, "(he3,2p)");
        assert!(c.process.is_empty());
    }

    #[test]
    fn radiative_capture_has_explicit_photon() {
        let c = class(&["p", "c12"], &["n13"], 1.943);
        assert_eq!(c.projectiles, vec!["p"]);
        assert_eq!(c.ejectiles, vec!["g"]);
        assert_eq!(c.rp_name, "c12(p,g)n13");
        assert_eq!(c.process, ProcessFlags::RADIATIVE_CAPTURE);

        let d = class(&["p", "p"], &["d"], 0.42);
        assert_eq!(d.process, ProcessFlags::BETA_PLUS);
        assert_eq!(d.rp_name, "p(p,e+)d");
    }

    #[test]
    fn photodisintegration_has_photon_projectile() {
        let c = class(&["n13"], &["p", "c12"], -1.943);
        assert_eq!(c.projectiles, vec!["g"]);
        assert_eq!(c.ejectiles, vec!["p"]);
        assert_eq!(c.rp_name, "n13(g,p)c12");
        assert_eq!(c.process, ProcessFlags::PHOTODISINTEGRATION);
    }

    #[test]
    fn weak_processes() {
        // n13 -> c13: ΔZ = +1
        let c = class(&["n13"], &["c13"], 2.22);
        assert_eq!(c.rp_name, "n13(,e+)c13");
        assert_eq!(c.process, ProcessFlags::BETA_PLUS);

        let c = class(&["be7"], &["li7"], 0.862);
        assert_eq!(c.rp_name, "be7(,e+)li7");

        let c = class(&["li7"], &["be7"], 0.5);
        assert_eq!(c.projectiles, vec!["e-"]);
        assert_eq!(c.process, ProcessFlags::ELECTRON_CAPTURE);
        assert_eq!(c.rp_name, "li7(e-,)be7");

        let c = class(&["li7"], &["be7"], -0.5);
        assert_eq!(c.ejectiles, vec!["e-"]);
        assert_eq!(c.process, ProcessFlags::BETA_MINUS);

        // ΔZ = -1 with Q > 0 and ΔN = 0 takes the capture branch.
        let c = class(&["n"], &["p"], 0.782);
        assert_eq!(c.target, "n");
        assert_eq!(c.residual, "p");
        assert_eq!(c.process, ProcessFlags::ELECTRON_CAPTURE);
        assert_eq!(c.rp_name, "n(e-,)p");
    }

    #[test]
    fn alpha_is_a_as_particle_but_he4_as_nucleus() {
        // 3 -> 1 nuclei: ΔN = 2, so no photon is inferred.
        let c = class(&["he4", "he4", "he4"], &["c12"], 7.275);
        assert_eq!(c.target, "he4");
        assert_eq!(c.projectiles, vec!["a", "a"]);
        assert!(c.ejectiles.is_empty());
        assert_eq!(c.rp_name, "he4(2a,)c12");
    }

    #[test]
    fn rejects_baryon_violation() {
        let err = classify(&resolve(&["p", "c12"]), &resolve(&["n14"]), 7.55).unwrap_err();
        assert!(matches!(err, Error::Conservation { reactants: 13, products: 14 }));
    }

    #[test]
    fn key_depends_only_on_physics() {
        let a = class(&["p", "n15"], &["he4", "c12"], 4.966);
        let b = class(&["p", "n15"], &["he4", "c12"], 4.966);
        assert_eq!(a, b);
        assert_eq!(a.rp_name, "n15(p,a)c12");
    }

    #[test]
    fn builds_reverse_reaction_with_swapped_sides() {
        let record = ParsedRecord {
            line: 1,
            chapter: Chapter::new(4).unwrap(),
            species_group: "p c12 n13".to_string(),
            label: "ls09rv".to_string(),
            q_value: -1.943,
            coeffs: [0.0; 7],
            reverse: true,
        };
        let reaction = build_reaction(&record, &SpeciesCatalog::builtin()).unwrap();
        assert_eq!(reaction.reactants, vec!["n13"]);
        assert_eq!(reaction.products, vec!["p", "c12"]);
        assert_eq!(reaction.rp_name, "n13(g,p)c12");
        assert!(reaction.reverse);
    }
}
