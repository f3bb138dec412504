//! Tabular exports: CSV of the reaction set and the `;`-separated energy report.

use crate::engine::{SpeciesTable, peak_importance};
use crate::{Reaction, Result};
use std::fmt::Write as _;
use std::io::Write;

const CSV_HEADER: &str = "id,rpName,chapter,reactants,products,qValue,is_reverse,label,a0,a1,a2,a3,a4,a5,a6";
const ENERGY_HEADER: &str = "name;maxEnergy;QValue;reactants;products;a0;a1;a2;a3;a4;a5;a6";

/// Row id built from the raw tokens: `p_c12_to_n13_LS09`.
pub fn table_id(reaction: &Reaction) -> String {
    format!("{}_to_{}_{}", reaction.reactants.join("_"), reaction.products.join("_"), reaction.label.to_uppercase())
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write `reactions` as CSV with a header row.
pub fn write_table<W: Write>(writer: &mut W, reactions: &[Reaction]) -> Result<()> {
    let mut out = String::new();
    let _ = writeln!(out, "{CSV_HEADER}");

    for r in reactions {
        let mut row = vec![
            csv_field(&table_id(r)),
            csv_field(&r.rp_name),
            r.chapter.to_string(),
            csv_field(&r.reactants.join(" ")),
            csv_field(&r.products.join(" ")),
            format!("{:?}", r.q_value),
            r.reverse.to_string(),
            csv_field(&r.label),
        ];
        row.extend(r.coeffs.iter().map(|c| format!("{c:?}")));
        let _ = writeln!(out, "{}", row.join(","));
    }

    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write the peak-importance report, one line per reaction.
///
/// Importance is estimated over the default grid with `table` supplying
/// atomic masses.
pub fn energy_report<W: Write>(writer: &mut W, reactions: &[Reaction], table: &dyn SpeciesTable) -> Result<()> {
    let mut out = String::new();
    let _ = writeln!(out, "{ENERGY_HEADER}");

    for r in reactions {
        let peak = peak_importance(r, table)?;
        let coeffs = r.coeffs.iter().map(|c| format!("{c:?}")).collect::<Vec<_>>().join(";");
        let _ = writeln!(
            out,
            "{};{:?};{:?};{};{};{coeffs}",
            r.rp_name,
            peak,
            r.q_value,
            r.reactants.join(" "),
            r.products.join(" ")
        );
    }

    writer.write_all(out.as_bytes())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chapter, ParsedRecord, SpeciesCatalog, build_reaction};

    fn reaction(group: &str, chapter: u8, label: &str, q: f64) -> Reaction {
        let record = ParsedRecord {
            line: 1,
            chapter: Chapter::new(chapter).unwrap(),
            species_group: group.to_string(),
            label: label.to_string(),
            q_value: q,
            coeffs: [0.0; 7],
            reverse: false,
        };
        build_reaction(&record, &SpeciesCatalog::builtin()).unwrap()
    }

    #[test]
    fn id_uses_raw_tokens() {
        assert_eq!(table_id(&reaction("p c12 n13", 4, "ls09", 1.943)), "p_c12_to_n13_LS09");
    }

    #[test]
    fn csv_quotes_keys_with_commas() {
        let mut out = Vec::new();
        write_table(&mut out, &[reaction("p c12 n13", 4, "ls09", 1.943)]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "p_c12_to_n13_LS09,\"c12(p,g)n13\",4,p c12,n13,1.943,false,ls09,0.0,0.0,0.0,0.0,0.0,0.0,0.0"
        );
    }

    #[test]
    fn energy_report_line_per_reaction() {
        let catalog = SpeciesCatalog::builtin();
        let reactions = [reaction("p c12 n13", 4, "ls09", 1.943), reaction("he3 he3 he4 p p", 6, "nacr", 12.86)];
        let mut out = Vec::new();
        energy_report(&mut out, &reactions, &catalog).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], ENERGY_HEADER);
        let fields: Vec<&str> = lines[2].split(';').collect();
        assert_eq!(fields.len(), 12);
        assert_eq!(fields[0], "he3(he3,2p)he4");
        assert!(fields[1].parse::<f64>().unwrap() > 0.0);
        assert_eq!(fields[2], "12.86");
        assert_eq!(fields[3], "he3 he3");
    }
}
