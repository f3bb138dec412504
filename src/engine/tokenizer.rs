//! Entry tokenizer.
//!
//! A REACLIB v2 file is a sequence of 4-line blocks:
//!
//! ```text
//! 4                                                    <- chapter (1..=11)
//!          p  c12  n13                       nacrn     1.94300e+00
//!  1.714820e+01-1.369200e+01-2.308810e-01 4.443620e+00
//! -3.158980e+00-6.666670e-01 0.000000e+00
//! ```
//!
//! The species line is column-formatted: six 5-wide species fields after a
//! 5-space indent, 8 blanks, a 4-char label, a flag column and, at offset
//! 48, the reverse marker `v`. Everything except the reverse marker is
//! matched structurally; the marker is read by column only.

use crate::{Chapter, Error, ParsedRecord, RateCoefficients, Result};

/// Byte offset of the reverse-rate marker on the species line.
pub(crate) const REVERSE_COLUMN: usize = 48;

const LINES_PER_ENTRY: usize = 4;

/// Four physical lines of one REACLIB entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry<'a> {
    /// 1-based line number of the first line.
    pub line: usize,
    pub lines: [&'a str; LINES_PER_ENTRY],
}

impl RawEntry<'_> {
    fn joined(&self) -> String {
        self.lines.join("\n")
    }

    /// Reverse marker: `v` at [`REVERSE_COLUMN`] of the second line.
    pub fn reverse_flag(&self) -> bool {
        self.lines[1].as_bytes().get(REVERSE_COLUMN) == Some(&b'v')
    }
}

/// Split file content into consecutive 4-line blocks.
///
/// Blocks are taken at fixed strides from the first line. A trailing block
/// with fewer than four lines is dropped, as are blocks whose header line is
/// blank (padding between sections).
pub fn split_entries(content: &str) -> Vec<RawEntry<'_>> {
    let lines: Vec<&str> = content.split('\n').collect();

    lines
        .chunks_exact(LINES_PER_ENTRY)
        .enumerate()
        .filter(|(_, chunk)| !chunk[0].trim().is_empty())
        .map(|(idx, chunk)| RawEntry {
            line: idx * LINES_PER_ENTRY + 1,
            lines: [chunk[0], chunk[1], chunk[2], chunk[3]],
        })
        .collect()
}

/// Match one block against the REACLIB entry layout.
///
/// Returns [`Error::Format`] when the block does not match; callers treat
/// that as "skip this entry".
pub fn parse_entry(entry: &RawEntry<'_>) -> Result<ParsedRecord> {
    let re = regex!(concat!(
        r"^([1-9]|1[01])[ \t]*\r?\n",
        r"[ \t]*((?:[A-Za-z0-9*-]+[ \t]+)*[A-Za-z0-9*-]+)",
        r"[ \t]+([A-Za-z0-9+]+)",
        r"[ \t]+([+-]?(?:\d+\.\d*|\.\d+)(?:[eE][+-]?\d+)?)",
        r"[ \t\r\n]+",
        r"([+-]?\d+\.\d*[eE][+-]?\d+)\s*",
        r"([+-]?\d+\.\d*[eE][+-]?\d+)\s*",
        r"([+-]?\d+\.\d*[eE][+-]?\d+)\s*",
        r"([+-]?\d+\.\d*[eE][+-]?\d+)\s*",
        r"([+-]?\d+\.\d*[eE][+-]?\d+)\s*",
        r"([+-]?\d+\.\d*[eE][+-]?\d+)\s*",
        r"([+-]?\d+\.\d*[eE][+-]?\d+)",
    ));

    let format_error = || Error::Format { line: entry.line };

    let text = entry.joined();
    let caps = re.captures(&text).ok_or_else(format_error)?;

    let chapter = caps[1].parse::<u8>().ok().and_then(Chapter::new).ok_or_else(format_error)?;
    let q_value = caps[4].parse::<f64>().map_err(|_| format_error())?;

    let mut coeffs: RateCoefficients = [0.0; 7];
    for (slot, group) in coeffs.iter_mut().zip(5..12) {
        *slot = caps[group].parse::<f64>().map_err(|_| format_error())?;
    }

    Ok(ParsedRecord {
        line: entry.line,
        chapter,
        species_group: caps[2].trim().to_string(),
        label: caps[3].to_string(),
        q_value,
        coeffs,
        reverse: entry.reverse_flag(),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Render a species line with REACLIB column placement.
    pub fn species_line(species: &[&str], label: &str, flag: char, reverse: bool, q: &str) -> String {
        let mut line = String::from("     ");
        for slot in 0..6 {
            line.push_str(&format!("{:>5}", species.get(slot).copied().unwrap_or("")));
        }
        line.push_str("        ");
        line.push_str(&format!("{label:<4}"));
        line.push(flag);
        line.push(if reverse { 'v' } else { ' ' });
        line.push_str("   ");
        line.push_str(&format!("{q:>12}"));
        line
    }

    pub fn entry(chapter: u8, species: &[&str], label: &str, reverse: bool, q: &str, coeffs: [&str; 7]) -> String {
        let c: Vec<String> = coeffs.iter().map(|c| format!("{c:>13}")).collect();
        format!(
            "{chapter}\n{}\n{}{}{}{}\n{}{}{}\n",
            species_line(species, label, 'n', reverse, q),
            c[0],
            c[1],
            c[2],
            c[3],
            c[4],
            c[5],
            c[6],
        )
    }

    pub const ZERO: [&str; 7] = ["0.000000e+00"; 7];
}
