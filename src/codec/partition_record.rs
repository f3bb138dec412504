//! Rauscher–Thielemann partition-function records.
//!
//! Text input, one block per nuclide:
//!
//! ```text
//! he4
//!   2   4   0.0
//!  1.00 1.00 1.00 1.00 1.00 1.00 1.00 1.00
//!  1.00 1.00 1.00 1.00 1.00 1.00 1.00 1.00
//!  1.00 1.00 1.00 1.00 1.00 1.00 1.00 1.00
//! ```
//!
//! Binary output is `i32 Z | i32 A | f64 spin | f64[24]`, little-endian, 208 bytes.

use super::{LeReader, records};
use crate::{Error, Result};
use bytes::Bytes;
use std::io::Write;

pub const PARTITION_RECORD_SIZE: usize = 208;

const GRID_POINTS: usize = 24;

/// Temperatures (T9) the normalized partition values are tabulated at.
pub const RT_TEMPERATURE_GRID_T9: [f64; GRID_POINTS] = [
    0.01, 0.15, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 6.0, 7.0, 8.0, 9.0,
    10.0,
];

#[derive(Debug, Clone, PartialEq)]
pub struct PartitionRecord {
    pub z: i32,
    pub a: i32,
    /// Ground-state spin.
    pub spin: f64,
    /// Partition function normalized by `2J + 1`, one value per grid temperature.
    pub normalized_g: [f64; GRID_POINTS],
}

impl PartitionRecord {
    pub fn encode(&self) -> Bytes {
        let mut buf = Vec::with_capacity(PARTITION_RECORD_SIZE);
        buf.extend_from_slice(&self.z.to_le_bytes());
        buf.extend_from_slice(&self.a.to_le_bytes());
        buf.extend_from_slice(&self.spin.to_le_bytes());
        for g in self.normalized_g {
            buf.extend_from_slice(&g.to_le_bytes());
        }
        Bytes::from(buf)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PARTITION_RECORD_SIZE {
            return Err(Error::RecordSize { expected: PARTITION_RECORD_SIZE, found: bytes.len() });
        }
        let mut r = LeReader::new(bytes);
        let z = r.i32();
        let a = r.i32();
        let spin = r.f64();
        let mut normalized_g = [0.0; GRID_POINTS];
        for slot in &mut normalized_g {
            *slot = r.f64();
        }
        Ok(PartitionRecord { z, a, spin, normalized_g })
    }

    /// Partition function `G(T9)`: linear interpolation on the grid times `2J + 1`.
    ///
    /// Temperatures at or below the first grid point use the first value,
    /// temperatures above the last use the last.
    pub fn evaluate(&self, t9: f64) -> f64 {
        let degeneracy = 2.0 * self.spin + 1.0;
        let upper = RT_TEMPERATURE_GRID_T9.partition_point(|&t| t < t9);

        let g = match upper {
            0 => self.normalized_g[0],
            GRID_POINTS => self.normalized_g[GRID_POINTS - 1],
            _ => {
                let (t_lo, t_hi) = (RT_TEMPERATURE_GRID_T9[upper - 1], RT_TEMPERATURE_GRID_T9[upper]);
                let (g_lo, g_hi) = (self.normalized_g[upper - 1], self.normalized_g[upper]);
                g_lo + (t9 - t_lo) / (t_hi - t_lo) * (g_hi - g_lo)
            }
        };
        g * degeneracy
    }
}

/// Parse the text table. Returns the records plus the number of blocks skipped.
///
/// A block whose `Z A spin` line is malformed, or which does not carry
/// exactly 24 numeric values, is skipped with a warning.
pub fn parse_partition_table(content: &str) -> (Vec<PartitionRecord>, usize) {
    let lines: Vec<&str> = content.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let mut out = Vec::new();
    let mut skipped = 0;

    let mut idx = 0;
    while idx < lines.len() {
        let name = lines[idx];
        if !is_name_line(name) {
            idx += 1;
            continue;
        }

        let mut next = idx + 1;
        while next < lines.len() && !is_name_line(lines[next]) {
            next += 1;
        }
        let block = &lines[idx + 1..next];
        idx = next;

        match parse_block(block) {
            Ok(record) => {
                tracing::debug!(name, z = record.z, a = record.a, spin = record.spin, "partition record");
                out.push(record);
            }
            Err(err) => {
                tracing::warn!(name, "skipping partition record: {err}");
                skipped += 1;
            }
        }
    }

    (out, skipped)
}

/// A name line is a single token starting with a letter (`he4`, `fe56`).
fn is_name_line(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    matches!((tokens.next(), tokens.next()), (Some(tok), None) if tok.starts_with(|c: char| c.is_ascii_alphabetic()))
}

fn parse_block(block: &[&str]) -> Result<PartitionRecord> {
    let re = regex!(r"^(\d+)\s+(\d+)\s+(\d+(?:\.\d*)?)$");
    let (header, values) = block.split_first().ok_or(Error::PartitionFormat { z: 0, a: 0, found: 0 })?;
    let caps = re.captures(header).ok_or(Error::PartitionFormat { z: 0, a: 0, found: 0 })?;

    let z = caps[1].parse::<i32>().map_err(|_| Error::PartitionFormat { z: 0, a: 0, found: 0 })?;
    let a = caps[2].parse::<i32>().map_err(|_| Error::PartitionFormat { z, a: 0, found: 0 })?;
    let spin = caps[3].parse::<f64>().map_err(|_| Error::PartitionFormat { z, a, found: 0 })?;

    let tokens: Vec<&str> = values.iter().flat_map(|l| l.split_whitespace()).collect();
    let parsed: Option<Vec<f64>> = tokens.iter().map(|t| t.parse::<f64>().ok()).collect();
    let normalized_g: [f64; GRID_POINTS] = parsed
        .and_then(|v| v.try_into().ok())
        .ok_or(Error::PartitionFormat { z, a, found: tokens.len() })?;

    Ok(PartitionRecord { z, a, spin, normalized_g })
}

pub fn write_partition_records<W: Write>(writer: &mut W, records: &[PartitionRecord]) -> Result<usize> {
    let mut out = Vec::with_capacity(records.len() * PARTITION_RECORD_SIZE);
    for record in records {
        out.extend_from_slice(&record.encode());
    }
    writer.write_all(&out)?;
    writer.flush()?;
    Ok(records.len())
}

pub fn read_partition_records(bytes: &[u8]) -> Result<Vec<PartitionRecord>> {
    records(bytes, PARTITION_RECORD_SIZE)?.map(PartitionRecord::decode).collect()
}
