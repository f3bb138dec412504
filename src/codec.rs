//! Output encoders.
//!
//! Everything downstream of a classified [`crate::Reaction`] lives here:
//!
//! ```text
//! Reaction ──┬─ ReactionRecord::encode      397-byte packed record   (reaction_record.rs)
//!            ├─ render_header               guarded registration source (header.rs)
//!            └─ write_table / energy_report CSV and `;`-separated text  (table.rs)
//!
//! RT partition text ── parse_partition_table ── PartitionRecord::encode  (partition_record.rs)
//! ```
//!
//! Binary layouts are little-endian and packed. Fixed-width string fields are
//! truncated to `width - 1` bytes and NUL-padded, so they always carry a
//! terminator. Every encoder assembles its full output in memory and hands it
//! to the writer in a single `write_all`.

#[path = "codec/header.rs"]
mod header;
#[path = "codec/partition_record.rs"]
mod partition_record;
#[path = "codec/reaction_record.rs"]
mod reaction_record;
#[path = "codec/table.rs"]
mod table;

pub use header::{
    HeaderBanner, ReactionRegistry, content_hash, feature_flag, registration_label, registration_statement,
    render_header,
};
pub use partition_record::{
    PARTITION_RECORD_SIZE, PartitionRecord, RT_TEMPERATURE_GRID_T9, parse_partition_table, read_partition_records,
    write_partition_records,
};
pub use reaction_record::{REACTION_RECORD_SIZE, ReactionRecord, read_reactions, write_reactions};
pub use table::{energy_report, table_id, write_table};

use crate::{Error, Result};

/// Append `value` as a NUL-terminated field of exactly `width` bytes.
fn put_fixed_str(buf: &mut Vec<u8>, value: &str, width: usize) {
    let bytes = value.as_bytes();
    let len = bytes.len().min(width.saturating_sub(1));
    buf.extend_from_slice(&bytes[..len]);
    buf.resize(buf.len() + (width - len), 0);
}

/// Split `bytes` into `record_size` chunks, rejecting a ragged tail.
fn records(bytes: &[u8], record_size: usize) -> Result<std::slice::ChunksExact<'_, u8>> {
    if bytes.len() % record_size != 0 {
        return Err(Error::RecordSize { expected: record_size, found: bytes.len() });
    }
    Ok(bytes.chunks_exact(record_size))
}

/// Sequential little-endian reader over one record whose length was checked up front.
struct LeReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> LeReader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        LeReader { buf, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn i32(&mut self) -> i32 {
        i32::from_le_bytes(self.take())
    }

    fn f64(&mut self) -> f64 {
        f64::from_le_bytes(self.take())
    }

    fn u8(&mut self) -> u8 {
        self.take::<1>()[0]
    }

    /// Fixed-width string field, read up to the first NUL.
    fn fixed_str(&mut self, width: usize) -> String {
        let field = &self.buf[self.pos..self.pos + width];
        self.pos += width;
        let end = field.iter().position(|&b| b == 0).unwrap_or(width);
        String::from_utf8_lossy(&field[..end]).into_owned()
    }
}
