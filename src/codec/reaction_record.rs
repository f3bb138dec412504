//! Packed reaction record.
//!
//! Layout (little-endian, no padding, 397 bytes):
//!
//! ```text
//! offset  size  field
//!      0     4  chapter        i32
//!      4     8  q_value        f64 (MeV)
//!     12    56  a0..a6         7 × f64
//!     68     1  reverse        u8 (0/1)
//!     69     8  label          NUL-terminated
//!     77    64  rp_name        NUL-terminated
//!    141   128  reactants      space-joined canonical names, NUL-terminated
//!    269   128  products       space-joined canonical names, NUL-terminated
//! ```

use super::{LeReader, put_fixed_str, records};
use crate::engine::canonical_name;
use crate::{Error, RateCoefficients, Reaction, Result};
use bytes::Bytes;
use std::io::Write;

pub const REACTION_RECORD_SIZE: usize = 397;

const LABEL_WIDTH: usize = 8;
const KEY_WIDTH: usize = 64;
const SPECIES_WIDTH: usize = 128;

/// The on-disk view of a [`Reaction`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRecord {
    pub chapter: i32,
    pub q_value: f64,
    pub coeffs: RateCoefficients,
    pub reverse: bool,
    pub label: String,
    pub rp_name: String,
    /// Space-joined canonical reactant names, e.g. `H-1 C-12`.
    pub reactants: String,
    pub products: String,
}

impl ReactionRecord {
    pub fn from_reaction(reaction: &Reaction) -> Result<Self> {
        Ok(ReactionRecord {
            chapter: i32::from(reaction.chapter.get()),
            q_value: reaction.q_value,
            coeffs: reaction.coeffs,
            reverse: reaction.reverse,
            label: reaction.label.clone(),
            rp_name: reaction.rp_name.clone(),
            reactants: joined_canonical(&reaction.reactants)?,
            products: joined_canonical(&reaction.products)?,
        })
    }

    pub fn encode(&self) -> Bytes {
        let mut buf = Vec::with_capacity(REACTION_RECORD_SIZE);
        buf.extend_from_slice(&self.chapter.to_le_bytes());
        buf.extend_from_slice(&self.q_value.to_le_bytes());
        for c in self.coeffs {
            buf.extend_from_slice(&c.to_le_bytes());
        }
        buf.push(u8::from(self.reverse));
        put_fixed_str(&mut buf, &self.label, LABEL_WIDTH);
        put_fixed_str(&mut buf, &self.rp_name, KEY_WIDTH);
        put_fixed_str(&mut buf, &self.reactants, SPECIES_WIDTH);
        put_fixed_str(&mut buf, &self.products, SPECIES_WIDTH);
        debug_assert_eq!(buf.len(), REACTION_RECORD_SIZE);
        Bytes::from(buf)
    }

    /// Decode exactly one record. Any non-zero reverse byte reads as `true`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != REACTION_RECORD_SIZE {
            return Err(Error::RecordSize { expected: REACTION_RECORD_SIZE, found: bytes.len() });
        }

        let mut r = LeReader::new(bytes);
        let chapter = r.i32();
        let q_value = r.f64();
        let mut coeffs: RateCoefficients = [0.0; 7];
        for slot in &mut coeffs {
            *slot = r.f64();
        }

        Ok(ReactionRecord {
            chapter,
            q_value,
            coeffs,
            reverse: r.u8() != 0,
            label: r.fixed_str(LABEL_WIDTH),
            rp_name: r.fixed_str(KEY_WIDTH),
            reactants: r.fixed_str(SPECIES_WIDTH),
            products: r.fixed_str(SPECIES_WIDTH),
        })
    }
}

fn joined_canonical(tokens: &[String]) -> Result<String> {
    let names = tokens.iter().map(|t| canonical_name(t)).collect::<Result<Vec<_>>>()?;
    Ok(names.join(" "))
}

/// Encode `reactions` back to back and write them in one call.
///
/// Nothing is written if any reaction fails to convert. Returns the record count.
pub fn write_reactions<W: Write>(writer: &mut W, reactions: &[Reaction]) -> Result<usize> {
    let mut out = Vec::with_capacity(reactions.len() * REACTION_RECORD_SIZE);
    for reaction in reactions {
        out.extend_from_slice(&ReactionRecord::from_reaction(reaction)?.encode());
    }
    writer.write_all(&out)?;
    writer.flush()?;
    tracing::debug!(records = reactions.len(), bytes = out.len(), "wrote reaction records");
    Ok(reactions.len())
}

/// Decode a buffer of back-to-back reaction records.
pub fn read_reactions(bytes: &[u8]) -> Result<Vec<ReactionRecord>> {
    records(bytes, REACTION_RECORD_SIZE)?.map(ReactionRecord::decode).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Chapter, ParsedRecord, SpeciesCatalog, build_reaction};

    fn c12_pg(reverse: bool) -> Reaction {
        let record = ParsedRecord {
            line: 1,
            chapter: Chapter::new(4).unwrap(),
            species_group: "p c12 n13".to_string(),
            label: "ls09".to_string(),
            q_value: 1.943,
            coeffs: [17.1482, 0.0, -13.692, -0.230881, 4.44362, -3.15898, -0.666667],
            reverse,
        };
        build_reaction(&record, &SpeciesCatalog::builtin()).unwrap()
    }

    #[test]
    fn record_is_397_bytes_with_fields_at_fixed_offsets() {
        let bytes = ReactionRecord::from_reaction(&c12_pg(false)).unwrap().encode();
        assert_eq!(bytes.len(), REACTION_RECORD_SIZE);
        assert_eq!(&bytes[0..4], &4i32.to_le_bytes());
        assert_eq!(&bytes[4..12], &1.943f64.to_le_bytes());
        assert_eq!(bytes[68], 0);
        assert_eq!(&bytes[69..74], b"ls09\0");
        assert_eq!(&bytes[77..88], b"c12(p,g)n13");
        assert_eq!(&bytes[141..150], b"H-1 C-12\0");
        assert_eq!(&bytes[269..274], b"N-13\0");
    }

    #[test]
    fn decode_restores_numeric_fields_exactly() {
        let reaction = c12_pg(true);
        let decoded = ReactionRecord::decode(&ReactionRecord::from_reaction(&reaction).unwrap().encode()).unwrap();

        assert_eq!(decoded.chapter, 4);
        assert_eq!(decoded.q_value.to_bits(), reaction.q_value.to_bits());
        for (a, b) in decoded.coeffs.iter().zip(reaction.coeffs.iter()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
        assert!(decoded.reverse);
        assert_eq!(decoded.reactants, "N-13");
        assert_eq!(decoded.products, "H-1 C-12");
    }

    #[test]
    fn long_strings_are_truncated() {
        let mut record = ReactionRecord::from_reaction(&c12_pg(false)).unwrap();
        record.label = "abcdefghijk".to_string();
        record.rp_name = "x".repeat(100);
        let decoded = ReactionRecord::decode(&record.encode()).unwrap();
        assert_eq!(decoded.label, "abcdefg");
        assert_eq!(decoded.rp_name.len(), KEY_WIDTH - 1);
    }

    #[test]
    fn batch_write_and_read() {
        let reactions = vec![c12_pg(false), c12_pg(true)];
        let mut out = Vec::new();
        assert_eq!(write_reactions(&mut out, &reactions).unwrap(), 2);
        assert_eq!(out.len(), 2 * REACTION_RECORD_SIZE);

        let back = read_reactions(&out).unwrap();
        assert_eq!(back.len(), 2);
        assert!(!back[0].reverse);
        assert!(back[1].reverse);

        let err = read_reactions(&out[..REACTION_RECORD_SIZE + 3]).unwrap_err();
        assert!(matches!(err, Error::RecordSize { .. }));
    }

    #[test]
    fn failed_conversion_writes_nothing() {
        let mut broken = c12_pg(false);
        broken.reactants = vec!["??".to_string()];
        let reactions = vec![c12_pg(false), broken];

        let mut out = Vec::new();
        let err = write_reactions(&mut out, &reactions).unwrap_err();
        assert!(matches!(err, Error::SpeciesResolution { ref token, .. } if token == "??"));
        assert!(out.is_empty());
    }
}
