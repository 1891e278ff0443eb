//! Binary layout of a lexeme vector.
//!
//! An encoded vector is a single little-endian byte buffer:
//!
//! ```text
//! +------------+-------------+---------------------+-----------------------+
//! | size: u32  | count: u32  | entries: count x u32 | data area             |
//! +------------+-------------+---------------------+-----------------------+
//! ```
//!
//! Each entry packs three fields into one `u32`: bit 0 is the "has positions"
//! flag, bits 1..=11 hold the lexeme length and bits 12..=31 hold the byte
//! offset of the lexeme within the data area. When an entry has positions,
//! a `u16` position count followed by that many packed [`WordPos`] units is
//! stored right after the lexeme bytes, at the next 2-byte aligned offset.
//!
//! Entries are strictly ascending by [`compare_lexeme`](crate::compare_lexeme),
//! so lookups are binary searches over the entry array.

mod builder;
mod entry;
mod vector;
mod weight;
mod writer;

pub use builder::VectorBuilder;
pub use entry::LexemeEntry;
pub use vector::{Entries, EntryRef, LexVector, PositionSlice};
pub use weight::{Weight, WeightMask, WordPos};

pub(crate) use writer::VectorWriter;

/// Size of the fixed header: total size followed by the entry count.
pub const HEADER_SIZE: usize = 8;

/// Size of a single packed entry.
pub const ENTRY_SIZE: usize = 4;

/// Size of the position count that precedes a position list.
pub const POS_COUNT_SIZE: usize = 2;

/// Size of one packed position unit.
pub const POS_SIZE: usize = 2;

/// Longest lexeme, in bytes, that fits the 11-bit length field.
pub const MAX_LEXEME_LEN: usize = (1 << 11) - 1;

/// Largest data area offset addressable by the 20-bit offset field.
pub const MAX_STRING_POS: usize = (1 << 20) - 1;

/// Exclusive upper bound of position values (14 bits).
pub const MAX_ENTRY_POS: u16 = 1 << 14;

/// Maximum number of positions kept per lexeme.
pub const MAX_NUM_POS: usize = 256;

/// Rounds `n` up to the next even offset.
#[inline]
pub const fn short_align(n: usize) -> usize {
    (n + 1) & !1
}

/// Clamps a position value to the largest representable position.
#[inline]
pub const fn limit_pos(pos: u32) -> u16 {
    if pos >= MAX_ENTRY_POS as u32 {
        MAX_ENTRY_POS - 1
    } else {
        pos as u16
    }
}

/// Computes the encoded size of a vector with `count` entries and a data
/// area of `data_len` bytes.
#[inline]
pub const fn encoded_size(count: usize, data_len: usize) -> usize {
    HEADER_SIZE + count * ENTRY_SIZE + data_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_align() {
        assert_eq!(short_align(0), 0);
        assert_eq!(short_align(1), 2);
        assert_eq!(short_align(2), 2);
        assert_eq!(short_align(7), 8);
    }

    #[test]
    fn test_limit_pos() {
        assert_eq!(limit_pos(1), 1);
        assert_eq!(limit_pos(16383), 16383);
        assert_eq!(limit_pos(16384), 16383);
        assert_eq!(limit_pos(u32::MAX), 16383);
    }
}
