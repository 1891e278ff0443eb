use super::{MAX_LEXEME_LEN, MAX_STRING_POS};

/// Fixed-size descriptor of one lexeme, as stored in the entry array.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct LexemeEntry {
    /// Whether a position list follows the lexeme bytes.
    pub has_positions: bool,
    /// Lexeme length in bytes.
    pub len: usize,
    /// Offset of the lexeme bytes within the data area.
    pub offset: usize,
}

impl LexemeEntry {
    const LEN_SHIFT: u32 = 1;
    const OFFSET_SHIFT: u32 = 12;

    /// Unpacks an entry from its stored `u32` form.
    #[inline]
    pub const fn from_bits(bits: u32) -> LexemeEntry {
        LexemeEntry {
            has_positions: bits & 1 != 0,
            len: ((bits >> Self::LEN_SHIFT) as usize) & MAX_LEXEME_LEN,
            offset: (bits >> Self::OFFSET_SHIFT) as usize,
        }
    }

    /// Packs the entry. Callers guarantee `len` and `offset` fit their fields.
    #[inline]
    pub fn to_bits(&self) -> u32 {
        debug_assert!(self.len <= MAX_LEXEME_LEN);
        debug_assert!(self.offset <= MAX_STRING_POS);
        (self.has_positions as u32)
            | ((self.len as u32) << Self::LEN_SHIFT)
            | ((self.offset as u32) << Self::OFFSET_SHIFT)
    }

    /// End of the lexeme bytes within the data area.
    #[inline]
    pub const fn lexeme_end(&self) -> usize {
        self.offset + self.len
    }
}
