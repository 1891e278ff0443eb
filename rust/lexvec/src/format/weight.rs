//! Weight classes and packed positions.

use bitflags::bitflags;
use lexvec_common::{Result, error::Error};
use serde::{Deserialize, Serialize};

use super::MAX_ENTRY_POS;

/// One of the four weight classes attached to a lexeme occurrence.
///
/// The numeric class is what gets stored in the top two bits of a packed
/// position; `A` is the highest class and `D` (the default) the lowest.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weight {
    #[default]
    D = 0,
    C = 1,
    B = 2,
    A = 3,
}

impl Weight {
    pub const ALL: [Weight; 4] = [Weight::A, Weight::B, Weight::C, Weight::D];

    /// The 2-bit class stored in the packed position.
    pub const fn class(self) -> u8 {
        self as u8
    }

    /// Maps a stored 2-bit class back to its weight.
    pub fn from_class(class: u8) -> Result<Weight> {
        match class {
            0 => Ok(Weight::D),
            1 => Ok(Weight::C),
            2 => Ok(Weight::B),
            3 => Ok(Weight::A),
            _ => Err(Error::invalid_arg(
                "weight",
                format!("unrecognized weight class: {class}"),
            )),
        }
    }

    /// The external label of the class.
    pub const fn letter(self) -> char {
        match self {
            Weight::A => 'A',
            Weight::B => 'B',
            Weight::C => 'C',
            Weight::D => 'D',
        }
    }

    /// A mask selecting this class only.
    pub const fn mask(self) -> WeightMask {
        WeightMask::from_bits_truncate(1 << self.class())
    }
}

impl TryFrom<char> for Weight {
    type Error = Error;

    fn try_from(letter: char) -> Result<Self> {
        match letter {
            'A' | 'a' => Ok(Weight::A),
            'B' | 'b' => Ok(Weight::B),
            'C' | 'c' => Ok(Weight::C),
            'D' | 'd' => Ok(Weight::D),
            _ => Err(Error::invalid_arg(
                "weight",
                format!("unrecognized weight: \"{letter}\""),
            )),
        }
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

bitflags! {
    /// Set of weight classes, bit `n` standing for class `n`.
    ///
    /// An empty mask on a query operand means "any weight".
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct WeightMask: u8 {
        const D = 1;
        const C = 1 << 1;
        const B = 1 << 2;
        const A = 1 << 3;
    }
}

impl WeightMask {
    /// Builds a mask from weight letters, e.g. `"ab"`.
    pub fn from_letters(letters: &str) -> Result<WeightMask> {
        letters.chars().try_fold(WeightMask::empty(), |mask, letter| {
            Ok(mask | Weight::try_from(letter)?.mask())
        })
    }

    /// Returns `true` if the class of `pos` is selected by this mask.
    #[inline]
    pub fn accepts(self, pos: WordPos) -> bool {
        self.bits() & (1 << pos.class()) != 0
    }
}

impl From<Weight> for WeightMask {
    fn from(weight: Weight) -> Self {
        weight.mask()
    }
}

/// A position and its weight class packed into 16 bits: `class << 14 | pos`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct WordPos(u16);

impl WordPos {
    const POS_MASK: u16 = MAX_ENTRY_POS - 1;
    const WEIGHT_SHIFT: u32 = 14;

    /// Packs `pos` (truncated to 14 bits) with `weight`.
    #[inline]
    pub const fn new(pos: u16, weight: Weight) -> WordPos {
        WordPos((weight.class() as u16) << Self::WEIGHT_SHIFT | (pos & Self::POS_MASK))
    }

    #[inline]
    pub const fn from_bits(bits: u16) -> WordPos {
        WordPos(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    /// Position value.
    #[inline]
    pub const fn pos(self) -> u16 {
        self.0 & Self::POS_MASK
    }

    /// Stored 2-bit weight class.
    #[inline]
    pub const fn class(self) -> u8 {
        (self.0 >> Self::WEIGHT_SHIFT) as u8
    }

    #[inline]
    pub fn weight(self) -> Weight {
        match self.class() {
            3 => Weight::A,
            2 => Weight::B,
            1 => Weight::C,
            _ => Weight::D,
        }
    }

    #[inline]
    pub const fn with_weight(self, weight: Weight) -> WordPos {
        WordPos::new(self.pos(), weight)
    }

    #[inline]
    pub const fn with_pos(self, pos: u16) -> WordPos {
        WordPos((self.0 & !Self::POS_MASK) | (pos & Self::POS_MASK))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_letters() {
        assert_eq!(Weight::try_from('a').unwrap(), Weight::A);
        assert_eq!(Weight::try_from('D').unwrap(), Weight::D);
        assert!(Weight::try_from('x').unwrap_err().is_invalid_arg());
        assert_eq!(Weight::B.to_string(), "B");
        assert!(Weight::from_class(4).is_err());
        for weight in Weight::ALL {
            assert_eq!(Weight::from_class(weight.class()).unwrap(), weight);
        }
    }

    #[test]
    fn test_weight_mask() {
        let mask = WeightMask::from_letters("aC").unwrap();
        assert_eq!(mask, WeightMask::A | WeightMask::C);
        assert_eq!(mask.bits(), 8 | 2);
        assert!(mask.accepts(WordPos::new(1, Weight::A)));
        assert!(!mask.accepts(WordPos::new(1, Weight::D)));
        assert!(WeightMask::from_letters("ax").is_err());
        assert!(WeightMask::from_letters("").unwrap().is_empty());
    }

    #[test]
    fn test_word_pos_packing() {
        let pos = WordPos::new(16383, Weight::A);
        assert_eq!(pos.to_bits(), 0xffff);
        assert_eq!(pos.pos(), 16383);
        assert_eq!(pos.weight(), Weight::A);

        let pos = WordPos::new(5, Weight::D);
        assert_eq!(pos.to_bits(), 5);
        let pos = pos.with_weight(Weight::B);
        assert_eq!(pos.to_bits(), 0x8005);
        assert_eq!(pos.with_pos(9).pos(), 9);
        assert_eq!(pos.with_pos(9).weight(), Weight::B);
    }
}
