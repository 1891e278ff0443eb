//! Lexeme lookup and position collection.
//!
//! Exact lookups are binary searches over the sorted entry array. Prefix
//! lookups continue from the insertion point of the binary search: every
//! lexeme that starts with the prefix sorts at or after the prefix itself and
//! the run of such lexemes is contiguous.

use crate::compare::compare_lexeme;
use crate::format::{LexVector, PositionSlice, WeightMask};
use crate::query::QueryOperand;

/// Finds the entry index of `lexeme`, if present.
pub fn find(vector: &LexVector, lexeme: &[u8]) -> Option<usize> {
    search(vector, lexeme).ok()
}

/// Binary search for `lexeme`: `Ok(index)` of the equal entry, or
/// `Err(index)` of the position where it would be inserted.
pub fn search(vector: &LexVector, lexeme: &[u8]) -> Result<usize, usize> {
    let mut low = 0;
    let mut high = vector.len();
    while low < high {
        let middle = low + (high - low) / 2;
        match compare_lexeme(lexeme, vector.lexeme(middle), false) {
            std::cmp::Ordering::Less => high = middle,
            std::cmp::Ordering::Greater => low = middle + 1,
            std::cmp::Ordering::Equal => return Ok(middle),
        }
    }
    Err(low)
}

/// Position values collected for a query operand.
///
/// When a single entry matched without weight filtering the list borrows
/// the vector's own position units; merged or filtered lists are owned.
#[derive(Debug, Clone)]
pub enum MatchPositions<'a> {
    Borrowed(PositionSlice<'a>),
    Owned(Vec<u16>),
}

impl<'a> MatchPositions<'a> {
    pub fn empty() -> Self {
        MatchPositions::Owned(Vec::new())
    }

    pub fn len(&self) -> usize {
        match self {
            MatchPositions::Borrowed(slice) => slice.len(),
            MatchPositions::Owned(positions) => positions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position value (weight stripped) at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> u16 {
        match self {
            MatchPositions::Borrowed(slice) => slice.get(index).pos(),
            MatchPositions::Owned(positions) => positions[index],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        (0..self.len()).map(move |index| self.get(index))
    }

    pub fn to_vec(&self) -> Vec<u16> {
        self.iter().collect()
    }
}

impl Default for MatchPositions<'_> {
    fn default() -> Self {
        MatchPositions::empty()
    }
}

impl From<Vec<u16>> for MatchPositions<'_> {
    fn from(positions: Vec<u16>) -> Self {
        MatchPositions::Owned(positions)
    }
}

/// Outcome of evaluating one operand (or a phrase) against a vector.
///
/// `matched` can be `true` with no positions: an entry stored without
/// positions satisfies weight and phrase constraints by default.
#[derive(Debug, Clone, Default)]
pub struct OperandMatch<'a> {
    pub matched: bool,
    pub positions: MatchPositions<'a>,
}

impl<'a> OperandMatch<'a> {
    pub fn no_match() -> Self {
        Default::default()
    }

    /// A match without position information.
    pub fn matched() -> Self {
        OperandMatch {
            matched: true,
            positions: MatchPositions::empty(),
        }
    }
}

/// Looks up `operand` in `vector`.
///
/// With `need_positions == false` only the boolean outcome is computed and
/// scanning stops at the first satisfying entry. Otherwise the positions of
/// the matching entry (or, for a prefix operand, the sorted and
/// de-duplicated union over all matching entries) are returned, filtered by
/// the operand's weight mask.
pub fn match_operand<'a>(
    vector: &'a LexVector,
    operand: &QueryOperand,
    need_positions: bool,
) -> OperandMatch<'a> {
    let lexeme = operand.lexeme.as_bytes();
    let (exact, start) = match search(vector, lexeme) {
        Ok(index) => (
            check_entry(vector, index, operand.weights, need_positions),
            index,
        ),
        Err(index) => (OperandMatch::no_match(), index),
    };

    if !operand.prefix || (exact.matched && !need_positions) {
        return exact;
    }

    let mut matched = false;
    let mut collected = Vec::new();
    for index in start..vector.len() {
        if compare_lexeme(lexeme, vector.lexeme(index), true).is_ne() {
            break;
        }
        let entry = check_entry(vector, index, operand.weights, need_positions);
        if entry.matched {
            matched = true;
            if !need_positions {
                break;
            }
            collected.extend(entry.positions.iter());
        }
    }

    // two lexemes sharing a prefix may occupy the same position
    collected.sort_unstable();
    collected.dedup();
    OperandMatch {
        matched,
        positions: MatchPositions::Owned(collected),
    }
}

/// Applies the weight filter to one entry and collects its positions.
fn check_entry(
    vector: &LexVector,
    index: usize,
    weights: WeightMask,
    need_positions: bool,
) -> OperandMatch<'_> {
    let Some(positions) = vector.positions(index) else {
        return OperandMatch::matched();
    };

    match (weights.is_empty(), need_positions) {
        (true, false) => OperandMatch::matched(),
        (true, true) => OperandMatch {
            matched: true,
            positions: MatchPositions::Borrowed(positions),
        },
        (false, false) => OperandMatch {
            matched: positions.iter().any(|pos| weights.accepts(pos)),
            positions: MatchPositions::empty(),
        },
        (false, true) => {
            let filtered: Vec<u16> = positions
                .iter()
                .filter(|&pos| weights.accepts(pos))
                .map(|pos| pos.pos())
                .collect();
            OperandMatch {
                matched: !filtered.is_empty(),
                positions: MatchPositions::Owned(filtered),
            }
        }
    }
}
