//! Encoding of producer output into a vector.

use std::collections::BTreeMap;

use lexvec_common::{Result, error::Error, verify_arg};

use super::{
    LexVector, MAX_LEXEME_LEN, MAX_NUM_POS, VectorWriter, Weight, WordPos, limit_pos,
};

/// Collects `(lexeme, position, weight)` occurrences produced by a text
/// parser and encodes them as a [`LexVector`].
///
/// Lexemes may arrive in any order and repeat. On [`build`](Self::build)
/// each lexeme's positions are sorted, clamped to the largest representable
/// position and de-duplicated (a repeated position keeps its highest
/// weight); lists longer than [`MAX_NUM_POS`] are truncated silently.
#[derive(Debug, Default, Clone)]
pub struct VectorBuilder {
    words: BTreeMap<Vec<u8>, Vec<WordPos>>,
}

impl VectorBuilder {
    pub fn new() -> VectorBuilder {
        Default::default()
    }

    /// Builds a position-less vector from a list of lexemes, dropping
    /// duplicates.
    pub fn from_lexemes<I, L>(lexemes: I) -> Result<LexVector>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut builder = VectorBuilder::new();
        for lexeme in lexemes {
            builder.add_lexeme(lexeme)?;
        }
        builder.build()
    }

    /// Records `lexeme` without adding a position.
    pub fn add_lexeme(&mut self, lexeme: impl AsRef<[u8]>) -> Result<&mut Self> {
        let lexeme = lexeme.as_ref();
        check_lexeme(lexeme)?;
        self.words.entry(lexeme.to_vec()).or_default();
        Ok(self)
    }

    /// Records an occurrence of `lexeme` at `position` (1-based).
    pub fn add_position(
        &mut self,
        lexeme: impl AsRef<[u8]>,
        position: u32,
        weight: Weight,
    ) -> Result<&mut Self> {
        let lexeme = lexeme.as_ref();
        check_lexeme(lexeme)?;
        verify_arg!(position, position > 0);
        let pos = WordPos::new(limit_pos(position), weight);
        match self.words.get_mut(lexeme) {
            Some(positions) => positions.push(pos),
            None => {
                self.words.insert(lexeme.to_vec(), vec![pos]);
            }
        }
        Ok(self)
    }

    /// Number of distinct lexemes collected so far.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn build(self) -> Result<LexVector> {
        let data_len = self
            .words
            .iter()
            .map(|(lexeme, positions)| {
                VectorWriter::data_bound(lexeme.len(), positions.len().min(MAX_NUM_POS))
            })
            .sum();
        let mut writer = VectorWriter::with_capacity(self.words.len(), data_len);
        // BTreeMap orders byte strings exactly as `compare_lexeme` does.
        for (lexeme, mut positions) in self.words {
            unique_positions(&mut positions);
            writer.push_entry(&lexeme, positions)?;
        }
        writer.finish()
    }
}

fn check_lexeme(lexeme: &[u8]) -> Result<()> {
    if lexeme.len() > MAX_LEXEME_LEN {
        return Err(Error::invalid_arg(
            "lexeme",
            format!(
                "word is too long ({} bytes, max {MAX_LEXEME_LEN} bytes)",
                lexeme.len()
            ),
        ));
    }
    Ok(())
}

/// Sorts by position, collapses equal positions to the highest weight and
/// truncates to the per-lexeme cap.
fn unique_positions(positions: &mut Vec<WordPos>) {
    positions.sort_unstable_by_key(|pos| (pos.pos(), std::cmp::Reverse(pos.class())));
    positions.dedup_by_key(|pos| pos.pos());
    positions.truncate(MAX_NUM_POS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MAX_ENTRY_POS;

    #[test]
    fn test_builder_sorts_and_merges() {
        let mut builder = VectorBuilder::new();
        builder.add_position("fat", 2, Weight::D).unwrap();
        builder.add_position("cat", 3, Weight::D).unwrap();
        builder.add_position("fat", 1, Weight::B).unwrap();
        builder.add_position("fat", 2, Weight::A).unwrap();
        builder.add_lexeme("a").unwrap();
        builder.add_lexeme("cat").unwrap();
        assert_eq!(builder.len(), 3);

        let vector = builder.build().unwrap();
        assert_eq!(vector.to_string(), "'a' 'cat':3 'fat':1B,2A");
    }

    #[test]
    fn test_builder_clamps_and_caps() {
        let mut builder = VectorBuilder::new();
        for pos in 1..=300 {
            builder.add_position("many", pos, Weight::D).unwrap();
        }
        builder.add_position("far", 20000, Weight::C).unwrap();
        builder.add_position("far", 30000, Weight::D).unwrap();
        let vector = builder.build().unwrap();

        let far = vector.positions(0).unwrap();
        assert_eq!(far.len(), 1);
        assert_eq!(far.get(0), WordPos::new(MAX_ENTRY_POS - 1, Weight::C));

        let many = vector.positions(1).unwrap();
        assert_eq!(many.len(), MAX_NUM_POS);
        assert_eq!(many.last().unwrap().pos(), MAX_NUM_POS as u16);
    }

    #[test]
    fn test_builder_rejects_bad_input() {
        let mut builder = VectorBuilder::new();
        assert!(builder.add_position("x", 0, Weight::D).unwrap_err().is_invalid_arg());
        let long = "y".repeat(MAX_LEXEME_LEN + 1);
        assert!(builder.add_lexeme(&long).unwrap_err().is_invalid_arg());
        assert!(builder.is_empty());
    }

    #[test]
    fn test_from_lexemes() {
        let vector = VectorBuilder::from_lexemes(["b", "a", "b", ""]).unwrap();
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.lexeme(0), b"");
        assert_eq!(vector.lexeme(1), b"a");
        assert!(vector.iter().all(|entry| !entry.has_positions()));
    }
}
