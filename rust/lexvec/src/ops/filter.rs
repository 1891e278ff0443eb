use lexvec_common::Result;

use crate::format::{LexVector, MAX_NUM_POS, VectorWriter, WeightMask};

/// Keeps only the positions whose weight class is in `weights`.
///
/// A lexeme with no surviving position is dropped, and so is every lexeme
/// stored without positions. The relative order of lexemes is unchanged.
pub fn filter_by_weight(vector: &LexVector, weights: WeightMask) -> Result<LexVector> {
    let mut writer = VectorWriter::with_capacity(vector.len(), vector.data_len());
    let mut kept = Vec::with_capacity(MAX_NUM_POS);
    for entry in vector {
        let Some(positions) = entry.positions else {
            continue;
        };
        kept.clear();
        kept.extend(positions.iter().filter(|&pos| weights.accepts(pos)));
        if kept.is_empty() {
            continue;
        }
        writer.push_entry(entry.lexeme, kept.iter().copied())?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{VectorBuilder, Weight};

    fn sample() -> LexVector {
        let mut builder = VectorBuilder::new();
        builder.add_position("cat", 1, Weight::A).unwrap();
        builder.add_position("cat", 2, Weight::D).unwrap();
        builder.add_position("dog", 3, Weight::B).unwrap();
        builder.add_position("eel", 4, Weight::D).unwrap();
        builder.add_lexeme("fox").unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_filter_by_weight() {
        let vector = sample();
        let filtered = filter_by_weight(&vector, WeightMask::A | WeightMask::B).unwrap();
        assert_eq!(filtered.to_string(), "'cat':1A 'dog':3B");

        let filtered = filter_by_weight(&vector, WeightMask::D).unwrap();
        assert_eq!(filtered.to_string(), "'cat':2 'eel':4");
    }

    #[test]
    fn test_filter_drops_positionless_and_empty() {
        let vector = sample();
        assert!(filter_by_weight(&vector, WeightMask::C).unwrap().is_empty());
        let full = filter_by_weight(&vector, WeightMask::all()).unwrap();
        assert_eq!(full.len(), 3);
        assert!(crate::search::find(&full, b"fox").is_none());
    }
}
