use lexvec_common::Result;

use crate::format::{LexVector, POS_SIZE, Weight, WordPos};
use crate::search::find;

/// Assigns `weight` to every position in the vector.
pub fn set_weight(vector: &LexVector, weight: Weight) -> LexVector {
    let mut result = vector.clone();
    for index in 0..result.len() {
        reweight(&mut result, index, weight);
    }
    result
}

/// Assigns `weight` to the positions of the listed lexemes only. Lexemes
/// missing from the vector are ignored.
pub fn set_weight_of<I, L>(vector: &LexVector, weight: Weight, lexemes: I) -> LexVector
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let mut result = vector.clone();
    for lexeme in lexemes {
        if let Some(index) = find(&result, lexeme.as_ref()) {
            reweight(&mut result, index, weight);
        }
    }
    result
}

/// Like [`set_weight`] / [`set_weight_of`], with the weight given by its
/// letter. An unrecognized letter fails before anything is copied.
pub fn set_weight_by_letter<L: AsRef<[u8]>>(
    vector: &LexVector,
    letter: char,
    lexemes: Option<&[L]>,
) -> Result<LexVector> {
    let weight = Weight::try_from(letter)?;
    Ok(match lexemes {
        Some(lexemes) => set_weight_of(vector, weight, lexemes),
        None => set_weight(vector, weight),
    })
}

fn reweight(vector: &mut LexVector, index: usize, weight: Weight) {
    let Some(units) = vector.positions_mut(index) else {
        return;
    };
    for unit in units.chunks_exact_mut(POS_SIZE) {
        let pos = WordPos::from_bits(u16::from_le_bytes([unit[0], unit[1]])).with_weight(weight);
        unit.copy_from_slice(&pos.to_bits().to_le_bytes());
    }
}
