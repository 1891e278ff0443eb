use lexvec_common::{Result, error::Error};

use crate::format::{LexVector, PositionSlice, VectorWriter};
use crate::search::find;

/// Removes the entries at `indices` along with their positions.
///
/// Indices may repeat and come in any order; every index must be below
/// `vector.len()`.
pub fn delete_by_indices(vector: &LexVector, indices: &[usize]) -> Result<LexVector> {
    let mut indices = indices.to_vec();
    indices.sort_unstable();
    indices.dedup();
    if let Some(&last) = indices.last() {
        if last >= vector.len() {
            return Err(Error::invalid_arg(
                "indices",
                format!("index {last} is out of range for {} lexemes", vector.len()),
            ));
        }
    }

    let mut writer =
        VectorWriter::with_capacity(vector.len() - indices.len(), vector.data_len());
    let mut skip = indices.into_iter().peekable();
    for entry in vector {
        if skip.next_if_eq(&entry.index).is_some() {
            continue;
        }
        writer.push_entry(
            entry.lexeme,
            entry.positions.into_iter().flat_map(PositionSlice::iter),
        )?;
    }
    writer.finish()
}

/// Removes `lexeme`; a vector without it is returned unchanged.
pub fn delete_lexeme(vector: &LexVector, lexeme: &[u8]) -> Result<LexVector> {
    match find(vector, lexeme) {
        Some(index) => delete_by_indices(vector, &[index]),
        None => Ok(vector.clone()),
    }
}

/// Removes every listed lexeme that is present; absent ones are ignored.
pub fn delete_lexemes<I, L>(vector: &LexVector, lexemes: I) -> Result<LexVector>
where
    I: IntoIterator<Item = L>,
    L: AsRef<[u8]>,
{
    let indices: Vec<usize> = lexemes
        .into_iter()
        .filter_map(|lexeme| find(vector, lexeme.as_ref()))
        .collect();
    if indices.is_empty() {
        return Ok(vector.clone());
    }
    delete_by_indices(vector, &indices)
}
