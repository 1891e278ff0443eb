use lexvec_common::Result;

use crate::format::{LexVector, VectorWriter};

/// Drops all position information, keeping only the lexemes.
pub fn strip(vector: &LexVector) -> Result<LexVector> {
    let data_len = vector.lexemes().map(<[u8]>::len).sum();
    let mut writer = VectorWriter::with_capacity(vector.len(), data_len);
    for lexeme in vector.lexemes() {
        writer.push_lexeme(lexeme)?;
    }
    writer.finish()
}
