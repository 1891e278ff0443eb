use itertools::{EitherOrBoth, Itertools};
use lexvec_common::Result;

use crate::compare::compare_lexeme;
use crate::format::{
    LexVector, MAX_ENTRY_POS, MAX_NUM_POS, PositionSlice, VectorWriter, WordPos, limit_pos,
};

/// Concatenates two documents' vectors.
///
/// Every position of `second` is shifted past the largest position of
/// `first`, so phrase matches can span the boundary but never run backwards
/// across it. Lexemes present in both inputs get `first`'s positions
/// followed by as many shifted positions of `second` as fit: a list stops
/// growing at [`MAX_NUM_POS`] entries or once it reaches the largest
/// representable position, and further positions are dropped.
///
/// Fails with a resource-limit error, producing nothing, if the merged data
/// area exceeds the addressable size.
pub fn concat(first: &LexVector, second: &LexVector) -> Result<LexVector> {
    let maxpos = first.max_position();
    // one alignment pad per entry on top of both inputs' data
    let data_bound = first.data_len() + second.data_len() + first.len() + second.len();
    let mut writer = VectorWriter::with_capacity(first.len() + second.len(), data_bound);
    let mut merged = Vec::with_capacity(MAX_NUM_POS);

    let pairs = first
        .iter()
        .merge_join_by(second.iter(), |a, b| compare_lexeme(a.lexeme, b.lexeme, false));
    for pair in pairs {
        merged.clear();
        let lexeme = match pair {
            EitherOrBoth::Left(a) => {
                merged.extend(a.positions.into_iter().flat_map(PositionSlice::iter));
                a.lexeme
            }
            EitherOrBoth::Right(b) => {
                append_shifted(&mut merged, b.positions, maxpos, b.lexeme);
                b.lexeme
            }
            EitherOrBoth::Both(a, b) => {
                merged.extend(a.positions.into_iter().flat_map(PositionSlice::iter));
                append_shifted(&mut merged, b.positions, maxpos, b.lexeme);
                a.lexeme
            }
        };
        writer.push_entry(lexeme, merged.iter().copied())?;
    }
    writer.finish()
}

/// Appends `source` shifted by `maxpos`, saturating at the position and
/// list-length limits.
fn append_shifted(
    dest: &mut Vec<WordPos>,
    source: Option<PositionSlice<'_>>,
    maxpos: u16,
    lexeme: &[u8],
) {
    let Some(source) = source else {
        return;
    };
    let mut added = 0;
    for pos in source.iter() {
        let saturated = dest
            .last()
            .is_some_and(|last| last.pos() == MAX_ENTRY_POS - 1);
        if dest.len() >= MAX_NUM_POS || saturated {
            break;
        }
        dest.push(pos.with_pos(limit_pos(pos.pos() as u32 + maxpos as u32)));
        added += 1;
    }
    if added < source.len() {
        log::debug!(
            "concat dropped {} of {} positions of lexeme '{}'",
            source.len() - added,
            source.len(),
            String::from_utf8_lossy(lexeme)
        );
    }
}
