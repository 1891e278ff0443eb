//! Lexeme and vector ordering.
//!
//! Lexemes are ordered byte-wise with a shorter string sorting before any
//! longer string it is a prefix of. The same comparison, run in prefix mode,
//! answers "is `a` a prefix of `b`", which is what prefix queries use to walk
//! the contiguous run of matching entries.
//!
//! Whole vectors get a total order that only exists to back the comparison
//! operators; it is not meaningful for search.

use std::cmp::Ordering;

use crate::format::LexVector;

/// Compares two lexemes.
///
/// With `prefix == false` this is the storage order: bytes are compared up to
/// the shorter length and an equal prefix is resolved by length.
///
/// With `prefix == true` the result is `Equal` whenever `a` is a byte-prefix
/// of `b` (including an empty `a`), and `Greater` when `a` is longer than
/// `b` but otherwise equal to it.
pub fn compare_lexeme(a: &[u8], b: &[u8], prefix: bool) -> Ordering {
    if a.is_empty() {
        if prefix || b.is_empty() {
            Ordering::Equal
        } else {
            Ordering::Less
        }
    } else if b.is_empty() {
        Ordering::Greater
    } else {
        let common = a.len().min(b.len());
        match a[..common].cmp(&b[..common]) {
            Ordering::Equal if prefix => {
                if a.len() > b.len() {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }
            Ordering::Equal => a.len().cmp(&b.len()),
            ord => ord,
        }
    }
}

/// Total order over vectors.
///
/// Keys, in priority: encoded size, entry count, then entry by entry: an
/// entry with positions sorts before one without, lexeme bytes, a longer
/// position list sorts first, and finally positions and weight classes
/// pairwise, larger values first.
pub fn compare_vectors(a: &LexVector, b: &LexVector) -> Ordering {
    a.encoded_size()
        .cmp(&b.encoded_size())
        .then_with(|| a.len().cmp(&b.len()))
        .then_with(|| {
            a.iter()
                .zip(b.iter())
                .map(|(x, y)| {
                    y.has_positions()
                        .cmp(&x.has_positions())
                        .then_with(|| compare_lexeme(x.lexeme, y.lexeme, false))
                        .then_with(|| match (x.positions, y.positions) {
                            (Some(xp), Some(yp)) => yp.len().cmp(&xp.len()).then_with(|| {
                                xp.iter()
                                    .zip(yp.iter())
                                    .map(|(p, q)| {
                                        q.pos().cmp(&p.pos()).then(q.class().cmp(&p.class()))
                                    })
                                    .find(|ord| ord.is_ne())
                                    .unwrap_or(Ordering::Equal)
                            }),
                            _ => Ordering::Equal,
                        })
                })
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

impl PartialEq for LexVector {
    fn eq(&self, other: &Self) -> bool {
        compare_vectors(self, other).is_eq()
    }
}

impl Eq for LexVector {}

impl PartialOrd for LexVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LexVector {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_vectors(self, other)
    }
}
