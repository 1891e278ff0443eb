//! Operations that derive a new vector from existing ones.
//!
//! None of them modify their inputs. Each computes an upper bound of the
//! output size, writes the surviving entries once through the shared writer
//! and finishes with a buffer of the exact size.

mod concat;
mod delete;
mod filter;
mod strip;
mod weight;

pub use concat::concat;
pub use delete::{delete_by_indices, delete_lexeme, delete_lexemes};
pub use filter::filter_by_weight;
pub use strip::strip;
pub use weight::{set_weight, set_weight_by_letter, set_weight_of};

use lexvec_common::Result;

use crate::format::{LexVector, Weight, WeightMask};

impl LexVector {
    /// See [`concat`].
    pub fn concat(&self, other: &LexVector) -> Result<LexVector> {
        concat(self, other)
    }

    /// See [`filter_by_weight`].
    pub fn filter(&self, weights: WeightMask) -> Result<LexVector> {
        filter_by_weight(self, weights)
    }

    /// See [`delete_lexemes`].
    pub fn delete<I, L>(&self, lexemes: I) -> Result<LexVector>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        delete_lexemes(self, lexemes)
    }

    /// See [`set_weight`].
    pub fn with_weight(&self, weight: Weight) -> LexVector {
        set_weight(self, weight)
    }

    /// See [`strip`].
    pub fn strip(&self) -> Result<LexVector> {
        strip(self)
    }
}
