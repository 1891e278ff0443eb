//! Boolean and phrase query evaluation.
//!
//! A query is a tree of [`QueryNode`]s built by the caller. [`QueryMatcher`]
//! evaluates it against a single [`LexVector`]: `And`/`Or` short-circuit,
//! `Not` negates (or, for ranking, can be configured to always pass) and
//! `Phrase` checks positional proximity between its operands.

mod analysis;
mod exec;
mod options;
mod tree;

pub use exec::{QueryMatcher, match_within_distance};
pub use options::{DEFAULT_MAX_DEPTH, MatchOptions};
pub use tree::{QueryNode, QueryOperand};

use lexvec_common::Result;

use crate::format::LexVector;

/// Evaluates `query` against `vector` with default options.
pub fn matches(vector: &LexVector, query: &QueryNode) -> Result<bool> {
    QueryMatcher::new(vector, MatchOptions::default())?.matches(query)
}
