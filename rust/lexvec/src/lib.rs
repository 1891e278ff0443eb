//! Sorted lexeme vectors and full-text query matching.
//!
//! A [`LexVector`] is the compact, sortable encoding of a document's set of
//! normalized terms ("lexemes"), each optionally annotated with occurrence
//! positions and weight classes. This crate provides:
//!
//! - **Format**: the binary layout, validation of foreign buffers
//!   ([`LexVector::decode`]) and encoding of parser output
//!   ([`VectorBuilder`]).
//! - **Ordering**: the lexeme comparator used for storage order and prefix
//!   tests, and a total order over whole vectors.
//! - **Search**: binary and prefix lookup of lexemes, collecting positions
//!   filtered by weight.
//! - **Operations**: concatenation, weight filtering, deletion, weight
//!   assignment and stripping, each producing a new vector.
//! - **Queries**: evaluation of boolean and phrase query trees.
//!
//! # Quick Start
//!
//! ```rust
//! use lexvec::{QueryNode, VectorBuilder, Weight, matches};
//!
//! let mut builder = VectorBuilder::new();
//! builder.add_position("fat", 2, Weight::D).unwrap();
//! builder.add_position("cat", 3, Weight::A).unwrap();
//! let vector = builder.build().unwrap();
//!
//! let query = QueryNode::phrase(QueryNode::value("fat"), QueryNode::prefix("ca"), 1);
//! assert!(matches(&vector, &query).unwrap());
//! ```

pub mod compare;
pub mod format;
pub mod ops;
pub mod query;
pub mod search;


pub use compare::{compare_lexeme, compare_vectors};
pub use format::{EntryRef, LexVector, PositionSlice, VectorBuilder, Weight, WeightMask, WordPos};
pub use query::{MatchOptions, QueryMatcher, QueryNode, QueryOperand, matches};
pub use search::{MatchPositions, OperandMatch, find, match_operand};
