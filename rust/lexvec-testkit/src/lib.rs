//! Test utilities for the lexvec crates.
//!
//! Generates synthetic documents as plain `(lexeme, position, weight class)`
//! tokens, the same shape a text parser hands to the vector builder. The
//! generators are deterministic for a given seed.

pub mod data_gen;
