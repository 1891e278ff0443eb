//! Command implementations for lexvec-cmd

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use lexvec::LexVector;

pub mod encode;
pub mod inspect;
pub mod match_query;
pub mod transform;

/// Checks if a file exists and is a regular file
fn validate_file_exists(path: &str) -> Result<()> {
    let file_path = Path::new(path);
    if !file_path.exists() {
        anyhow::bail!("File does not exist: {}", path);
    }
    if !file_path.is_file() {
        anyhow::bail!("Path is not a file: {}", path);
    }
    Ok(())
}

/// Reads and validates an encoded vector.
pub fn read_vector(path: &str) -> Result<LexVector> {
    validate_file_exists(path)?;
    let bytes = fs::read(path).with_context(|| format!("Failed to read vector: {path}"))?;
    let vector =
        LexVector::decode(&bytes).with_context(|| format!("Failed to decode vector: {path}"))?;
    log::debug!("read {} lexemes ({} bytes) from {path}", vector.len(), bytes.len());
    Ok(vector)
}

pub fn write_vector(vector: &LexVector, path: &str) -> Result<()> {
    fs::write(path, vector.as_bytes()).with_context(|| format!("Failed to write vector: {path}"))?;
    log::debug!(
        "wrote {} lexemes ({} bytes) to {path}",
        vector.len(),
        vector.encoded_size()
    );
    Ok(())
}

/// Parses a JSON file into `T`; `what` names the content in error messages.
pub fn read_json<T: DeserializeOwned>(path: &str, what: &str) -> Result<T> {
    validate_file_exists(path)?;
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read {what}: {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {what}: {path}"))
}
