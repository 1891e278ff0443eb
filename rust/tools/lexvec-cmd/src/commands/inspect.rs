//! Inspect command implementation

use anyhow::Result;
use serde::Serialize;

use lexvec::{EntryRef, LexVector};

use crate::commands::read_vector;

#[derive(Serialize)]
struct VectorSummary {
    encoded_size: usize,
    lexeme_count: usize,
    data_size: usize,
    max_position: u16,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    entries: Option<Vec<EntryInfo>>,
}

#[derive(Serialize)]
struct EntryInfo {
    lexeme: String,
    occurrences: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    positions: Option<Vec<PositionInfo>>,
}

#[derive(Serialize)]
struct PositionInfo {
    pos: u16,
    weight: char,
}

pub fn run(entries: bool, path: String) -> Result<()> {
    let vector = read_vector(&path)?;
    let summary = summarize(&vector, entries);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn summarize(vector: &LexVector, with_entries: bool) -> VectorSummary {
    VectorSummary {
        encoded_size: vector.encoded_size(),
        lexeme_count: vector.len(),
        data_size: vector.data_len(),
        max_position: vector.max_position(),
        text: vector.to_string(),
        entries: with_entries.then(|| vector.iter().map(entry_info).collect()),
    }
}

fn entry_info(entry: EntryRef<'_>) -> EntryInfo {
    EntryInfo {
        lexeme: entry.lexeme_str().into_owned(),
        occurrences: entry.position_count_or_one(),
        positions: entry.positions.map(|positions| {
            positions
                .iter()
                .map(|pos| PositionInfo {
                    pos: pos.pos(),
                    weight: pos.weight().letter(),
                })
                .collect()
        }),
    }
}
