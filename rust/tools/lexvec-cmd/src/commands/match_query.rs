//! Match command implementation

use anyhow::{Context, Result};
use serde::Serialize;

use lexvec::{LexVector, MatchOptions, QueryMatcher, QueryNode};

use crate::commands::{read_json, read_vector};

#[derive(Debug, Serialize)]
struct MatchReport {
    matched: bool,
    requires_match: bool,
}

pub fn run(query_path: String, options_path: Option<String>, vector_path: String) -> Result<()> {
    let query: QueryNode = read_json(&query_path, "query")?;
    let options: MatchOptions = match options_path {
        Some(path) => read_json(&path, "match options")?,
        None => MatchOptions::default(),
    };
    let vector = read_vector(&vector_path)?;
    let report = evaluate(&vector, &query, options)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn evaluate(vector: &LexVector, query: &QueryNode, options: MatchOptions) -> Result<MatchReport> {
    let matcher = QueryMatcher::new(vector, options).context("Invalid match options")?;
    let matched = matcher
        .matches(query)
        .with_context(|| format!("Failed to evaluate {} query", query.kind_name()))?;
    Ok(MatchReport {
        matched,
        requires_match: query.requires_match(),
    })
}
