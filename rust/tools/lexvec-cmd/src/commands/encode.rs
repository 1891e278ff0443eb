//! Encode command implementation

use anyhow::{Context, Result};
use serde::Deserialize;

use lexvec::{LexVector, VectorBuilder, Weight};

use crate::commands::{read_json, write_vector};

/// One parser occurrence. A token without a position adds the bare lexeme.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputToken {
    lexeme: String,
    #[serde(default)]
    position: Option<u32>,
    #[serde(default)]
    weight: Option<char>,
}

pub fn run(input: String, output: String) -> Result<()> {
    let tokens: Vec<InputToken> = read_json(&input, "token list")?;
    let vector = encode_tokens(&tokens)?;
    write_vector(&vector, &output)?;
    println!(
        "Encoded {} tokens into {} lexemes ({} bytes): {}",
        tokens.len(),
        vector.len(),
        vector.encoded_size(),
        output
    );
    Ok(())
}

fn encode_tokens(tokens: &[InputToken]) -> Result<LexVector> {
    let mut builder = VectorBuilder::new();
    for (i, token) in tokens.iter().enumerate() {
        match (token.position, token.weight) {
            (Some(position), weight) => {
                let weight = weight.map(Weight::try_from).transpose()?.unwrap_or_default();
                builder
                    .add_position(&token.lexeme, position, weight)
                    .with_context(|| format!("Invalid token {i} ('{}')", token.lexeme))?;
            }
            (None, Some(_)) => {
                anyhow::bail!("Token {i} ('{}') has a weight but no position", token.lexeme)
            }
            (None, None) => {
                builder
                    .add_lexeme(&token.lexeme)
                    .with_context(|| format!("Invalid token {i} ('{}')", token.lexeme))?;
            }
        }
    }
    builder.build().context("Failed to encode vector")
}
