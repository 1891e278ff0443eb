//! Commands deriving a new vector from existing ones

use anyhow::{Context, Result};

use lexvec::{LexVector, WeightMask, ops};

use crate::commands::{read_vector, write_vector};

fn report(action: &str, vector: &LexVector, output: &str) {
    println!(
        "{action}: {} lexemes ({} bytes) written to {output}",
        vector.len(),
        vector.encoded_size()
    );
}

pub fn concat(first: String, second: String, output: String) -> Result<()> {
    let a = read_vector(&first)?;
    let b = read_vector(&second)?;
    let result = a
        .concat(&b)
        .with_context(|| format!("Failed to concatenate {first} and {second}"))?;
    write_vector(&result, &output)?;
    report("Concatenated", &result, &output);
    Ok(())
}

pub fn strip(input: String, output: String) -> Result<()> {
    let result = read_vector(&input)?.strip()?;
    write_vector(&result, &output)?;
    report("Stripped", &result, &output);
    Ok(())
}

pub fn filter(weights: String, input: String, output: String) -> Result<()> {
    let mask = WeightMask::from_letters(&weights)
        .with_context(|| format!("Invalid weight list: {weights}"))?;
    let result = read_vector(&input)?.filter(mask)?;
    write_vector(&result, &output)?;
    report("Filtered", &result, &output);
    Ok(())
}

pub fn delete(lexemes: Vec<String>, input: String, output: String) -> Result<()> {
    let vector = read_vector(&input)?;
    let result = vector.delete(&lexemes)?;
    log::info!(
        "deleted {} of {} requested lexemes",
        vector.len() - result.len(),
        lexemes.len()
    );
    write_vector(&result, &output)?;
    report("Deleted", &result, &output);
    Ok(())
}

pub fn set_weight(weight: char, lexemes: Vec<String>, input: String, output: String) -> Result<()> {
    let vector = read_vector(&input)?;
    let lexemes = (!lexemes.is_empty()).then_some(lexemes.as_slice());
    let result = ops::set_weight_by_letter(&vector, weight, lexemes)?;
    write_vector(&result, &output)?;
    report("Reweighted", &result, &output);
    Ok(())
}
