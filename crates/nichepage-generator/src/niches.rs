//! Niche list loading.
//!
//! Niches come from a CSV file with a header row. The name is read from the
//! `niche` column, or from `keyword` when there is no `niche` column.

use std::{io::Read, path::Path};

use thiserror::Error;

/// Preferred column holding niche names.
pub const NICHE_COLUMN: &str = "niche";

/// Fallback column holding niche names.
pub const KEYWORD_COLUMN: &str = "keyword";

/// Niche list errors.
#[derive(Debug, Error)]
pub enum NicheListError {
    /// CSV decoding or file access error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Neither the `niche` nor the `keyword` column exists.
    #[error("niche list has no 'niche' or 'keyword' column")]
    MissingColumn,
}

/// Result type for niche list operations.
pub type Result<T> = std::result::Result<T, NicheListError>;

/// Read niche names from a CSV file.
pub fn read_niches(path: &Path) -> Result<Vec<String>> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    collect_niches(reader)
}

/// Read niche names from any CSV source.
pub fn parse_niches(source: impl Read) -> Result<Vec<String>> {
    let reader = csv::ReaderBuilder::new().flexible(true).from_reader(source);
    collect_niches(reader)
}

fn collect_niches<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<String>> {
    let headers = reader.headers()?.clone();
    let column = [NICHE_COLUMN, KEYWORD_COLUMN]
        .iter()
        .find_map(|name| headers.iter().position(|h| h.trim() == *name))
        .ok_or(NicheListError::MissingColumn)?;

    let mut niches = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(name) = record.get(column).map(str::trim) else {
            continue;
        };
        if !name.is_empty() {
            niches.push(name.to_string());
        }
    }

    Ok(niches)
}
