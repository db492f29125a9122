//! DOI registration results
//!
//! One [`DoiResult`] per submitted record. Result files share a fixed
//! header and are both the submitter's output and the merger's and the
//! statistics scan's input.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// HTTP status DataCite returns for a successful registration
pub const STATUS_CREATED: u16 = 201;

/// Fixed result header; written even when a run produced no rows
pub const RESULT_HEADER: [&str; 5] = ["title", "source", "doi", "status", "error_message"];

/// Outcome of one DOI registration request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoiResult {
    pub title: String,
    pub source: String,
    /// Resolvable DOI URL; `None` when registration failed
    pub doi: Option<String>,
    pub status: u16,
    pub error_message: String,
}

impl DoiResult {
    pub fn is_minted(&self) -> bool {
        self.status == STATUS_CREATED && self.doi.is_some()
    }
}

/// Write results to a CSV file with the fixed result header
pub fn write_results(path: &Path, results: &[DoiResult]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(RESULT_HEADER)?;
    for result in results {
        writer.serialize(result)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a result CSV back into memory
pub fn read_results(path: &Path) -> Result<Vec<DoiResult>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let mut results = Vec::new();
    for row in reader.deserialize::<DoiResult>() {
        results.push(row?);
    }
    Ok(results)
}
