//! Bulk DOI registration
//!
//! One request per input row, strictly sequential. Results are buffered in
//! memory and only written out after the last row; a transport failure mid
//! run aborts with no output file.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use immint_core::report::{write_results, DoiResult, STATUS_CREATED};

use crate::client::{DataCiteClient, RegisterOutcome};
use crate::error::{DataCiteError, Result};
use crate::payload::{Creator, DoiRequest};

/// Columns every normalized input row must carry
const REQUIRED_COLUMNS: [&str; 6] = ["title", "year", "type", "description", "publisher", "source"];

/// One parsed row of the normalized import CSV, ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub title: String,
    pub year: String,
    pub resource_type: String,
    pub description: String,
    pub publisher: String,
    pub source: String,
    pub creators: Vec<Creator>,
}

/// Where the results go
#[derive(Debug, Clone)]
pub struct SubmitOptions {
    pub output: PathBuf,
    /// Append-only log directory for the timestamped per-run copy; `None`
    /// disables the copy
    pub log_dir: Option<PathBuf>,
}

/// A completed submission run
#[derive(Debug, Clone)]
pub struct SubmitReport {
    pub results: Vec<DoiResult>,
    pub minted: usize,
    pub output: PathBuf,
    pub log_copy: Option<PathBuf>,
}

/// Read the normalized CSV into submission records.
///
/// Header names are matched case-insensitively. Creators are collected
/// from `creator1`, `creator2`, … for as long as the numbered column
/// exists; blank creator cells are skipped and a blank `creatorN_type`
/// defaults to `Personal`.
pub fn read_submission_csv(path: &Path) -> Result<Vec<SubmissionRecord>> {
    if !path.exists() {
        return Err(DataCiteError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let header_index: HashMap<String, usize> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    let mut required = HashMap::new();
    for name in REQUIRED_COLUMNS {
        let idx = *header_index
            .get(name)
            .ok_or_else(|| DataCiteError::ColumnNotFound(name.to_string()))?;
        required.insert(name, idx);
    }

    let cell = |row: &csv::StringRecord, idx: usize| -> String {
        row.get(idx).unwrap_or_default().trim().to_string()
    };

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;

        let mut creators = Vec::new();
        let mut i = 1;
        while let Some(&name_idx) = header_index.get(&format!("creator{}", i)) {
            let name = cell(&row, name_idx);
            if !name.is_empty() {
                let lookup = |suffix: &str| {
                    header_index
                        .get(&format!("creator{}_{}", i, suffix))
                        .map(|&idx| cell(&row, idx))
                        .unwrap_or_default()
                };
                let name_type = match lookup("type") {
                    t if t.is_empty() => "Personal".to_string(),
                    t => t,
                };
                creators.push(Creator {
                    name,
                    name_type,
                    given_name: lookup("given"),
                    family_name: lookup("family"),
                });
            }
            i += 1;
        }

        records.push(SubmissionRecord {
            title: cell(&row, required["title"]),
            year: cell(&row, required["year"]),
            resource_type: cell(&row, required["type"]),
            description: cell(&row, required["description"]),
            publisher: cell(&row, required["publisher"]),
            source: cell(&row, required["source"]),
            creators,
        });
    }
    Ok(records)
}

/// Build the registration document for one record
pub fn build_request(prefix: &str, record: &SubmissionRecord) -> DoiRequest {
    DoiRequest::publish(
        prefix,
        record.creators.clone(),
        &record.title,
        &record.publisher,
        &record.year,
        &record.description,
        &record.resource_type,
        &record.source,
    )
}

/// Submit every row of a normalized CSV, one request at a time.
///
/// Produces one [`DoiResult`] per input row in input order, writes the
/// result CSV, and (unless disabled) appends a timestamped copy under the
/// log directory, creating it if absent.
pub async fn submit_file(
    client: &DataCiteClient,
    input: &Path,
    options: &SubmitOptions,
    mut progress: impl FnMut(usize),
) -> Result<SubmitReport> {
    let records = read_submission_csv(input)?;

    let mut results = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let request = build_request(client.doi_prefix(), record);
        let outcome = client.register(&request).await?;

        let result = match outcome {
            RegisterOutcome::Minted { doi } => {
                info!(title = %record.title, doi = %doi, "DOI minted");
                DoiResult {
                    title: record.title.clone(),
                    source: record.source.clone(),
                    doi: Some(doi),
                    status: STATUS_CREATED,
                    error_message: String::new(),
                }
            }
            RegisterOutcome::Rejected { status, message } => {
                info!(title = %record.title, status, error = %message, "registration rejected");
                DoiResult {
                    title: record.title.clone(),
                    source: record.source.clone(),
                    doi: None,
                    status,
                    error_message: message,
                }
            }
        };
        results.push(result);
        progress(i + 1);
    }

    write_results(&options.output, &results)?;

    let log_copy = match &options.log_dir {
        Some(log_dir) => {
            fs::create_dir_all(log_dir)?;
            let stamp = Local::now().format("%Y%m%d_%H%M%S");
            let path = log_dir.join(format!("datacite_export_{}.csv", stamp));
            write_results(&path, &results)?;
            Some(path)
        }
        None => None,
    };

    let minted = results.iter().filter(|r| r.is_minted()).count();
    info!(
        minted,
        total = results.len(),
        output = %options.output.display(),
        "submission run complete"
    );

    Ok(SubmitReport {
        results,
        minted,
        output: options.output.clone(),
        log_copy,
    })
}
