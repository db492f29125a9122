//! DOI merge back into DSpace import files
//!
//! Loads a DOI result file into a lookup table keyed by source URI, then
//! rewrites a DSpace import CSV by appending the matched DOI onto the
//! matching identifier field. Rows already carrying a DOI-like value are
//! left untouched, which makes the merge idempotent.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::URI_FIELDS;

/// Merge configuration: which substrings mark a field as already a DOI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    pub doi_markers: Vec<String>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            doi_markers: vec!["10.25316".to_string(), "https://doi.org".to_string()],
        }
    }
}

/// Tallies reported after a merge run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Source URIs in the lookup table
    pub index_size: usize,
    /// Rows where a DOI was appended
    pub rows_added: usize,
    /// Rows skipped because a DOI was already present
    pub rows_skipped: usize,
    /// Rows where no identifier field matched anything
    pub rows_unmatched: usize,
}

/// A completed merge: where the updated file went and what happened
#[derive(Debug, Clone)]
pub struct MergeReport {
    pub output: PathBuf,
    pub summary: MergeSummary,
}

/// Build the source URI → DOI lookup table from a DOI result CSV.
///
/// Rows with a blank source or blank doi have nothing to merge and are not
/// indexed. Duplicate source keys keep the last occurrence.
pub fn build_index(export: &Path) -> Result<HashMap<String, String>> {
    if !export.exists() {
        return Err(Error::FileNotFound(export.display().to_string()));
    }
    let file = File::open(export)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let source_idx = column_index(&headers, "source")?;
    let doi_idx = column_index(&headers, "doi")?;

    let mut index = HashMap::new();
    for row in reader.records() {
        let row = row?;
        let source = row.get(source_idx).unwrap_or_default().trim();
        let doi = row.get(doi_idx).unwrap_or_default().trim();
        if source.is_empty() || doi.is_empty() {
            continue;
        }
        index.insert(source.to_string(), doi.to_string());
    }
    Ok(index)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
}

/// What the merge did with one import row
enum RowOutcome {
    Added,
    Skipped,
    Unmatched,
}

/// Apply the index to one import row.
///
/// Identifier variants are scanned in fixed order; the first variant with
/// non-blank content decides the row: a DOI marker means skip, an index hit
/// means append `||<doi>`, anything else falls through to the next variant.
fn merge_row(
    row: &mut Vec<String>,
    header_index: &HashMap<String, usize>,
    index: &HashMap<String, String>,
    config: &MergeConfig,
) -> RowOutcome {
    for field in URI_FIELDS {
        let Some(&idx) = header_index.get(field) else {
            continue;
        };
        let existing = row[idx].trim().to_string();
        if existing.is_empty() {
            continue;
        }

        if config.doi_markers.iter().any(|m| existing.contains(m.as_str())) {
            debug!(field, uri = %existing, "skipping row with existing DOI");
            return RowOutcome::Skipped;
        }

        if let Some(doi) = index.get(&existing) {
            debug!(field, uri = %existing, doi = %doi, "match found");
            row[idx].push_str("||");
            row[idx].push_str(doi);
            return RowOutcome::Added;
        }
    }
    RowOutcome::Unmatched
}

/// Merge a DOI result file into a DSpace import file.
///
/// Every import row is written to `updated_<original-filename>` beside the
/// original, column order preserved exactly, whether or not it was touched.
pub fn merge_files(export: &Path, import: &Path, config: &MergeConfig) -> Result<MergeReport> {
    let index = build_index(export)?;

    if !import.exists() {
        return Err(Error::FileNotFound(import.display().to_string()));
    }
    let file = File::open(import)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader.headers()?.clone();
    let header_index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.to_string(), i))
        .collect();
    let id_idx = header_index.get("id").copied();

    let mut summary = MergeSummary {
        index_size: index.len(),
        ..MergeSummary::default()
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();

        match merge_row(&mut row, &header_index, &index, config) {
            RowOutcome::Added => summary.rows_added += 1,
            RowOutcome::Skipped => summary.rows_skipped += 1,
            RowOutcome::Unmatched => {
                summary.rows_unmatched += 1;
                let id = id_idx
                    .and_then(|i| row.get(i))
                    .filter(|v| !v.is_empty())
                    .map(String::as_str)
                    .unwrap_or("Unknown");
                debug!(id, "no match for any identifier field");
            }
        }
        rows.push(row);
    }

    let output = updated_path(import)?;
    let mut writer = csv::Writer::from_path(&output)?;
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!(
        index_size = summary.index_size,
        added = summary.rows_added,
        skipped = summary.rows_skipped,
        output = %output.display(),
        "merge complete"
    );
    Ok(MergeReport { output, summary })
}

/// `updated_<file name>` in the same directory as the original
fn updated_path(import: &Path) -> Result<PathBuf> {
    let name = import
        .file_name()
        .ok_or_else(|| Error::InvalidPath(import.display().to_string()))?;
    let updated = format!("updated_{}", name.to_string_lossy());
    Ok(import.with_file_name(updated))
}
