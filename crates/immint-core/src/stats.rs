//! Aggregate statistics over past submission runs
//!
//! Scans the append-only log directory, counts successfully minted DOIs per
//! registrant prefix, and reports the totals sorted by count. Nothing is
//! persisted; the aggregate is recomputed from the log files each time.

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::error::Result;
use crate::report::{read_results, STATUS_CREATED};

/// File name shape of per-run result copies in the log directory
const LOG_FILE_PREFIX: &str = "datacite_export_";
const LOG_FILE_SUFFIX: &str = ".csv";

lazy_static! {
    /// Resolvable DOI URL; captures the registrant prefix (the two leading
    /// dot-separated segments of the path, e.g. `10.1234`)
    static ref DOI_URL_REGEX: Regex =
        Regex::new(r"^https://doi\.org/([^/.]+\.[^/.]+)").unwrap();
}

/// Minted-DOI count for one registrant prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixCount {
    pub prefix: String,
    pub count: u64,
}

/// Extract the registrant prefix from a resolvable DOI URL
pub fn doi_prefix(doi: &str) -> Option<String> {
    DOI_URL_REGEX
        .captures(doi)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Count minted DOIs per prefix across every result file in the log
/// directory.
///
/// Only rows with a 201 status and a resolvable DOI URL are counted. A
/// missing log directory yields an empty aggregate; an unreadable
/// individual file is reported and skipped, not fatal.
pub fn count_dois_by_prefix(log_dir: &Path) -> Result<Vec<PrefixCount>> {
    let mut counts: HashMap<String, u64> = HashMap::new();

    if !log_dir.exists() {
        return Ok(Vec::new());
    }

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.starts_with(LOG_FILE_PREFIX) || !name.ends_with(LOG_FILE_SUFFIX) {
            continue;
        }

        let results = match read_results(&entry.path()) {
            Ok(results) => results,
            Err(e) => {
                warn!(file = %entry.path().display(), error = %e, "skipping unreadable result file");
                continue;
            }
        };

        for result in results {
            if result.status != STATUS_CREATED {
                continue;
            }
            if let Some(prefix) = result.doi.as_deref().and_then(doi_prefix) {
                *counts.entry(prefix).or_insert(0) += 1;
            }
        }
    }

    let mut sorted: Vec<PrefixCount> = counts
        .into_iter()
        .map(|(prefix, count)| PrefixCount { prefix, count })
        .collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.prefix.cmp(&b.prefix)));
    Ok(sorted)
}
