//! DSpace export → DataCite import transform
//!
//! Reads a DSpace metadata export CSV and produces one normalized row per
//! item, single-valued and ready for bulk DOI registration. The output file
//! is only written after every input row has mapped successfully.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::names::{reverse_name_order, split_name, UNKNOWN_CREATOR};
use crate::record::SourceRecord;
use crate::typemap::TypeMapping;

/// Contributor role groups, scanned in this order
const CONTRIBUTOR_GROUPS: [&str; 4] = [
    "dc.contributor.author",
    "dc.contributor.other",
    "dc.contributor.editor",
    "dc.contributor.advisor",
];

/// Fixed output header; written even when the export has no rows
pub const NORMALIZED_HEADER: [&str; 14] = [
    "title",
    "year",
    "type",
    "description",
    "creator1",
    "creator1_type",
    "creator1_given",
    "creator1_family",
    "creator2",
    "creator2_type",
    "creator2_given",
    "creator2_family",
    "publisher",
    "source",
];

/// Mapper configuration: which identifier URIs count as the item's source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapperConfig {
    /// A `dc.identifier.uri` value must contain one of these substrings to
    /// be selected as the source URI
    pub uri_prefixes: Vec<String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            uri_prefixes: vec![
                "http://hdl.handle.net/10613".to_string(),
                "http://hdl.handle.net/10170".to_string(),
            ],
        }
    }
}

/// One normalized row of the DataCite import CSV.
///
/// Field order matches the fixed output header exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub title: String,
    pub year: String,
    #[serde(rename = "type")]
    pub resource_type: String,
    pub description: String,
    pub creator1: String,
    pub creator1_type: String,
    pub creator1_given: String,
    pub creator1_family: String,
    pub creator2: String,
    pub creator2_type: String,
    pub creator2_given: String,
    pub creator2_family: String,
    pub publisher: String,
    pub source: String,
}

/// Row counts reported after a successful mapping run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapReport {
    pub rows_in: usize,
    pub rows_out: usize,
}

/// Map a single source record onto a normalized row
pub fn map_record(
    record: &SourceRecord,
    mapping: &TypeMapping,
    config: &MapperConfig,
) -> NormalizedRecord {
    let title = record.resolve("dc.title");
    let year = record.resolve("dc.date.issued");
    let resource_type = mapping.classify(&record.resolve("dc.type"));
    let description = record.resolve_any(&["dc.description.abstract", "dc.description"]);
    let publisher = record.resolve("dc.publisher");
    let source = record.select_uri(&config.uri_prefixes);

    let contributors = extract_contributors(record);

    let (creator1, creator1_type) = match contributors.first() {
        Some(name) => (reverse_name_order(name), "Personal".to_string()),
        None => (UNKNOWN_CREATOR.to_string(), String::new()),
    };
    let creator2 = contributors
        .get(1)
        .map(|name| reverse_name_order(name))
        .unwrap_or_default();
    let creator2_type = if creator2.is_empty() {
        String::new()
    } else {
        "Personal".to_string()
    };

    let (creator1_given, creator1_family) = if creator1 == UNKNOWN_CREATOR {
        (String::new(), String::new())
    } else {
        split_name(&creator1)
    };
    let (creator2_given, creator2_family) = split_name(&creator2);

    NormalizedRecord {
        title,
        year,
        resource_type,
        description,
        creator1,
        creator1_type,
        creator1_given,
        creator1_family,
        creator2,
        creator2_type,
        creator2_given,
        creator2_family,
        publisher,
        source,
    }
}

/// Collect contributor names across role groups, order preserved.
///
/// Each group field is a `||`-delimited list; everything from the first
/// `::` onward (ORCID and similar suffixes) is dropped, names are trimmed
/// with trailing periods stripped, and entries left empty are discarded.
fn extract_contributors(record: &SourceRecord) -> Vec<String> {
    let mut contributors = Vec::new();
    for group in CONTRIBUTOR_GROUPS {
        let field = record.resolve(group);
        if field.is_empty() {
            continue;
        }
        for raw in field.split("||") {
            let name = raw
                .split("::")
                .next()
                .unwrap_or_default()
                .trim()
                .trim_end_matches('.');
            if !name.is_empty() {
                contributors.push(name.to_string());
            }
        }
    }
    contributors
}

/// Read every row of a DSpace export CSV into source records
pub fn read_source_csv(path: &Path) -> Result<Vec<SourceRecord>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path)?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for row in reader.deserialize::<HashMap<String, String>>() {
        records.push(SourceRecord::new(row?));
    }
    Ok(records)
}

/// Map a sequence of source records, reporting per-row progress.
///
/// One output row per input row, order preserved.
pub fn map_records(
    records: &[SourceRecord],
    mapping: &TypeMapping,
    config: &MapperConfig,
    mut progress: impl FnMut(usize),
) -> Vec<NormalizedRecord> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            progress(i + 1);
            map_record(record, mapping, config)
        })
        .collect()
}

/// Transform a DSpace export file into a DataCite import file.
///
/// All rows are mapped in memory first; the output CSV (fixed header) is
/// written only once every row has succeeded, so a failed run leaves no
/// partial output behind.
pub fn map_file(
    input: &Path,
    output: &Path,
    mapping: &TypeMapping,
    config: &MapperConfig,
    progress: impl FnMut(usize),
) -> Result<MapReport> {
    let records = read_source_csv(input)?;
    let normalized = map_records(&records, mapping, config, progress);

    // The header is written explicitly so an empty export still produces
    // a well-formed output file
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output)?;
    writer.write_record(NORMALIZED_HEADER)?;
    for row in &normalized {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let report = MapReport {
        rows_in: records.len(),
        rows_out: normalized.len(),
    };
    info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        output = %output.display(),
        "transformed export written"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(pairs: &[(&str, &str)]) -> SourceRecord {
        SourceRecord::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_map_record_end_to_end() {
        let record = source(&[
            ("dc.title[en]", "Foo"),
            ("dc.date.issued", "2020"),
            ("dc.type[en]", "Article"),
            ("dc.contributor.author", "Smith, Jane::ORCID"),
            ("dc.identifier.uri", "http://hdl.handle.net/10613/123"),
        ]);
        let mapping = TypeMapping::from_json_str(r#"{"Article": "Text"}"#).unwrap();
        let row = map_record(&record, &mapping, &MapperConfig::default());

        assert_eq!(row.title, "Foo");
        assert_eq!(row.year, "2020");
        assert_eq!(row.resource_type, "Text");
        assert_eq!(row.creator1, "Jane Smith");
        assert_eq!(row.creator1_given, "Jane");
        assert_eq!(row.creator1_family, "Smith");
        assert_eq!(row.source, "http://hdl.handle.net/10613/123");
    }

    #[test]
    fn test_no_contributors_yields_unknown_creator() {
        let record = source(&[("dc.title", "Untitled")]);
        let row = map_record(
            &record,
            &TypeMapping::default(),
            &MapperConfig::default(),
        );
        assert_eq!(row.creator1, "Unknown");
        assert_eq!(row.creator1_type, "");
        assert_eq!(row.creator1_given, "");
        assert_eq!(row.creator1_family, "");
        assert_eq!(row.creator2, "");
        assert_eq!(row.creator2_type, "");
    }

    #[test]
    fn test_contributors_keep_group_then_list_order() {
        let record = source(&[
            ("dc.contributor.author", "Smith, Jane||Doe, John"),
            ("dc.contributor.editor", "Editor, Erin"),
        ]);
        let contributors = extract_contributors(&record);
        assert_eq!(contributors, vec!["Smith, Jane", "Doe, John", "Editor, Erin"]);
    }

    #[test]
    fn test_contributor_suffix_and_period_stripping() {
        let record = source(&[(
            "dc.contributor.author",
            "Smith, Jane.::0000-0001||  ::orphan-suffix||Solo",
        )]);
        let contributors = extract_contributors(&record);
        assert_eq!(contributors, vec!["Smith, Jane", "Solo"]);
    }

    #[test]
    fn test_only_first_two_contributors_kept() {
        let record = source(&[(
            "dc.contributor.author",
            "One, A||Two, B||Three, C",
        )]);
        let row = map_record(
            &record,
            &TypeMapping::default(),
            &MapperConfig::default(),
        );
        assert_eq!(row.creator1, "A One");
        assert_eq!(row.creator2, "B Two");
    }

    #[test]
    fn test_unmapped_type_is_unknown() {
        let record = source(&[("dc.type", "Article")]);
        let mapping = TypeMapping::from_json_str("{}").unwrap();
        let row = map_record(&record, &mapping, &MapperConfig::default());
        assert_eq!(row.resource_type, "Unknown");
    }

    #[test]
    fn test_progress_counts_every_row() {
        let records = vec![source(&[]), source(&[]), source(&[])];
        let mut seen = Vec::new();
        map_records(
            &records,
            &TypeMapping::default(),
            &MapperConfig::default(),
            |count| seen.push(count),
        );
        assert_eq!(seen, vec![1, 2, 3]);
    }
}
