//! Merge integration tests: DOI result files merged into DSpace import
//! files

mod common;

use common::write_csv;
use immint_core::merge::{build_index, merge_files, MergeConfig};

const EXPORT: &str = "title,source,doi,status,error_message\n\
    Foo,http://x/1,https://doi.org/10.1234/a,201,\n\
    Bar,http://x/2,,422,taken\n";

#[test]
fn test_merge_appends_doi_and_preserves_columns() {
    let dir = tempfile::tempdir().unwrap();
    let export = write_csv(dir.path(), "export.csv", EXPORT);
    let import = write_csv(
        dir.path(),
        "import.csv",
        "id,dc.title,dc.identifier.uri\n\
         1,Foo,http://x/1\n\
         2,Baz,http://elsewhere/9\n",
    );

    let report = merge_files(&export, &import, &MergeConfig::default()).unwrap();
    assert_eq!(report.summary.index_size, 1);
    assert_eq!(report.summary.rows_added, 1);
    assert_eq!(report.summary.rows_skipped, 0);
    assert_eq!(report.summary.rows_unmatched, 1);
    assert_eq!(report.output, dir.path().join("updated_import.csv"));

    let text = std::fs::read_to_string(&report.output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "id,dc.title,dc.identifier.uri");
    assert_eq!(lines[1], "1,Foo,http://x/1||https://doi.org/10.1234/a");
    assert_eq!(lines[2], "2,Baz,http://elsewhere/9");
}

#[test]
fn test_merge_is_idempotent_on_second_pass() {
    let dir = tempfile::tempdir().unwrap();
    let export = write_csv(dir.path(), "export.csv", EXPORT);
    let import = write_csv(
        dir.path(),
        "import.csv",
        "id,dc.identifier.uri\n1,http://x/1\n",
    );

    let first = merge_files(&export, &import, &MergeConfig::default()).unwrap();
    assert_eq!(first.summary.rows_added, 1);

    // Second pass over the already-updated file: the appended DOI is a
    // marker, so the row is skipped rather than re-appended
    let second = merge_files(&export, &first.output, &MergeConfig::default()).unwrap();
    assert_eq!(second.summary.rows_added, 0);
    assert_eq!(second.summary.rows_skipped, 1);

    let first_text = std::fs::read_to_string(&first.output).unwrap();
    let second_text = std::fs::read_to_string(&second.output).unwrap();
    assert_eq!(first_text, second_text);
}

#[test]
fn test_merge_scans_variants_in_fixed_order() {
    let dir = tempfile::tempdir().unwrap();
    let export = write_csv(
        dir.path(),
        "export.csv",
        "title,source,doi,status,error_message\n\
         Foo,http://x/1,https://doi.org/10.1234/a,201,\n",
    );
    // The `[]` variant has content and does not match; the row is decided
    // by that variant alone only when it matches or carries a marker, so
    // the scan falls through to the unsuffixed variant
    let import = write_csv(
        dir.path(),
        "import.csv",
        "dc.identifier.uri[],dc.identifier.uri\n\
         http://unrelated/5,http://x/1\n",
    );

    let report = merge_files(&export, &import, &MergeConfig::default()).unwrap();
    assert_eq!(report.summary.rows_added, 1);

    let text = std::fs::read_to_string(&report.output).unwrap();
    assert!(text.contains("http://x/1||https://doi.org/10.1234/a"));
    assert!(text.contains("http://unrelated/5"));
}

#[test]
fn test_index_skips_blank_dois_and_keeps_last_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let export = write_csv(
        dir.path(),
        "export.csv",
        "title,source,doi,status,error_message\n\
         A,http://x/1,https://doi.org/10.1234/first,201,\n\
         B,http://x/1,https://doi.org/10.1234/second,201,\n\
         C,http://x/2,,500,server error\n\
         D,,https://doi.org/10.1234/orphan,201,\n",
    );

    let index = build_index(&export).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(
        index.get("http://x/1").map(String::as_str),
        Some("https://doi.org/10.1234/second")
    );
}

#[test]
fn test_merge_missing_source_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let export = write_csv(dir.path(), "export.csv", "title,doi\nFoo,10.1/x\n");
    let err = build_index(&export);
    assert!(matches!(
        err,
        Err(immint_core::Error::ColumnNotFound(ref c)) if c == "source"
    ));
}

#[test]
fn test_merge_rows_without_identifier_fields_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let export = write_csv(dir.path(), "export.csv", EXPORT);
    let import = write_csv(
        dir.path(),
        "import.csv",
        "id,dc.title\n1,No identifiers here\n",
    );

    let report = merge_files(&export, &import, &MergeConfig::default()).unwrap();
    assert_eq!(report.summary.rows_unmatched, 1);

    let text = std::fs::read_to_string(&report.output).unwrap();
    assert!(text.contains("1,No identifiers here"));
}
