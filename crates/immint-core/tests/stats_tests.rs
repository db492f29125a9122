//! Statistics integration tests: per-prefix counts across log files

mod common;

use common::write_csv;
use immint_core::stats::count_dois_by_prefix;

#[test]
fn test_counts_accumulate_across_files() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "datacite_export_20240101_120000.csv",
        "title,source,doi,status,error_message\n\
         A,http://x/1,https://doi.org/10.1234/x,201,\n",
    );
    write_csv(
        dir.path(),
        "datacite_export_20240202_130000.csv",
        "title,source,doi,status,error_message\n\
         B,http://x/2,https://doi.org/10.1234/x,201,\n",
    );

    let counts = count_dois_by_prefix(dir.path()).unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].prefix, "10.1234");
    assert_eq!(counts[0].count, 2);
}

#[test]
fn test_failed_rows_and_foreign_files_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "datacite_export_20240101_120000.csv",
        "title,source,doi,status,error_message\n\
         A,http://x/1,https://doi.org/10.1234/x,201,\n\
         B,http://x/2,,422,taken\n",
    );
    // Wrong name shape: not scanned at all
    write_csv(
        dir.path(),
        "notes.csv",
        "title,source,doi,status,error_message\n\
         C,http://x/3,https://doi.org/10.9999/x,201,\n",
    );

    let counts = count_dois_by_prefix(dir.path()).unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].prefix, "10.1234");
    assert_eq!(counts[0].count, 1);
}

#[test]
fn test_unreadable_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "datacite_export_20240101_120000.csv",
        "title,source,doi,status,error_message\n\
         A,http://x/1,https://doi.org/10.1234/x,201,\n",
    );
    // Result-shaped header but a status that does not parse as a number
    write_csv(
        dir.path(),
        "datacite_export_20240102_120000.csv",
        "title,source,doi,status,error_message\n\
         B,http://x/2,https://doi.org/10.5555/x,unknown,\n",
    );

    let counts = count_dois_by_prefix(dir.path()).unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].prefix, "10.1234");
}

#[test]
fn test_sorted_by_count_descending() {
    let dir = tempfile::tempdir().unwrap();
    write_csv(
        dir.path(),
        "datacite_export_20240101_120000.csv",
        "title,source,doi,status,error_message\n\
         A,http://x/1,https://doi.org/10.1111/a,201,\n\
         B,http://x/2,https://doi.org/10.2222/b,201,\n\
         C,http://x/3,https://doi.org/10.2222/c,201,\n",
    );

    let counts = count_dois_by_prefix(dir.path()).unwrap();
    assert_eq!(counts[0].prefix, "10.2222");
    assert_eq!(counts[0].count, 2);
    assert_eq!(counts[1].prefix, "10.1111");
    assert_eq!(counts[1].count, 1);
}
