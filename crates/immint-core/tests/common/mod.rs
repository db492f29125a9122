//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

/// Write a CSV fixture into a test directory and return its path
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("failed to write fixture");
    path
}
