//! DataCite account credentials
//!
//! Loaded from a user-supplied JSON file; never written back. A malformed
//! file surfaces as an error before anything is submitted.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{DataCiteError, Result};

/// Endpoint, DOI prefix and account pair for one DataCite repository
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Registration endpoint, e.g. `https://api.datacite.org/dois`
    pub url: String,
    /// Registrant prefix, e.g. `10.12345`
    pub doi_prefix: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Load credentials from a JSON file with keys `url`, `doiPrefix`,
    /// `username` and `password`
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DataCiteError::FileNotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| DataCiteError::Credentials(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"url": "https://api.test.datacite.org/dois", "doiPrefix": "10.12345", "username": "ABC.DEF", "password": "hunter2"}}"#
        )
        .unwrap();

        let creds = Credentials::from_file(file.path()).unwrap();
        assert_eq!(creds.url, "https://api.test.datacite.org/dois");
        assert_eq!(creds.doi_prefix, "10.12345");
        assert_eq!(creds.username, "ABC.DEF");
        assert_eq!(creds.password, "hunter2");
    }

    #[test]
    fn test_malformed_file_is_a_credentials_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json at all").unwrap();

        let err = Credentials::from_file(file.path());
        assert!(matches!(err, Err(DataCiteError::Credentials(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = Credentials::from_file(Path::new("/nonexistent/creds.json"));
        assert!(matches!(err, Err(DataCiteError::FileNotFound(_))));
    }
}
