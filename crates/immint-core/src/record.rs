//! DSpace export rows and language-suffixed field resolution
//!
//! DSpace exports carry each logical field in up to three header variants:
//! `name`, `name[en]` and `name[]`. Resolution tries an explicit ordered
//! candidate list per logical field and takes the first non-blank value.

use std::collections::HashMap;

/// Suffix order tried when resolving a logical field
const FIELD_SUFFIXES: [&str; 3] = ["", "[en]", "[]"];

/// URI variants scanned for the source identifier, in scan order
pub const URI_FIELDS: [&str; 3] = [
    "dc.identifier.uri[]",
    "dc.identifier.uri",
    "dc.identifier.uri[en]",
];

/// One row of a DSpace metadata export, keyed by raw header name
#[derive(Debug, Clone, Default)]
pub struct SourceRecord {
    fields: HashMap<String, String>,
}

impl SourceRecord {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Look up a field by its exact header name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Resolve a logical field through its suffix candidates.
    ///
    /// Tries `base`, `base[en]`, `base[]` in order and returns the first
    /// non-blank value, trimmed. All candidates blank or absent yields an
    /// empty string, never an error.
    pub fn resolve(&self, base: &str) -> String {
        for suffix in FIELD_SUFFIXES {
            if let Some(value) = self.fields.get(&format!("{}{}", base, suffix)) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
        String::new()
    }

    /// Resolve the first non-blank among several logical fields.
    ///
    /// Each base goes through the full suffix chain before the next base is
    /// tried.
    pub fn resolve_any(&self, bases: &[&str]) -> String {
        for base in bases {
            let value = self.resolve(base);
            if !value.is_empty() {
                return value;
            }
        }
        String::new()
    }

    /// Select the source URI from the identifier field variants.
    ///
    /// Scans the variants in [`URI_FIELDS`] order; the first variant present
    /// whose value contains any of the allowed prefix substrings wins. The
    /// portion before the first `||` is returned trimmed, and no later
    /// variant is considered once one has matched.
    pub fn select_uri(&self, allowed_prefixes: &[String]) -> String {
        for field in URI_FIELDS {
            if let Some(value) = self.get(field) {
                if allowed_prefixes.iter().any(|p| value.contains(p.as_str())) {
                    return value
                        .split("||")
                        .next()
                        .unwrap_or_default()
                        .trim()
                        .to_string();
                }
            }
        }
        String::new()
    }
}

impl From<HashMap<String, String>> for SourceRecord {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::new(fields)
    }
}
