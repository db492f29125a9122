//! Resource type classification
//!
//! Maps DSpace resource type strings onto the DataCite vocabulary. The
//! mapping is user-editable: it can be replaced from a JSON text block and
//! persisted to a side file in the working directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Default side file name in the working directory
pub const TYPE_MAPPING_FILE: &str = "type_mapping.json";

/// Fallback value for unmapped source types
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Source type → target type mapping with an "Unknown" fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMapping {
    map: BTreeMap<String, String>,
}

impl Default for TypeMapping {
    fn default() -> Self {
        let entries = [
            ("Article", "Text"),
            ("Book", "Text"),
            ("Thesis", "Text"),
            ("Dataset", "Dataset"),
            ("Image", "Image"),
            ("Video", "Audiovisual"),
            ("Audio", "Sound"),
            ("Other", "Other"),
            ("Illustrator", "Image"),
            ("Archival Material", "Text"),
        ];
        Self {
            map: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl TypeMapping {
    /// Build a mapping from explicit entries
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self { map }
    }

    /// Parse a mapping from a JSON text block.
    ///
    /// The block must be a flat string→string object; anything else is an
    /// [`Error::InvalidMapping`] and the caller keeps its previous mapping.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let map: BTreeMap<String, String> =
            serde_json::from_str(text).map_err(|e| Error::InvalidMapping(e.to_string()))?;
        Ok(Self { map })
    }

    /// Render the mapping as pretty-printed JSON
    pub fn to_json_string(&self) -> String {
        // A BTreeMap of strings always serializes
        serde_json::to_string_pretty(&self.map).unwrap_or_default()
    }

    /// Load a mapping from a side file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Persist the mapping, overwriting the side file
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json_string())?;
        Ok(())
    }

    /// Map a source type onto the target vocabulary.
    ///
    /// Missing keys fall back to [`UNKNOWN_TYPE`].
    pub fn classify(&self, source_type: &str) -> String {
        self.map
            .get(source_type)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TYPE.to_string())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
