//! DataCite JSON:API registration payloads
//!
//! One document per record, `data.type = "dois"`, published on creation.
//! Field names follow the DataCite kernel-4 metadata schema.

use serde::{Deserialize, Serialize};

/// Schema version pinned in every registration document
pub const SCHEMA_VERSION: &str = "http://datacite.org/schema/kernel-4";

/// General resource type carried on every registration
pub const RESOURCE_TYPE_GENERAL: &str = "Text";

/// A creator as DataCite wants it: display name plus given/family split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
    #[serde(rename = "nameType")]
    pub name_type: String,
    #[serde(rename = "givenName")]
    pub given_name: String,
    #[serde(rename = "familyName")]
    pub family_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Description {
    pub description: String,
    #[serde(rename = "descriptionType")]
    pub description_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceTypes {
    #[serde(rename = "resourceTypeGeneral")]
    pub resource_type_general: String,
    #[serde(rename = "resourceType")]
    pub resource_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoiAttributes {
    pub event: String,
    pub prefix: String,
    pub creators: Vec<Creator>,
    pub titles: Vec<Title>,
    pub publisher: String,
    #[serde(rename = "publicationYear")]
    pub publication_year: String,
    pub descriptions: Vec<Description>,
    pub types: ResourceTypes,
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DoiData {
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: DoiAttributes,
}

/// The full registration document
#[derive(Debug, Clone, Serialize)]
pub struct DoiRequest {
    pub data: DoiData,
}

impl DoiRequest {
    /// Build a publish document for one record under the given prefix
    #[allow(clippy::too_many_arguments)]
    pub fn publish(
        prefix: &str,
        creators: Vec<Creator>,
        title: &str,
        publisher: &str,
        year: &str,
        description: &str,
        resource_type: &str,
        url: &str,
    ) -> Self {
        Self {
            data: DoiData {
                kind: "dois".to_string(),
                attributes: DoiAttributes {
                    event: "publish".to_string(),
                    prefix: prefix.to_string(),
                    creators,
                    titles: vec![Title {
                        title: title.to_string(),
                    }],
                    publisher: publisher.to_string(),
                    publication_year: year.to_string(),
                    descriptions: vec![Description {
                        description: description.to_string(),
                        description_type: "Abstract".to_string(),
                    }],
                    types: ResourceTypes {
                        resource_type_general: RESOURCE_TYPE_GENERAL.to_string(),
                        resource_type: resource_type.to_string(),
                    },
                    schema_version: SCHEMA_VERSION.to_string(),
                    url: url.to_string(),
                },
            },
        }
    }
}
