//! DataCite response parsing
//!
//! Kept free of HTTP so the parsers can be exercised against captured
//! response bodies.

use serde::Deserialize;

use crate::error::{DataCiteError, Result};

/// Fallback when an error body carries no usable message
pub const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Deserialize)]
struct MintedResponse {
    data: MintedData,
}

#[derive(Debug, Deserialize)]
struct MintedData {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    title: Option<String>,
}

/// Parse a 201 body and compose the resolvable DOI URL.
///
/// A success body without the registered identifier is unexpected and
/// aborts the run.
pub fn parse_minted(body: &str) -> Result<String> {
    let response: MintedResponse = serde_json::from_str(body)
        .map_err(|e| DataCiteError::UnexpectedResponse(format!("invalid success body: {}", e)))?;
    Ok(format!("https://doi.org/{}", response.data.id))
}

/// Extract a human-readable message from an error body.
///
/// Takes the first error entry's title; an absent or unparsable body falls
/// back to [`UNKNOWN_ERROR`].
pub fn parse_error(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.errors.into_iter().next())
        .and_then(|e| e.title)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
