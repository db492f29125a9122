//! immint-datacite: bulk DOI registration against the DataCite REST API
//!
//! This crate provides:
//! - Credentials loading from the user's JSON file
//! - JSON:API payload construction (kernel-4 schema)
//! - Response parsing kept free of HTTP for testability
//! - The sequential bulk submitter with result and log-copy files
//!
//! Requests are issued one at a time; there is no retry, batching or rate
//! limiting. The transforms feeding this crate live in `immint-core`.

pub mod client;
pub mod credentials;
pub mod error;
pub mod payload;
pub mod response;
pub mod submit;

// Re-export main types for convenience
pub use client::{DataCiteClient, RegisterOutcome};
pub use credentials::Credentials;
pub use error::DataCiteError;
pub use payload::{Creator, DoiRequest};
pub use submit::{SubmissionRecord, SubmitOptions, SubmitReport};
