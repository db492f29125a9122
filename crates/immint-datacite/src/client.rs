//! HTTP client for the DataCite REST API

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::Result;
use crate::payload::DoiRequest;
use crate::response::{parse_error, parse_minted};

/// Media type DataCite requires on registration requests
pub const JSON_API_CONTENT_TYPE: &str = "application/vnd.api+json";

/// Outcome of one registration round-trip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// 201: the DOI was created; carries the resolvable URL
    Minted { doi: String },
    /// Any other status, with the message from the error body
    Rejected { status: u16, message: String },
}

/// Thin wrapper over reqwest with the credentials baked in.
///
/// Requests are issued one at a time by the submitter; the client itself
/// does no queueing or retries.
pub struct DataCiteClient {
    http: Client,
    credentials: Credentials,
}

impl DataCiteClient {
    pub fn new(credentials: Credentials) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("immint/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self { http, credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Registrant prefix new DOIs are minted under
    pub fn doi_prefix(&self) -> &str {
        &self.credentials.doi_prefix
    }

    /// Submit one registration document.
    ///
    /// A non-201 status is a per-row rejection, not an error; only
    /// transport failures and unparsable success bodies abort the caller's
    /// loop.
    pub async fn register(&self, request: &DoiRequest) -> Result<RegisterOutcome> {
        let response = self
            .http
            .post(&self.credentials.url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header(CONTENT_TYPE, JSON_API_CONTENT_TYPE)
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body = %body, "registration response");

        if status == 201 {
            let doi = parse_minted(&body)?;
            Ok(RegisterOutcome::Minted { doi })
        } else {
            Ok(RegisterOutcome::Rejected {
                status,
                message: parse_error(&body),
            })
        }
    }
}
