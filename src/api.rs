// API client module: wraps the GraphQL query in its request envelope and
// POSTs it to the airing schedule endpoint with a small blocking client.
// The pipeline only sees the `Transport` trait, so tests can swap in a
// canned response without touching the network.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::error::ReportError;

/// Public AniList GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://graphql.anilist.co";

/// Request timeout used when `AIRING_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Request timeout from an optional `AIRING_TIMEOUT_SECS` value. Zero is
/// rejected since every request would time out at once.
pub fn parse_timeout(raw: Option<&str>) -> Result<Duration> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TIMEOUT);
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid AIRING_TIMEOUT_SECS value: {raw:?}"))?;
    if secs == 0 {
        anyhow::bail!("Invalid AIRING_TIMEOUT_SECS value: {raw:?} (must be at least 1)");
    }
    Ok(Duration::from_secs(secs))
}

/// Standard GraphQL request envelope: `{"query": "..."}`.
#[derive(Serialize, Debug)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
}

/// Serialize `query` into the JSON body sent to the endpoint.
pub fn encode_request(query: &str) -> std::result::Result<Vec<u8>, ReportError> {
    serde_json::to_vec(&GraphQlRequest { query }).map_err(ReportError::RequestBuild)
}

/// A single JSON POST returning the raw response body.
pub trait Transport {
    fn post_json(&self, payload: Vec<u8>) -> std::result::Result<Vec<u8>, ReportError>;
}

/// Blocking HTTP client bound to one endpoint.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    endpoint: String,
}

impl ApiClient {
    /// Create an ApiClient configured from `AIRING_API_URL` and
    /// `AIRING_TIMEOUT_SECS`, falling back to the public endpoint and a
    /// 10 second timeout.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("AIRING_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        let timeout = parse_timeout(std::env::var("AIRING_TIMEOUT_SECS").ok().as_deref())?;
        Self::new(endpoint, timeout)
    }

    /// Build a client for `endpoint` with the given request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(client, endpoint))
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        ApiClient {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for ApiClient {
    /// POST the payload and read the whole body. The response (and with it
    /// the connection) is dropped on every path out of this function.
    fn post_json(&self, payload: Vec<u8>) -> std::result::Result<Vec<u8>, ReportError> {
        tracing::debug!(endpoint = %self.endpoint, bytes = payload.len(), "POST airing query");
        let res = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .map_err(ReportError::Transport)?;
        let res = res.error_for_status().map_err(ReportError::Transport)?;
        let body = res.bytes().map_err(ReportError::ResponseRead)?;
        tracing::debug!(bytes = body.len(), "received response body");
        Ok(body.to_vec())
    }
}
