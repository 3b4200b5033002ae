// Error taxonomy for a single run of the pipeline. Every variant is fatal:
// the driver prints it and exits without a partial report.

use thiserror::Error;

/// Failure of one pipeline stage. The `Display` form is the context label
/// followed by the underlying cause.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The request envelope could not be serialized.
    #[error("Error creating request: {0}")]
    RequestBuild(#[source] serde_json::Error),

    /// DNS, connect, TLS, timeout or non-success HTTP status.
    #[error("Error making request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response body stream failed mid-read.
    #[error("Error reading response: {0}")]
    ResponseRead(#[source] reqwest::Error),

    /// The payload is not the expected JSON envelope.
    #[error("Error parsing response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The API answered with GraphQL errors instead of data.
    #[error("Error parsing response: API returned errors: {0}")]
    Api(String),
}

impl ReportError {
    /// Short human-readable label for the failed stage.
    pub fn label(&self) -> &'static str {
        match self {
            ReportError::RequestBuild(_) => "Error creating request",
            ReportError::Transport(_) => "Error making request",
            ReportError::ResponseRead(_) => "Error reading response",
            ReportError::Decode(_) | ReportError::Api(_) => "Error parsing response",
        }
    }
}
