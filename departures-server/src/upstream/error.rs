//! Upstream client error types.

/// Errors from fetching a site's departures.
///
/// Callers generally treat every variant the same way; the variants exist
/// so the message says which step failed.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Network failure: connection refused, DNS, timeout, invalid URL
    #[error("error making request: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body could not be read
    #[error("error reading response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body was not a valid departures payload
    #[error("error parsing JSON: {message}")]
    Json {
        message: String,
        /// Leading part of the offending body, for logs
        body: String,
    },
}

impl UpstreamError {
    /// Build a [`UpstreamError::Json`] keeping a bounded excerpt of the body.
    pub(crate) fn json(err: &serde_json::Error, body: &str) -> Self {
        UpstreamError::Json {
            message: err.to_string(),
            body: body.chars().take(500).collect(),
        }
    }

    /// The captured body excerpt, for JSON decode failures.
    pub fn body_excerpt(&self) -> Option<&str> {
        match self {
            UpstreamError::Json { body, .. } => Some(body),
            _ => None,
        }
    }
}
