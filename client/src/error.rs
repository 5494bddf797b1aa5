//! Client error types and result alias.

use thiserror::Error;

/// Client result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by Artifactory API operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Invalid or ambiguous client configuration at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A caller-supplied argument failed a precondition.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The server answered with a non-expected HTTP status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// A success response carried a body that was not valid JSON.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request could not be completed at the transport level.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// HTTP status code for server-rejected requests, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server answered 404 for the requested resource.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
