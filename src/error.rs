//! Error types for cf-ddns.

use thiserror::Error;

/// Result type alias for cf-ddns.
pub type Result<T> = std::result::Result<T, DdnsError>;

/// Fatal errors of a single update run.
///
/// A provider answering `success: false` is not an error; see
/// [`crate::reporter::Report::Rejected`].
#[derive(Error, Debug)]
pub enum DdnsError {
    /// Command line usage error.
    #[error("{0}")]
    Usage(String),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error, including timeouts.
    #[error("Network error: {0}")]
    Network(String),

    /// A remote service answered with a body we could not decode.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for DdnsError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DdnsError::Network(format!("request timed out: {}", e))
        } else {
            DdnsError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for DdnsError {
    fn from(e: serde_json::Error) -> Self {
        DdnsError::Decode(e.to_string())
    }
}
