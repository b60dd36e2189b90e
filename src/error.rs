//! Error types for the PokeAPI client
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these errors come from the network and decoding paths.

use thiserror::Error;

// == Fetch Error Enum ==
/// Unified error type for API fetches.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (connection, timeout, body read)
    #[error("error making GET request: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status
    #[error("response failed with status code: {status} and body: {body}")]
    Status { status: u16, body: String },

    /// A fresh response body did not match the expected shape
    #[error("error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Caller supplied an unusable argument
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FetchError {
    /// The upstream status code, if the failure was an HTTP error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for API fetches.
pub type Result<T> = std::result::Result<T, FetchError>;
