//! Error types for the Quran API client.

use thiserror::Error;

/// Errors that can occur when talking to the Quran API.
#[derive(Error, Debug)]
pub enum QuranApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body, when readable
        message: String,
    },

    /// The API reported a failure status in an otherwise successful response
    #[error("API reported failure for {path}")]
    FailureStatus {
        /// Request path that failed
        path: String,
    },

    /// Failed to parse a response body
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Requested verse range is empty or inverted
    #[error("Invalid verse range: {from}-{to}")]
    InvalidRange {
        /// Range start (1-based, inclusive)
        from: u32,
        /// Range end (inclusive)
        to: u32,
    },

    /// Invalid base URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The response carried no usable data
    #[error("Empty response for {path}")]
    EmptyResponse {
        /// Request path that produced no data
        path: String,
    },
}

/// Result type for Quran API operations.
pub type Result<T> = std::result::Result<T, QuranApiError>;
