//! Error types for observation fetching.

use thiserror::Error;

/// Errors that can occur while fetching one observation.
///
/// The display text is what the monitor shows for a failed tick.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with an empty body (station offline or bad key).
    #[error("Received empty response from server")]
    EmptyResponse,

    /// Valid JSON, but no observation for the station.
    #[error("No observation data found for '{0}'")]
    NoObservations(String),

    /// The body was not the expected JSON.
    #[error("Invalid response format. Check API key and station ID")]
    InvalidFormat,

    /// Non-success HTTP status.
    #[error("Network request failed: server returned {0}")]
    Status(reqwest::StatusCode),

    /// Timeout waiting for response.
    #[error("Network request failed: request timed out")]
    Timeout,

    /// Connection or transport failure.
    #[error("Network request failed: {0}")]
    Network(String),

    /// Local file could not be read.
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = err.status() {
            FetchError::Status(status)
        } else if err.is_decode() {
            FetchError::InvalidFormat
        } else {
            FetchError::Network(err.to_string())
        }
    }
}
