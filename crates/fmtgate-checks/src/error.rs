//! Error types for the checks protocol layer.

use thiserror::Error;

/// Errors that can occur while talking to the check-run service.
///
/// All variants carry the underlying detail as an opaque message; callers
/// decide whether to escalate, never to retry here.
#[derive(Error, Debug)]
pub enum ChecksError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The service answered with a non-success status.
    #[error("check-run request rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 2xx but the body did not match the contract.
    #[error("failed to decode check-run response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ChecksError {
    fn from(err: reqwest::Error) -> Self {
        ChecksError::Http(err.to_string())
    }
}
