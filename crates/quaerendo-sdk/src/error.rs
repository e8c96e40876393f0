//! Error types for the Quaerendo SDK.

use thiserror::Error;

/// SDK operation errors
///
/// Variants carry rendered messages so the error can be cloned into a
/// [`RequestState::Failed`](crate::RequestState::Failed) and kept by a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Server answered with a non-2xx status
    #[error("HTTP {status}: {message}")]
    HttpError {
        /// Status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Response body was not the expected JSON shape
    #[error("Malformed payload: {0}")]
    PayloadError(String),

    /// Request could not be built or sent
    #[error("Request error: {0}")]
    RequestError(String),

    /// Durable token storage could not be read or written
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Login or registration was rejected
    #[error("Authentication error: {0}")]
    AuthError(String),
}

impl SdkError {
    /// Whether the server rejected the request for lack of valid credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SdkError::HttpError { status: 401 | 403, .. })
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            SdkError::PayloadError(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) => SdkError::HttpError {
                    status: status.as_u16(),
                    message: e.to_string(),
                },
                None => SdkError::RequestError(e.to_string()),
            }
        } else {
            SdkError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::PayloadError(format!("JSON parsing error: {}", e))
    }
}

impl From<std::io::Error> for SdkError {
    fn from(e: std::io::Error) -> Self {
        SdkError::StorageError(e.to_string())
    }
}
