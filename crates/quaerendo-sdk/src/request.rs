//! Tri-state result of an outbound request.

use crate::error::SdkError;

/// State of a request as seen by the view that issued it
///
/// Exactly one state holds at a time. `Pending` and `Failed` are distinct
/// from a loaded entity whose fields happen to be empty.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    /// No response yet
    Pending,
    /// Response decoded successfully
    Loaded(T),
    /// Network failure, non-2xx status, or malformed payload
    Failed(SdkError),
}

impl<T> RequestState<T> {
    /// Whether the request has not resolved yet
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// The loaded payload, if any
    pub fn loaded(&self) -> Option<&T> {
        match self {
            RequestState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any
    pub fn error(&self) -> Option<&SdkError> {
        match self {
            RequestState::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Transform the loaded payload, keeping pending and failed states
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> RequestState<U> {
        match self {
            RequestState::Pending => RequestState::Pending,
            RequestState::Loaded(value) => RequestState::Loaded(f(value)),
            RequestState::Failed(e) => RequestState::Failed(e),
        }
    }
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Pending
    }
}

impl<T> From<Result<T, SdkError>> for RequestState<T> {
    fn from(result: Result<T, SdkError>) -> Self {
        match result {
            Ok(value) => RequestState::Loaded(value),
            Err(e) => RequestState::Failed(e),
        }
    }
}
