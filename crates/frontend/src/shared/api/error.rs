use thiserror::Error;

/// Failure below the HTTP status level: the request never produced a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request aborted")]
    Aborted,
    #[error("failed to read response body: {0}")]
    Body(String),
}
