//! Error types for the Suburb client.
//!
//! # Design
//! There is no status-code variant. A non-2xx response with a JSON body
//! decodes successfully and reaches the caller as data; only encoding,
//! decoding and transport failures are errors. Each variant carries the
//! underlying error unchanged.

use thiserror::Error;

/// The native error of whichever transport executed the request.
///
/// Callers can `downcast_ref` to `reqwest::Error`, `ureq::Error` or their
/// own transport's error type.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body is not valid JSON for the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The transport could not complete the round trip.
    #[error(transparent)]
    Transport(TransportError),
}

impl ApiError {
    pub fn is_decode(&self) -> bool {
        matches!(self, ApiError::Decode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}
