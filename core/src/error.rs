//! Error types for the what3words client.
//!
//! # Design
//! Errors are grouped by who is at fault. `Configuration` and `InvalidInput`
//! are caller misuse and are raised before anything touches the network.
//! `Transport` means the service could not be reached. `MalformedResponse`
//! means it was reached but answered with something that is not the expected
//! JSON. `Service` carries the service's own `code`/`message` pair verbatim,
//! so callers can match on `code`.

use std::fmt;

use thiserror::Error;

/// Errors returned by every `W3wClient` operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// DNS, connect, timeout or body read failure.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The body could not be decoded as the envelope expected for `status`.
    #[error("malformed response (HTTP {status}): {source}")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    /// Only transport failures are worth retrying. The client itself never
    /// retries; this is advisory for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Misconfiguration of the client or of a request URL.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("invalid or empty API key provided")]
    NoApiKey,

    #[error("invalid w3w route")]
    EmptyRoute,

    #[error("invalid w3w API URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Caller-supplied input rejected before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("an empty word was provided at position {position}")]
    EmptyWord { position: usize },

    #[error("invalid number of words provided: expected 3, found {found}")]
    WordCount { found: usize },
}

/// An error reported by the what3words service, e.g. `BadWords`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub code: String,
    pub message: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ServiceError {}
