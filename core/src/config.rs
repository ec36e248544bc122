//! Client-level configuration.
//!
//! Settings here are fixed for the lifetime of a `W3wClient`. Per-call
//! choices (endpoint override, format, language) live in
//! `ConversionOptions` instead.

use std::time::Duration;

use crate::http::DEFAULT_TIMEOUT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on one whole request/response exchange.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
