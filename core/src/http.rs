//! Blocking HTTP transport.
//!
//! # Design
//! `HttpResponse` is plain data: a status code and the fully read body. The
//! client never interprets transport-level details beyond that, which keeps
//! decoding testable without a network. `Transport` is the seam between the
//! two; `UreqTransport` is the production implementation and tests plug in
//! canned responses instead.
//!
//! Status codes are returned as data rather than errors so a 4xx/5xx body
//! can still be decoded into the service's error envelope.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ApiError;

/// Default request timeout for the whole exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Performs one GET and returns the status and full body.
///
/// Implementations must release the connection on every path, including
/// errors, and must not treat non-2xx statuses as failures.
pub trait Transport {
    fn get(&self, url: &Url) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> Result<HttpResponse, ApiError> {
        (**self).get(url)
    }
}

/// `Transport` backed by a pooled `ureq::Agent`.
///
/// Cloning shares the agent and its connection pool.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl Transport for UreqTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, ApiError> {
        let mut response = self.agent.get(url.as_str()).call()?;
        let status = response.status().as_u16();
        // Reading to the end hands the connection back to the pool; on error
        // the response is dropped and the connection closed.
        let body = response.body_mut().read_to_string()?;
        Ok(HttpResponse { status, body })
    }
}
