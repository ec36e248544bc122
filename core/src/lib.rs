//! Blocking client for the what3words v3 conversion API.
//!
//! # Overview
//! Converts a three-word address to coordinates (`convert-to-coordinates`)
//! and coordinates to a three-word address (`convert-to-3wa`). Each call is
//! one HTTPS GET: validate input, build the query URL, send it, decode the
//! body by status code, and map it into a `ConversionResult` or an `ApiError`.
//!
//! # Design
//! - `W3wClient` holds only the API key and its transport; it has no per-call
//!   state and is safe to share.
//! - `build_*` / `parse_response` expose the two halves of each call, with
//!   `convert_*` running them through a `Transport`.
//! - Wire envelopes (`response`) and caller-facing types (`types`) are kept
//!   separate; the mapping between them is a set of `From` impls.
//! - Nothing is retried or cached.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod response;
pub mod types;

pub use client::{W3wClient, CONVERT_TO_COORDINATES_ROUTE, CONVERT_TO_WORDS_ROUTE};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigurationError, InvalidInputError, ServiceError};
pub use http::{HttpResponse, Transport, UreqTransport};
pub use query::{QueryUrl, DEFAULT_API_URL};
pub use types::{
    ApiKey, ConversionOptions, ConversionResult, Coordinates, ResponseFormat, Square,
    ThreeWordAddress,
};
