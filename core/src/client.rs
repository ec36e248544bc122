//! The what3words client: words to coordinates and coordinates to words.
//!
//! # Design
//! `W3wClient` holds only the API key and a transport, so one instance can
//! serve any number of sequential or concurrent calls. Each operation is
//! also exposed as a `build_*` step that produces the request URL and a
//! `parse_response` step that consumes an `HttpResponse`; the `convert_*`
//! methods run both with the client's transport in between. Callers that do
//! their own I/O can use the two halves directly.

use log::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, ServiceError};
use crate::http::{HttpResponse, Transport, UreqTransport};
use crate::query::QueryUrl;
use crate::response::{decode, Envelope};
use crate::types::{ApiKey, ConversionOptions, ConversionResult, Coordinates, ThreeWordAddress};

pub const CONVERT_TO_WORDS_ROUTE: &str = "convert-to-3wa";
pub const CONVERT_TO_COORDINATES_ROUTE: &str = "convert-to-coordinates";

const PARAM_WORDS: &str = "words";
const PARAM_COORDINATES: &str = "coordinates";
const PARAM_LANGUAGE: &str = "language";
const PARAM_FORMAT: &str = "format";

/// Client for the what3words v3 conversion API.
#[derive(Debug, Clone)]
pub struct W3wClient<T = UreqTransport> {
    key: ApiKey,
    transport: T,
}

impl W3wClient<UreqTransport> {
    /// Client with the default configuration (30 second timeout).
    ///
    /// Fails with `ConfigurationError::NoApiKey` if `key` is empty or blank.
    pub fn new(key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(key, ClientConfig::default())
    }

    pub fn with_config(key: impl Into<String>, config: ClientConfig) -> Result<Self, ApiError> {
        Self::with_transport(key, UreqTransport::new(config.timeout))
    }
}

impl<T> W3wClient<T> {
    /// Client that sends requests through `transport`.
    pub fn with_transport(key: impl Into<String>, transport: T) -> Result<Self, ApiError> {
        Ok(Self {
            key: ApiKey::new(key)?,
            transport,
        })
    }

    /// Build the `convert-to-coordinates` URL for `words`.
    ///
    /// Every word must be non-blank; this is checked before anything else.
    pub fn build_convert_to_coordinates(
        &self,
        words: &ThreeWordAddress,
        options: &ConversionOptions,
    ) -> Result<QueryUrl, ApiError> {
        words.validate()?;

        let mut url = QueryUrl::new(
            self.key.expose(),
            options.base_url.as_deref(),
            CONVERT_TO_COORDINATES_ROUTE,
        )?;
        url.add_param(PARAM_WORDS, &words.to_string());
        url.add_param(PARAM_FORMAT, options.format.as_str());
        Ok(url)
    }

    /// Build the `convert-to-3wa` URL for `coordinates`. `language` is sent
    /// only when set and non-empty.
    pub fn build_convert_to_words(
        &self,
        coordinates: Coordinates,
        options: &ConversionOptions,
    ) -> Result<QueryUrl, ApiError> {
        let mut url = QueryUrl::new(
            self.key.expose(),
            options.base_url.as_deref(),
            CONVERT_TO_WORDS_ROUTE,
        )?;
        url.add_param(PARAM_COORDINATES, &coordinates.to_query_value());
        if let Some(language) = options.language.as_deref().filter(|l| !l.is_empty()) {
            url.add_param(PARAM_LANGUAGE, language);
        }
        url.add_param(PARAM_FORMAT, options.format.as_str());
        Ok(url)
    }

    /// Decode a response from either route into a result or a typed error.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ConversionResult, ApiError> {
        match decode(&response) {
            Ok(Envelope::Success(envelope)) => Ok(envelope.into()),
            Ok(Envelope::Failure(envelope)) => {
                let err = ServiceError::from(envelope);
                warn!("what3words rejected request (HTTP {}): {err}", response.status);
                Err(err.into())
            }
            Err(err) => {
                warn!("{err}");
                Err(err)
            }
        }
    }
}

impl<T: Transport> W3wClient<T> {
    /// Resolve a three-word address to its coordinates and square.
    pub fn convert_to_coordinates(
        &self,
        words: &ThreeWordAddress,
        options: &ConversionOptions,
    ) -> Result<ConversionResult, ApiError> {
        let url = self.build_convert_to_coordinates(words, options)?;
        self.execute(&url)
    }

    /// Resolve coordinates to the three-word address of their square.
    pub fn convert_to_words(
        &self,
        coordinates: Coordinates,
        options: &ConversionOptions,
    ) -> Result<ConversionResult, ApiError> {
        let url = self.build_convert_to_words(coordinates, options)?;
        self.execute(&url)
    }

    fn execute(&self, url: &QueryUrl) -> Result<ConversionResult, ApiError> {
        // Only the path is logged; the query carries the API key.
        debug!("GET {}", url.path());
        let response = self.transport.get(&url.to_url())?;
        debug!("GET {} -> HTTP {}", url.path(), response.status);
        self.parse_response(response)
    }
}
