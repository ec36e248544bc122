//! Domain types exposed to callers of the what3words client.
//!
//! # Design
//! These are defined independently of the wire envelopes in `response`; the
//! `From` impls at the bottom of this file are the only place the two shapes
//! meet. `ConversionResult` serializes back to the service's field names so
//! it can be printed or forwarded as-is.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, InvalidInputError, ServiceError};
use crate::response::{ErrorEnvelope, SuccessEnvelope, WireLatLng};

/// Separator between the words of a serialized three-word address.
pub const WORDS_DELIMITER: char = '.';

/// A three-word address such as `filled.count.soap`.
///
/// Construction does not validate; [`ThreeWordAddress::validate`] runs before
/// any request is built. Parsing with [`FromStr`] validates eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThreeWordAddress {
    words: [String; 3],
}

impl ThreeWordAddress {
    pub fn new(
        first: impl Into<String>,
        second: impl Into<String>,
        third: impl Into<String>,
    ) -> Self {
        Self {
            words: [first.into(), second.into(), third.into()],
        }
    }

    pub fn words(&self) -> &[String; 3] {
        &self.words
    }

    /// Fails on the first word that is empty or only whitespace. Positions
    /// are 1-based.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        match self.words.iter().position(|w| w.trim().is_empty()) {
            Some(index) => Err(InvalidInputError::EmptyWord {
                position: index + 1,
            }),
            None => Ok(()),
        }
    }
}

impl<S: Into<String>> From<[S; 3]> for ThreeWordAddress {
    fn from(words: [S; 3]) -> Self {
        let [first, second, third] = words;
        Self::new(first, second, third)
    }
}

impl fmt::Display for ThreeWordAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second, third] = &self.words;
        write!(f, "{first}{WORDS_DELIMITER}{second}{WORDS_DELIMITER}{third}")
    }
}

impl FromStr for ThreeWordAddress {
    type Err = InvalidInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(WORDS_DELIMITER).collect();
        let [first, second, third] = parts[..] else {
            return Err(InvalidInputError::WordCount { found: parts.len() });
        };
        let address = Self::new(first, second, third);
        address.validate()?;
        Ok(address)
    }
}

/// A latitude/longitude pair. No range checks; the service is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` with six fixed decimals, never scientific notation.
    pub fn to_query_value(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

/// The grid square a three-word address refers to.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Square {
    pub southwest: Coordinates,
    pub northeast: Coordinates,
}

/// Normalized result of either conversion.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub country: String,
    pub square: Square,
    pub nearest_place: String,
    pub coordinates: Coordinates,
    pub words: String,
    pub language: String,
    pub map: String,
}

/// Response encoding requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    GeoJson,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Json => "json",
            ResponseFormat::GeoJson => "geojson",
        }
    }
}

/// Only the exact token `geojson` selects [`ResponseFormat::GeoJson`];
/// every other value falls back to JSON and is never forwarded.
impl From<&str> for ResponseFormat {
    fn from(token: &str) -> Self {
        match token {
            "geojson" => ResponseFormat::GeoJson,
            _ => ResponseFormat::Json,
        }
    }
}

impl From<Option<&str>> for ResponseFormat {
    fn from(token: Option<&str>) -> Self {
        token.map(Self::from).unwrap_or_default()
    }
}

/// Per-call options. `Default` means: published endpoint, JSON, no language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionOptions {
    pub base_url: Option<String>,
    pub format: ResponseFormat,
    /// Two-letter language code. Only used by coordinates-to-words.
    pub language: Option<String>,
}

impl ConversionOptions {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<ResponseFormat>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// An API key that never shows up in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ConfigurationError::NoApiKey);
        }
        Ok(Self(key))
    }

    /// The raw key, for placing into a request URL.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey([REDACTED])")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED API KEY]")
    }
}

impl From<WireLatLng> for Coordinates {
    fn from(wire: WireLatLng) -> Self {
        Self {
            lat: wire.lat,
            lng: wire.lng,
        }
    }
}

impl From<SuccessEnvelope> for ConversionResult {
    fn from(envelope: SuccessEnvelope) -> Self {
        Self {
            country: envelope.country,
            square: Square {
                southwest: envelope.square.southwest.into(),
                northeast: envelope.square.northeast.into(),
            },
            nearest_place: envelope.nearest_place,
            coordinates: envelope.coordinates.into(),
            words: envelope.words,
            language: envelope.language,
            map: envelope.map,
        }
    }
}

impl From<ErrorEnvelope> for ServiceError {
    fn from(envelope: ErrorEnvelope) -> Self {
        Self {
            code: envelope.error.code,
            message: envelope.error.message,
        }
    }
}
