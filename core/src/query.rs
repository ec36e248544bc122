//! Query URL construction for what3words API routes.
//!
//! # Design
//! Parameters are collected in a `BTreeMap`, so the serialized query is
//! sorted by parameter name no matter the order of `add_param` calls. Values
//! are `application/x-www-form-urlencoded` encoded. The same inputs always
//! produce a byte-identical URL, which is what the tests pin against.

use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use url::form_urlencoded;
use url::Url;

use crate::error::{ApiError, ConfigurationError};

/// Published v3 endpoint used when no override is supplied.
pub const DEFAULT_API_URL: &str = "https://api.what3words.com/v3";

const KEY_PARAM: &str = "key";

/// A route URL that accumulates query parameters.
///
/// The `key` parameter is set once by [`QueryUrl::new`] and cannot be added
/// again.
#[derive(Debug, Clone)]
pub struct QueryUrl {
    url: Url,
    params: BTreeMap<String, Vec<String>>,
}

impl QueryUrl {
    /// Start a URL for `route` under `base_url` (or [`DEFAULT_API_URL`]).
    ///
    /// An empty override counts as absent. A trailing `/` on the base is
    /// dropped before the route is appended.
    pub fn new(api_key: &str, base_url: Option<&str>, route: &str) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ConfigurationError::NoApiKey.into());
        }
        if route.is_empty() {
            return Err(ConfigurationError::EmptyRoute.into());
        }

        let base = base_url
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        let url = Url::parse(&format!("{}/{route}", base.trim_end_matches('/'))).map_err(
            |source| ConfigurationError::InvalidBaseUrl {
                url: base.to_string(),
                source,
            },
        )?;

        let mut params = BTreeMap::new();
        params.insert(KEY_PARAM.to_string(), vec![api_key.to_string()]);
        Ok(Self { url, params })
    }

    /// Append a value for `name`. Repeated names keep every value in call order.
    pub fn add_param(&mut self, name: &str, value: &str) {
        if name == KEY_PARAM {
            warn!("ignoring attempt to add a second `{KEY_PARAM}` parameter");
            return;
        }
        self.params
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }

    /// The encoded `name=value&...` query, sorted by name.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, values) in &self.params {
            for value in values {
                serializer.append_pair(name, value);
            }
        }
        serializer.finish()
    }

    /// Path of the route without the query, safe to log.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    pub fn to_url(&self) -> Url {
        let mut url = self.url.clone();
        url.set_query(Some(&self.query_string()));
        url
    }
}

impl fmt::Display for QueryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_url())
    }
}
