use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

const DEFAULT_LANGUAGE: &str = "en";

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub southwest: LatLng,
    pub northeast: LatLng,
}

impl Square {
    fn contains(&self, point: LatLng) -> bool {
        (self.southwest.lat..=self.northeast.lat).contains(&point.lat)
            && (self.southwest.lng..=self.northeast.lng).contains(&point.lng)
    }
}

/// Success body, shaped like the real service's `format=json` reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub country: String,
    pub square: Square,
    pub nearest_place: String,
    pub coordinates: LatLng,
    pub words: String,
    pub language: String,
    pub map: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// A service-level rejection, rendered as `{"error": {...}}` with `status`.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl ApiFailure {
    fn bad_request(code: &'static str, message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code,
            message,
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message.to_string(),
            },
        };
        (self.status, Json(body)).into_response()
    }
}

/// One grid square and its address in each supported language.
#[derive(Clone, Debug)]
pub struct Entry {
    pub country: String,
    pub square: Square,
    pub coordinates: LatLng,
    pub localized: Vec<Localized>,
}

#[derive(Clone, Debug)]
pub struct Localized {
    pub language: String,
    pub words: String,
    pub nearest_place: String,
}

impl Entry {
    fn conversion(&self, localized: &Localized) -> Conversion {
        Conversion {
            country: self.country.clone(),
            square: self.square,
            nearest_place: localized.nearest_place.clone(),
            coordinates: self.coordinates,
            words: localized.words.clone(),
            language: localized.language.clone(),
            map: format!("https://w3w.co/{}", localized.words),
        }
    }
}

/// The squares the mock knows about.
pub fn gazetteer() -> Vec<Entry> {
    vec![Entry {
        country: "GB".to_string(),
        square: Square {
            southwest: LatLng {
                lat: 51.520833,
                lng: -0.195543,
            },
            northeast: LatLng {
                lat: 51.52086,
                lng: -0.195499,
            },
        },
        coordinates: LatLng {
            lat: 51.520847,
            lng: -0.195521,
        },
        localized: vec![
            Localized {
                language: "en".to_string(),
                words: "filled.count.soap".to_string(),
                nearest_place: "Bayswater, London".to_string(),
            },
            Localized {
                language: "fr".to_string(),
                words: "conduite.richissime.empâter".to_string(),
                nearest_place: "Bayswater, Grand Londres".to_string(),
            },
        ],
    }]
}

pub struct MockState {
    pub api_key: String,
    pub entries: Vec<Entry>,
}

pub type Shared = Arc<MockState>;

pub fn app(api_key: &str) -> Router {
    let state: Shared = Arc::new(MockState {
        api_key: api_key.to_string(),
        entries: gazetteer(),
    });
    Router::new()
        .route("/convert-to-coordinates", get(convert_to_coordinates))
        .route("/convert-to-3wa", get(convert_to_3wa))
        .with_state(state)
}

pub async fn run(listener: TcpListener, api_key: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(api_key)).await
}

type Params = HashMap<String, String>;

fn check_common(state: &MockState, params: &Params) -> Result<(), ApiFailure> {
    if params.get("key") != Some(&state.api_key) {
        return Err(ApiFailure {
            status: StatusCode::UNAUTHORIZED,
            code: "InvalidKey",
            message: "Authentication failed; invalid API key",
        });
    }
    match params.get("format").map(String::as_str) {
        None | Some("json") | Some("geojson") => Ok(()),
        Some(_) => Err(ApiFailure::bad_request(
            "BadFormat",
            "format must be json or geojson",
        )),
    }
}

async fn convert_to_coordinates(
    State(state): State<Shared>,
    Query(params): Query<Params>,
) -> Result<Json<Conversion>, ApiFailure> {
    check_common(&state, &params)?;

    let words = params
        .get("words")
        .ok_or(ApiFailure::bad_request("MissingWords", "words must be specified"))?;
    if words.split('.').filter(|w| !w.is_empty()).count() != 3 {
        return Err(ApiFailure::bad_request(
            "BadWords",
            "Invalid or non-existent 3 word address",
        ));
    }

    state
        .entries
        .iter()
        .find_map(|entry| {
            entry
                .localized
                .iter()
                .find(|l| &l.words == words)
                .map(|l| entry.conversion(l))
        })
        .map(Json)
        .ok_or(ApiFailure::bad_request(
            "BadWords",
            "Invalid or non-existent 3 word address",
        ))
}

async fn convert_to_3wa(
    State(state): State<Shared>,
    Query(params): Query<Params>,
) -> Result<Json<Conversion>, ApiFailure> {
    check_common(&state, &params)?;

    let point = params
        .get("coordinates")
        .and_then(|raw| parse_lat_lng(raw))
        .ok_or(ApiFailure::bad_request(
            "BadCoordinates",
            "coordinates must be two comma separated lat,lng coordinates",
        ))?;
    if !(-90.0..=90.0).contains(&point.lat) {
        return Err(ApiFailure::bad_request(
            "BadCoordinates",
            "latitude must be >=-90 and <= 90",
        ));
    }
    let language = params
        .get("language")
        .map(String::as_str)
        .unwrap_or(DEFAULT_LANGUAGE);

    let entry = state
        .entries
        .iter()
        .find(|e| e.square.contains(point))
        .ok_or(ApiFailure::bad_request(
            "BadCoordinates",
            "no known square contains these coordinates",
        ))?;
    let localized = entry
        .localized
        .iter()
        .find(|l| l.language == language)
        .ok_or(ApiFailure::bad_request(
            "BadLanguage",
            "language is not available for this square",
        ))?;

    Ok(Json(entry.conversion(localized)))
}

fn parse_lat_lng(raw: &str) -> Option<LatLng> {
    let (lat, lng) = raw.split_once(',')?;
    Some(LatLng {
        lat: lat.trim().parse().ok()?,
        lng: lng.trim().parse().ok()?,
    })
}
