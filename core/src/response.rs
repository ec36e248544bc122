//! Wire envelopes returned by the what3words API and their decoder.
//!
//! # Design
//! The status code alone picks the envelope: 200 is always the success shape,
//! anything else is always the error shape. The body is never inspected to
//! guess which one it is.
//!
//! Every object in either envelope must arrive as a JSON object. serde's
//! derived impls would also fill a struct from an array by position, so
//! bodies and nested objects go through `Map` first.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::HttpResponse;

const STATUS_OK: u16 = 200;

/// The body of a successful conversion.
///
/// Missing fields default to empty/zero; a field present with the wrong type
/// is a decode error.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuccessEnvelope {
    pub country: String,
    #[serde(deserialize_with = "object")]
    pub square: WireSquare,
    pub nearest_place: String,
    #[serde(deserialize_with = "object")]
    pub coordinates: WireLatLng,
    pub words: String,
    pub language: String,
    pub map: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct WireSquare {
    #[serde(deserialize_with = "object")]
    pub southwest: WireLatLng,
    #[serde(deserialize_with = "object")]
    pub northeast: WireLatLng,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct WireLatLng {
    pub lat: f64,
    pub lng: f64,
}

/// `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(deserialize_with = "object")]
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// A decoded response body, tagged by which branch the status selected.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Success(SuccessEnvelope),
    Failure(ErrorEnvelope),
}

/// Decode `response.body` into the envelope its status calls for.
pub fn decode(response: &HttpResponse) -> Result<Envelope, ApiError> {
    let malformed = |source: serde_json::Error| ApiError::MalformedResponse {
        status: response.status,
        source,
    };

    if response.status == STATUS_OK {
        from_object(&response.body)
            .map(Envelope::Success)
            .map_err(malformed)
    } else {
        from_object(&response.body)
            .map(Envelope::Failure)
            .map_err(malformed)
    }
}

fn from_object<T: DeserializeOwned>(body: &str) -> Result<T, serde_json::Error> {
    let map: Map<String, Value> = serde_json::from_str(body)?;
    serde_json::from_value(Value::Object(map))
}

fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let map = Map::<String, Value>::deserialize(deserializer)?;
    serde_json::from_value(Value::Object(map)).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn ok_status_decodes_partial_success_body() {
        let envelope = decode(&response(200, r#"{"coordinates":{"lat":1,"lng":2}}"#)).unwrap();
        let Envelope::Success(success) = envelope else {
            panic!("expected success envelope");
        };
        assert_eq!(success.coordinates, WireLatLng { lat: 1.0, lng: 2.0 });
        assert_eq!(success.words, "");
        assert_eq!(success.square, WireSquare::default());
    }

    #[test]
    fn ok_status_decodes_full_success_body() {
        let body = r#"{
            "country": "GB",
            "square": {
                "southwest": {"lng": -0.195543, "lat": 51.520833},
                "northeast": {"lng": -0.195499, "lat": 51.52086}
            },
            "nearestPlace": "Bayswater, London",
            "coordinates": {"lng": -0.195521, "lat": 51.520847},
            "words": "filled.count.soap",
            "language": "en",
            "map": "https://w3w.co/filled.count.soap"
        }"#;
        let Envelope::Success(success) = decode(&response(200, body)).unwrap() else {
            panic!("expected success envelope");
        };
        assert_eq!(success.nearest_place, "Bayswater, London");
        assert_eq!(success.square.northeast.lat, 51.52086);
        assert_eq!(success.map, "https://w3w.co/filled.count.soap");
    }

    #[test]
    fn error_status_decodes_error_body() {
        let body = r#"{"error":{"code":"BadWords","message":"Invalid or non-existent 3 word address"}}"#;
        let envelope = decode(&response(400, body)).unwrap();
        assert_eq!(
            envelope,
            Envelope::Failure(ErrorEnvelope {
                error: ErrorDetail {
                    code: "BadWords".to_string(),
                    message: "Invalid or non-existent 3 word address".to_string(),
                },
            })
        );
    }

    #[test]
    fn status_decides_shape_not_body() {
        // An error-shaped body with 200 is still a (defaulted) success.
        let body = r#"{"error":{"code":"BadWords","message":"nope"}}"#;
        assert!(matches!(
            decode(&response(200, body)).unwrap(),
            Envelope::Success(_)
        ));

        // A success-shaped body with 500 lacks `error` and is malformed.
        let err = decode(&response(500, r#"{"words":"a.b.c"}"#)).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 500, .. }));
    }

    #[test]
    fn empty_body_is_malformed_on_either_branch() {
        for status in [200, 500] {
            let err = decode(&response(status, "")).unwrap_err();
            assert!(
                matches!(err, ApiError::MalformedResponse { status: s, .. } if s == status),
                "status {status}: {err:?}"
            );
        }
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let err = decode(&response(200, r#"{"coordinates":{"lat":"north","lng":2}}"#)).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 200, .. }));

        let err = decode(&response(401, r#"{"error":{"code":7,"message":"x"}}"#)).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 401, .. }));
    }

    #[test]
    fn arrays_are_malformed_where_objects_are_expected() {
        for body in [
            "[]",
            r#"["GB"]"#,
            r#"{"coordinates":[1,2]}"#,
            r#"{"square":{"southwest":[1,2],"northeast":{"lat":1,"lng":2}}}"#,
            r#"{"square":[[1,2],[3,4]]}"#,
        ] {
            let err = decode(&response(200, body)).unwrap_err();
            assert!(
                matches!(err, ApiError::MalformedResponse { status: 200, .. }),
                "{body}: {err:?}"
            );
        }

        for body in [r#"[["BadWords","nope"]]"#, r#"{"error":["BadWords","nope"]}"#] {
            let err = decode(&response(400, body)).unwrap_err();
            assert!(
                matches!(err, ApiError::MalformedResponse { status: 400, .. }),
                "{body}: {err:?}"
            );
        }
    }

    #[test]
    fn null_nested_object_is_malformed() {
        let err = decode(&response(200, r#"{"coordinates":null}"#)).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse { status: 200, .. }));
    }
}
