//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected request path and query,
//! a simulated response, and the expected parse result or error kind. Query
//! strings are compared byte for byte since their encoding is deterministic.

use serde_json::Value;
use w3w_core::{
    ApiError, ConversionOptions, ConversionResult, Coordinates, HttpResponse, InvalidInputError,
    QueryUrl, ThreeWordAddress, W3wClient,
};

const API_KEY: &str = "test-key";
const BASE_URL: &str = "http://localhost:3000";

fn client() -> W3wClient {
    W3wClient::new(API_KEY).unwrap()
}

fn options(case: &Value) -> ConversionOptions {
    let raw = &case["options"];
    let mut options = ConversionOptions::default()
        .with_base_url(BASE_URL)
        .with_format(raw["format"].as_str());
    if let Some(language) = raw["language"].as_str() {
        options = options.with_language(language);
    }
    options
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_request(name: &str, url: &QueryUrl, case: &Value) {
    let expected = &case["expected_request"];
    let url = url.to_url();
    assert_eq!(url.path(), expected["path"].as_str().unwrap(), "{name}: path");
    assert_eq!(url.query(), expected["query"].as_str(), "{name}: query");
}

fn check_outcome(name: &str, result: Result<ConversionResult, ApiError>, case: &Value) {
    match case.get("expected_error").and_then(Value::as_str) {
        Some("Service") => {
            let err = result.unwrap_err();
            assert!(matches!(err, ApiError::Service(_)), "{name}: {err:?}");
            assert_eq!(
                err.to_string(),
                case["expected_message"].as_str().unwrap(),
                "{name}: message"
            );
        }
        Some("MalformedResponse") => {
            let err = result.unwrap_err();
            assert!(
                matches!(err, ApiError::MalformedResponse { .. }),
                "{name}: {err:?}"
            );
        }
        Some(other) => panic!("{name}: unknown expected_error: {other}"),
        None => {
            let expected: ConversionResult =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Words to coordinates
// ---------------------------------------------------------------------------

#[test]
fn convert_to_coordinates_test_vectors() {
    let raw = include_str!("../../test-vectors/convert_to_coordinates.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let words: Vec<&str> = case["input"]["words"]
            .as_array()
            .unwrap()
            .iter()
            .map(|w| w.as_str().unwrap())
            .collect();
        let address = ThreeWordAddress::new(words[0], words[1], words[2]);

        // Verify build
        let built = c.build_convert_to_coordinates(&address, &options(case));
        if case["expected_error"] == "EmptyWord" {
            let err = built.unwrap_err();
            assert!(
                matches!(
                    err,
                    ApiError::InvalidInput(InvalidInputError::EmptyWord { .. })
                ),
                "{name}: {err:?}"
            );
            continue;
        }
        check_request(name, &built.unwrap(), case);

        // Verify parse
        check_outcome(name, c.parse_response(simulated_response(case)), case);
    }
}

// ---------------------------------------------------------------------------
// Coordinates to words
// ---------------------------------------------------------------------------

#[test]
fn convert_to_words_test_vectors() {
    let raw = include_str!("../../test-vectors/convert_to_words.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let coordinates: Coordinates = serde_json::from_value(case["input"].clone()).unwrap();

        // Verify build, twice, to pin determinism
        let first = c.build_convert_to_words(coordinates, &options(case)).unwrap();
        let second = c.build_convert_to_words(coordinates, &options(case)).unwrap();
        assert_eq!(first.to_string(), second.to_string(), "{name}: determinism");
        check_request(name, &first, case);

        // Verify parse
        check_outcome(name, c.parse_response(simulated_response(case)), case);
    }
}
