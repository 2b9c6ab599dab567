//! Verify envelope decoding and request building against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the requested result shape or auth
//! mode, and the expected payload, request, or error classification.
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use envelope_core::{ApiClient, AuthMode, Endpoint, HttpError, HttpMethod, HttpResponse};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TestUser {
    name: String,
    age: u32,
}

fn client() -> ApiClient {
    ApiClient::new("http://localhost:3000")
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_auth(s: &str) -> AuthMode {
    match s {
        "user" => AuthMode::User,
        "basic" => AuthMode::Basic,
        other => panic!("unknown auth mode: {other}"),
    }
}

fn response_from(case: &Value) -> HttpResponse {
    HttpResponse {
        status: case["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: case["body"].as_str().unwrap().to_string(),
    }
}

/// Assert that `err` matches the vector's `expected_error` object.
fn assert_error(name: &str, expected: &Value, err: &HttpError) {
    let kind = expected["kind"].as_str().unwrap();
    let matches_kind = match kind {
        "malformed_json" => matches!(err, HttpError::MalformedJson { .. }),
        "payload_extraction" => matches!(err, HttpError::PayloadExtraction { .. }),
        "session_expired" => matches!(err, HttpError::SessionExpired { .. }),
        "server_error" => matches!(err, HttpError::ServerError { .. }),
        "transport" => matches!(err, HttpError::Transport { .. }),
        other => panic!("{name}: unknown error kind: {other}"),
    };
    assert!(matches_kind, "{name}: expected {kind}, got {err:?}");

    if let Some(code) = expected.get("code").and_then(Value::as_i64) {
        assert_eq!(err.code(), code, "{name}: code");
    }
    if let Some(message) = expected.get("message").and_then(Value::as_str) {
        assert_eq!(err.message(), message, "{name}: message");
    }
}

#[test]
fn decode_test_vectors() {
    let raw = include_str!("../../test-vectors/decode.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = response_from(case);
        let expected_error = case.get("expected_error");

        match case["shape"].as_str().unwrap() {
            "raw_json" => {
                let result = c.parse_json(&response);
                match expected_error {
                    Some(expected) => assert_error(name, expected, &result.unwrap_err()),
                    None => {
                        assert_eq!(result.unwrap(), case["expected_payload"], "{name}: payload")
                    }
                }
            }
            "model" => {
                let result = c.parse_model::<TestUser>(&response);
                match expected_error {
                    Some(expected) => assert_error(name, expected, &result.unwrap_err()),
                    None => {
                        let expected: TestUser =
                            serde_json::from_value(case["expected_payload"].clone()).unwrap();
                        assert_eq!(result.unwrap(), expected, "{name}: model");
                    }
                }
            }
            "model_list" => {
                let result = c.parse_model_list::<TestUser>(&response);
                match expected_error {
                    Some(expected) => assert_error(name, expected, &result.unwrap_err()),
                    None => {
                        let expected: Vec<TestUser> =
                            serde_json::from_value(case["expected_payload"].clone()).unwrap();
                        assert_eq!(result.unwrap(), expected, "{name}: model list");
                    }
                }
            }
            other => panic!("{name}: unknown shape: {other}"),
        }
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/request.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let mut client = ApiClient::new(case["base_url"].as_str().unwrap());
        if let Some(token) = case.get("access_token").and_then(Value::as_str) {
            client = client.with_access_token(token);
        }
        if let Some(token) = case.get("basic_token").and_then(Value::as_str) {
            client = client.with_basic_token(token);
        }

        let mut endpoint = Endpoint::new(
            case["path"].as_str().unwrap(),
            parse_method(case["method"].as_str().unwrap()),
        );
        for pair in case["params"].as_array().unwrap() {
            let pair = pair.as_array().unwrap();
            endpoint = endpoint.param(pair[0].as_str().unwrap(), pair[1].as_str().unwrap());
        }

        let auth = parse_auth(case["auth"].as_str().unwrap());
        let request = client.build_request(&endpoint, auth).unwrap();

        let expected = &case["expected"];
        assert_eq!(
            request.method,
            parse_method(expected["method"].as_str().unwrap()),
            "{name}: method"
        );
        assert_eq!(request.url, expected["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let pair = h.as_array().unwrap();
                (
                    pair[0].as_str().unwrap().to_string(),
                    pair[1].as_str().unwrap().to_string(),
                )
            })
            .collect();
        assert_eq!(request.headers, expected_headers, "{name}: headers");

        assert_eq!(
            request.body.as_deref(),
            expected["body"].as_str(),
            "{name}: body"
        );
        assert_eq!(
            request.timeout_secs,
            expected["timeout_secs"].as_u64().unwrap(),
            "{name}: timeout"
        );
    }
}
