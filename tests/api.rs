//! Functional tests driving the HTTP API in-process, covering both
//! endpoints end to end: field extraction, shape pre-checks, and the
//! verbatim relay of engine results and error messages.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use http_body_util::BodyExt;

use serde_json::{Value, json};

use tower::ServiceExt;

const PUZZLE: &str =
    "1.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";
const SOLUTION: &str =
    "135762984946381257728459613694517832812936745357824196473298561581673429269145378";

async fn post(uri: &str, body: Value) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = sudoku_api::api::router().oneshot(request).await.unwrap();

    assert_eq!(StatusCode::OK, response.status());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn solve_valid_puzzle() {
    let response = post("/api/solve", json!({ "puzzle": PUZZLE })).await;

    assert_eq!(json!({ "solution": SOLUTION }), response);
}

#[tokio::test]
async fn solve_missing_puzzle() {
    let response = post("/api/solve", json!({})).await;

    assert_eq!(json!({ "error": "Required field missing" }), response);
}

#[tokio::test]
async fn solve_without_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/solve")
        .body(Body::empty())
        .unwrap();
    let response = sudoku_api::api::router().oneshot(request).await.unwrap();

    assert_eq!(StatusCode::OK, response.status());

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let response: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json!({ "error": "Required field missing" }), response);
}

#[tokio::test]
async fn solve_invalid_characters() {
    let puzzle = PUZZLE.replace('5', "0");
    let response = post("/api/solve", json!({ "puzzle": puzzle })).await;

    assert_eq!(json!({ "error": "Invalid characters in puzzle" }), response);
}

#[tokio::test]
async fn solve_wrong_length() {
    let response = post("/api/solve", json!({ "puzzle": &PUZZLE[1..] }))
        .await;

    assert_eq!(
        json!({ "error": "Expected puzzle to be 81 characters long" }),
        response);
}

#[tokio::test]
async fn solve_unsolvable_puzzle() {
    let puzzle =
        "2.5..2.84..63.12.7.2..5.....9..1....8.2.3674.3.7.2..9.47...8..1..16....926914.37.";
    let response = post("/api/solve", json!({ "puzzle": puzzle })).await;

    assert_eq!(json!({ "error": "Puzzle cannot be solved" }), response);
}

#[tokio::test]
async fn check_valid_placement() {
    let body = json!({
        "puzzle": PUZZLE,
        "coordinate": "A2",
        "value": "3"
    });
    let response = post("/api/check", body).await;

    assert_eq!(json!({ "valid": true }), response);
}

#[tokio::test]
async fn check_single_conflict() {
    let body = json!({
        "puzzle": PUZZLE,
        "coordinate": "A2",
        "value": "9"
    });
    let response = post("/api/check", body).await;

    assert_eq!(json!({ "valid": false, "conflict": ["column"] }), response);
}

#[tokio::test]
async fn check_all_conflicts() {
    let body = json!({
        "puzzle": PUZZLE,
        "coordinate": "A2",
        "value": "2"
    });
    let response = post("/api/check", body).await;

    assert_eq!(
        json!({ "valid": false, "conflict": ["row", "column", "region"] }),
        response);
}

#[tokio::test]
async fn check_missing_fields() {
    let expected = json!({ "error": "Required field(s) missing" });
    let bodies = [
        json!({ "puzzle": PUZZLE, "coordinate": "A2" }),
        json!({ "puzzle": PUZZLE, "value": "2" }),
        json!({ "coordinate": "A2", "value": "2" }),
        json!({})
    ];

    for body in bodies {
        assert_eq!(expected, post("/api/check", body).await);
    }
}

#[tokio::test]
async fn check_empty_field_counts_as_missing() {
    let body = json!({
        "puzzle": PUZZLE,
        "coordinate": "",
        "value": "2"
    });
    let response = post("/api/check", body).await;

    assert_eq!(json!({ "error": "Required field(s) missing" }), response);
}

#[tokio::test]
async fn check_invalid_characters() {
    let body = json!({
        "puzzle": PUZZLE.replace('5', "0"),
        "coordinate": "A2",
        "value": "3"
    });
    let response = post("/api/check", body).await;

    assert_eq!(json!({ "error": "Invalid characters in puzzle" }), response);
}

#[tokio::test]
async fn check_wrong_length() {
    let body = json!({
        "puzzle": &PUZZLE[1..],
        "coordinate": "A2",
        "value": "3"
    });
    let response = post("/api/check", body).await;

    assert_eq!(
        json!({ "error": "Expected puzzle to be 81 characters long" }),
        response);
}

#[tokio::test]
async fn check_invalid_coordinate() {
    let body = json!({
        "puzzle": PUZZLE,
        "coordinate": "Z2",
        "value": "3"
    });
    let response = post("/api/check", body).await;

    assert_eq!(json!({ "error": "Invalid coordinate" }), response);
}

#[tokio::test]
async fn check_invalid_value() {
    let body = json!({
        "puzzle": PUZZLE,
        "coordinate": "A2",
        "value": "25"
    });
    let response = post("/api/check", body).await;

    assert_eq!(json!({ "error": "Invalid value" }), response);
}

#[tokio::test]
async fn check_coordinate_rejected_before_value() {
    let body = json!({
        "puzzle": PUZZLE,
        "coordinate": "Z2",
        "value": "25"
    });
    let response = post("/api/check", body).await;

    assert_eq!(json!({ "error": "Invalid coordinate" }), response);
}
