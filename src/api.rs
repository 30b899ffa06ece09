//! The HTTP interface of the engine, exposing two endpoints:
//!
//! * `POST /api/solve` takes a body `{ "puzzle": "..." }` and responds
//! with `{ "solution": "..." }` or `{ "error": "..." }`.
//! * `POST /api/check` takes a body `{ "puzzle": "...", "coordinate": "A2",
//! "value": "3" }`; responds with the serialized
//! [PlacementResult](crate::constraint::PlacementResult) or
//! `{ "error": "..." }`.
//!
//! The handlers are thin glue: they extract fields, reject malformed
//! requests by shape before the engine is involved, call into
//! [SudokuSolver](crate::solver::SudokuSolver), and relay its result or
//! error message verbatim. Every response is HTTP 200; the error text in
//! the body is the contract. Each request builds its own grid and solver,
//! so concurrent requests share no state.

use crate::error::SudokuError;
use crate::solver::SudokuSolver;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::routing::post;

use serde::Deserialize;

use serde_json::{Value, json};

/// The error reported when a field of a `/api/check` request is absent or
/// empty. `/api/solve` with a missing puzzle reports
/// [SudokuError::MissingInput] instead, which only concerns the one field
/// that endpoint has.
const MISSING_FIELDS_ERROR: &str = "Required field(s) missing";

#[derive(Debug, Default, Deserialize)]
struct SolveRequest {
    puzzle: Option<String>
}

#[derive(Debug, Default, Deserialize)]
struct CheckRequest {
    puzzle: Option<String>,
    coordinate: Option<String>,
    value: Option<String>
}

/// Builds the router serving both API endpoints. The router is stateless
/// and can be cloned or rebuilt per test without side effects.
pub fn router() -> Router {
    Router::new()
        .route("/api/solve", post(solve))
        .route("/api/check", post(check))
}

// A missing, non-JSON, or otherwise malformed body is treated as a body
// with all fields absent, keeping the error responses within the JSON
// contract instead of surfacing the framework's 400 rejections.
fn parse_body<'a, T>(body: &'a Bytes) -> T
where
    T: Default + Deserialize<'a>
{
    serde_json::from_slice(body).unwrap_or_default()
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn coordinate_shape_ok(coordinate: &str) -> bool {
    let bytes = coordinate.as_bytes();

    bytes.len() == 2 &&
        (b'A'..=b'I').contains(&bytes[0]) &&
        (b'1'..=b'9').contains(&bytes[1])
}

fn value_shape_ok(value: &str) -> bool {
    let bytes = value.as_bytes();

    bytes.len() == 1 && (b'1'..=b'9').contains(&bytes[0])
}

fn error_response(message: &str) -> Json<Value> {
    Json(json!({ "error": message }))
}

async fn solve(body: Bytes) -> Json<Value> {
    let request: SolveRequest = parse_body(&body);

    let puzzle = match present(&request.puzzle) {
        Some(puzzle) => puzzle,
        None =>
            return error_response(&SudokuError::MissingInput.to_string())
    };

    match SudokuSolver.solve(puzzle) {
        Ok(solution) => {
            log::debug!("solved puzzle {}", puzzle);
            Json(json!({ "solution": solution }))
        }
        Err(error) => {
            log::debug!("rejected puzzle {}: {}", puzzle, error);
            error_response(&error.to_string())
        }
    }
}

async fn check(body: Bytes) -> Json<Value> {
    let request: CheckRequest = parse_body(&body);

    let (puzzle, coordinate, value) = match (present(&request.puzzle),
            present(&request.coordinate), present(&request.value)) {
        (Some(puzzle), Some(coordinate), Some(value)) =>
            (puzzle, coordinate, value),
        _ => return error_response(MISSING_FIELDS_ERROR)
    };

    // Fast shape rejections; the engine re-validates both fields anyway.
    if !coordinate_shape_ok(coordinate) {
        return error_response(&SudokuError::InvalidCoordinate.to_string());
    }

    if !value_shape_ok(value) {
        return error_response(&SudokuError::InvalidValue.to_string());
    }

    match SudokuSolver.check_placement(puzzle, coordinate, value) {
        Ok(result) => {
            log::debug!("checked {} = {}: valid = {}", coordinate, value,
                result.valid);
            Json(json!(result))
        }
        Err(error) => {
            log::debug!("rejected check at {}: {}", coordinate, error);
            error_response(&error.to_string())
        }
    }
}
