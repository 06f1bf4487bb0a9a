// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use workout_report::error::AppError;
use workout_report::models::EntryError;
use workout_report::services::{parse_timezone, ReportError};

#[test]
fn test_report_errors_are_client_errors() {
    let err = AppError::from(parse_timezone("Nowhere/Special").unwrap_err());
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = AppError::from(ReportError::InvalidEntry {
        row: 3,
        source: EntryError::MissingExercise,
    });
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.to_string(),
        "Report generation failed: Row 3: Exercise name is empty"
    );
}

#[test]
fn test_too_many_entries_status() {
    let err = AppError::from(ReportError::TooManyEntries {
        count: 11,
        limit: 10,
    });
    assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[test]
fn test_internal_error_hides_details() {
    let err = AppError::Internal(anyhow::anyhow!("worker panicked"));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_error_body_shape() {
    let response = AppError::BadRequest("missing field".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["details"], "missing field");
}
