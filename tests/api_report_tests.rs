// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP API tests for report generation.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn post_report(body: Value) -> (StatusCode, Value) {
    let (app, _state) = common::create_test_app();
    let response = app
        .oneshot(common::post_json("/api/generate-report", &body))
        .await
        .unwrap();
    let status = response.status();
    (status, common::body_json(response).await)
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_generate_report() {
    let (status, body) = post_report(json!({
        "entries": common::two_week_rows(),
        "report_format": "summary",
        "unit_system": "metric",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["buckets"], 2);
    assert_eq!(body["entries"], 10);
    let report = body["report"].as_str().unwrap();
    assert!(report.contains("## Week: 2024-01-15 to 2024-01-21"));
    assert!(report.contains("## Overall Summary"));
}

#[tokio::test]
async fn test_generate_report_with_period_and_range() {
    let (status, body) = post_report(json!({
        "entries": common::two_week_rows(),
        "period": "4-weeks",
        "timezone": "Europe/Amsterdam",
        "start_date": "2024-01-20",
        "end_date": "2024-01-31",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["buckets"], 1);
    // Jan 22, 23 and 26 only
    assert_eq!(body["entries"], 5);
    let report = body["report"].as_str().unwrap();
    assert!(report.contains("## Period: 2024-01-22 to 2024-02-18"));
    assert!(report.contains("- Date Range: 2024-01-20 to 2024-01-31"));
}

#[tokio::test]
async fn test_warmup_flag_accepts_strings() {
    let (status, body) = post_report(json!({
        "entries": [
            {"Date": "2024-01-15 18:00:00", "Exercise": "Squat", "Reps": 5, "Weight(kg)": 60.0, "isWarmup": "True"},
            {"Date": "2024-01-15 18:03:00", "Exercise": "Squat", "Reps": 5, "Weight(kg)": 100.0, "isWarmup": false}
        ],
        "report_format": "detailed",
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    let report = body["report"].as_str().unwrap();
    assert!(report.contains("- Warmup Sets: 1"));
    assert!(report.contains("- Working Sets: 1"));
}

#[tokio::test]
async fn test_invalid_timestamp_rejected() {
    let (status, body) = post_report(json!({
        "entries": [common::lift("yesterday", "Squat", 5, 100.0)],
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_report_input");
    assert!(body["details"].as_str().unwrap().contains("Row 1"));
}

#[tokio::test]
async fn test_unknown_timezone_rejected() {
    let (status, body) = post_report(json!({
        "entries": common::two_week_rows(),
        "timezone": "Atlantis/Capital",
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_report_input");
}

#[tokio::test]
async fn test_invalid_period_rejected() {
    let (status, body) = post_report(json!({
        "entries": common::two_week_rows(),
        "period": "5-weeks",
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_empty_exercise_rejected() {
    let (status, body) = post_report(json!({
        "entries": [common::lift("2024-01-15 18:00:00", "", 5, 100.0)],
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_negative_weight_rejected() {
    let (status, _body) = post_report(json!({
        "entries": [common::lift("2024-01-15 18:00:00", "Squat", 5, -20.0)],
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_half_open_range_rejected() {
    let (status, _body) = post_report(json!({
        "entries": common::two_week_rows(),
        "start_date": "2024-01-20",
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_too_many_entries() {
    let (app, state) = common::create_test_app();
    let rows: Vec<Value> = (0..=state.config.max_entries)
        .map(|_| common::lift("2024-01-15 18:00:00", "Squat", 5, 100.0))
        .collect();

    let response = app
        .oneshot(common::post_json(
            "/api/generate-report",
            &json!({ "entries": rows }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
