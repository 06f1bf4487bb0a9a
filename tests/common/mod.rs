// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request};
use serde_json::{json, Value};
use std::sync::Arc;
use workout_report::config::Config;
use workout_report::models::{Entry, RawEntry};
use workout_report::routes::create_router;
use workout_report::services::ReportService;
use workout_report::AppState;

/// Create a test app with the default test configuration.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let report_service = ReportService::new(&config);

    let state = Arc::new(AppState {
        config,
        report_service,
    });

    (create_router(state.clone()), state)
}

/// A strength row (reps at weight).
#[allow(dead_code)]
pub fn lift(date: &str, exercise: &str, reps: u32, weight_kg: f64) -> Value {
    json!({
        "Date": date,
        "Exercise": exercise,
        "Reps": reps,
        "Weight(kg)": weight_kg,
    })
}

/// A cardio row (distance over time).
#[allow(dead_code)]
pub fn run(date: &str, exercise: &str, distance_m: f64, duration_s: f64) -> Value {
    json!({
        "Date": date,
        "Exercise": exercise,
        "Distance(m)": distance_m,
        "Duration(s)": duration_s,
    })
}

/// Ten rows over two ISO weeks (Jan 15-21 and Jan 22-28, 2024), deliberately
/// out of order.
#[allow(dead_code)]
pub fn two_week_rows() -> Vec<Value> {
    vec![
        lift("2024-01-26 18:00:00", "Deadlift", 5, 140.0),
        run("2024-01-17 07:00:00", "Running", 5000.0, 1500.0),
        lift("2024-01-15 18:06:00", "Squat", 5, 100.0),
        lift("2024-01-22 18:04:00", "Squat", 5, 110.0),
        lift("2024-01-18 18:00:00", "Bench Press", 8, 60.0),
        lift("2024-01-15 18:00:00", "Squat", 5, 100.0),
        run("2024-01-23 07:00:00", "Running", 6000.0, 1800.0),
        lift("2024-01-22 18:08:00", "Squat", 5, 110.0),
        lift("2024-01-15 18:03:00", "Squat", 5, 100.0),
        lift("2024-01-22 18:00:00", "Squat", 5, 110.0),
    ]
}

/// Ingest JSON rows through the service, as the API does.
#[allow(dead_code)]
pub fn ingest(service: &ReportService, rows: Vec<Value>) -> Vec<Entry> {
    let raw: Vec<RawEntry> = serde_json::from_value(Value::Array(rows)).unwrap();
    service.ingest(raw).unwrap()
}

/// Build a JSON POST request.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
