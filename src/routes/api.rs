// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report generation API.

use crate::error::{AppError, Result};
use crate::models::{PeriodMode, RawEntry};
use crate::services::{parse_timezone, ReportFormat, ReportOptions};
use crate::units::UnitSystem;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Report API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/generate-report", post(generate_report))
}

/// Report request: export rows plus rendering options.
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateReportRequest {
    #[validate(nested)]
    pub entries: Vec<RawEntry>,
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[serde(default)]
    pub report_format: ReportFormat,
    /// IANA time zone name; the server default applies when absent.
    pub timezone: Option<String>,
    #[serde(default)]
    pub period: PeriodMode,
    /// Inclusive local start date (requires `end_date`)
    pub start_date: Option<NaiveDate>,
    /// Inclusive local end date (requires `start_date`)
    pub end_date: Option<NaiveDate>,
}

/// Generated report response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GenerateReportResponse {
    pub status: String,
    pub report: String,
    /// Week or period sections in the report
    pub buckets: usize,
    /// Entries inside the requested date range
    pub entries: usize,
}

fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Option<(NaiveDate, NaiveDate)>> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(Some((start, end))),
        (None, None) => Ok(None),
        _ => Err(AppError::BadRequest(
            "start_date and end_date must be provided together".to_string(),
        )),
    }
}

/// Generate a Markdown report from uploaded workout rows.
async fn generate_report(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GenerateReportRequest>, JsonRejection>,
) -> Result<Json<GenerateReportResponse>> {
    let Json(request) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    request.validate()?;

    let timezone = match request.timezone.as_deref() {
        Some(name) => parse_timezone(name)?,
        None => state.config.default_timezone,
    };
    let options = ReportOptions {
        units: request.unit_system,
        timezone,
        format: request.report_format,
        period: request.period,
        date_range: date_range(request.start_date, request.end_date)?,
    };

    tracing::info!(
        rows = request.entries.len(),
        format = ?options.format,
        period = %options.period,
        timezone = %options.timezone,
        "Generating report"
    );

    // Aggregation is CPU-bound; keep it off the async workers.
    let service = state.report_service.clone();
    let rows = request.entries;
    let report = tokio::task::spawn_blocking(move || {
        let entries = service.ingest(rows)?;
        service.generate(&entries, &options)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Report task failed: {}", e)))??;

    Ok(Json(GenerateReportResponse {
        status: "success".to_string(),
        report: report.markdown,
        buckets: report.bucket_count,
        entries: report.entry_count,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_range_requires_both_bounds() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 1);
        assert!(date_range(None, None).unwrap().is_none());
        assert!(date_range(day, day).unwrap().is_some());
        assert!(matches!(date_range(day, None), Err(AppError::BadRequest(_))));
        assert!(matches!(date_range(None, day), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_request_defaults() {
        let request: GenerateReportRequest = serde_json::from_value(serde_json::json!({
            "entries": []
        }))
        .unwrap();

        assert_eq!(request.unit_system, UnitSystem::Metric);
        assert_eq!(request.report_format, ReportFormat::Summary);
        assert_eq!(request.period, PeriodMode::Weekly);
        assert!(request.timezone.is_none());
    }
}
