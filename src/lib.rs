// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout-Report: weekly and period training summaries from workout logs
//!
//! This crate turns exported workout rows (Fitbod style) into Markdown
//! reports: entries are classified, grouped into strength sessions, rolled
//! up into ISO weeks and optionally into months or multi-week windows.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod units;

use config::Config;
use services::ReportService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub report_service: ReportService,
}
