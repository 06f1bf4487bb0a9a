// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - aggregation engine and report generation.

pub mod classifier;
pub mod composer;
pub mod period;
pub mod report;
pub mod session;
pub mod weekly;

pub use classifier::{classify, classify_entry};
pub use composer::{percent_change, ReportComposer, ReportFormat};
pub use period::aggregate_periods;
pub use report::{parse_timezone, Report, ReportError, ReportOptions, ReportService};
pub use session::{build_sessions, Session};
pub use weekly::WeeklyAggregator;
