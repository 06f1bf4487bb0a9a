// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Report generation service.
//!
//! Handles the full workflow for one request:
//! 1. Convert raw export rows into entries (any bad row fails the request)
//! 2. Classify entries in the report time zone and unit system
//! 3. Apply the optional local date range
//! 4. Aggregate into weeks, then optionally into periods
//! 5. Render the Markdown report

use crate::config::Config;
use crate::models::{Entry, EntryError, PeriodMode, RawEntry};
use crate::services::composer::{ReportComposer, ReportFormat};
use crate::services::period::aggregate_periods;
use crate::services::weekly::WeeklyAggregator;
use crate::units::UnitSystem;
use chrono::NaiveDate;
use chrono_tz::Tz;
use std::time::{Duration, Instant};

/// Options controlling one report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub units: UnitSystem,
    pub timezone: Tz,
    pub format: ReportFormat,
    pub period: PeriodMode,
    /// Inclusive local date range; entries outside are excluded.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            units: UnitSystem::Metric,
            timezone: chrono_tz::UTC,
            format: ReportFormat::Summary,
            period: PeriodMode::Weekly,
            date_range: None,
        }
    }
}

/// A rendered report.
#[derive(Debug, Clone)]
pub struct Report {
    pub markdown: String,
    /// Week or period sections rendered
    pub bucket_count: usize,
    /// Entries that fell inside the date range
    pub entry_count: usize,
}

/// Errors from report generation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Row {row}: {source}")]
    InvalidEntry {
        /// 1-based row number in the submitted data
        row: usize,
        source: EntryError,
    },

    #[error("Unknown time zone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Too many entries: {count} (limit {limit})")]
    TooManyEntries { count: usize, limit: usize },
}

/// Resolve an IANA time zone name.
pub fn parse_timezone(name: &str) -> Result<Tz, ReportError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ReportError::UnknownTimezone(name.to_string()))
}

/// Stateless report generator configured once at startup.
#[derive(Debug, Clone)]
pub struct ReportService {
    slow_threshold: Duration,
    max_entries: usize,
    parallel_min_days: usize,
}

impl ReportService {
    pub fn new(config: &Config) -> Self {
        Self {
            slow_threshold: Duration::from_secs(config.slow_report_secs),
            max_entries: config.max_entries,
            parallel_min_days: config.parallel_min_days,
        }
    }

    /// Convert raw rows into entries, failing on the first invalid row.
    pub fn ingest(&self, rows: Vec<RawEntry>) -> Result<Vec<Entry>, ReportError> {
        self.check_size(rows.len())?;
        rows.into_iter()
            .enumerate()
            .map(|(i, row)| {
                row.into_entry()
                    .map_err(|source| ReportError::InvalidEntry { row: i + 1, source })
            })
            .collect()
    }

    /// Aggregate entries and render the report.
    pub fn generate(&self, entries: &[Entry], options: &ReportOptions) -> Result<Report, ReportError> {
        self.check_size(entries.len())?;
        if let Some((start, end)) = options.date_range {
            if start > end {
                return Err(ReportError::InvalidDateRange { start, end });
            }
        }

        let started = Instant::now();
        let aggregator = WeeklyAggregator::new(options.timezone, options.units)
            .with_parallel_min_days(self.parallel_min_days);

        let mut classified = aggregator.classify(entries);
        if let Some((start, end)) = options.date_range {
            classified.retain(|e| (start..=end).contains(&e.local_date()));
        }
        let entry_count = classified.len();

        let weeks = aggregator.aggregate(classified);
        let composer = ReportComposer::new(options.units, options.format);
        let (markdown, bucket_count) = match options.period {
            PeriodMode::Weekly => (composer.compose(&weeks, options.date_range), weeks.len()),
            mode => {
                let periods = aggregate_periods(weeks, mode);
                (composer.compose(&periods, options.date_range), periods.len())
            }
        };

        let elapsed = started.elapsed();
        if elapsed > self.slow_threshold {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                entries = entry_count,
                format = ?options.format,
                "Slow report generation; consider the summary format or a narrower date range"
            );
        }

        tracing::info!(
            entries = entry_count,
            buckets = bucket_count,
            period = %options.period,
            units = %options.units,
            timezone = %options.timezone,
            "Report generated"
        );

        Ok(Report {
            markdown,
            bucket_count,
            entry_count,
        })
    }

    fn check_size(&self, count: usize) -> Result<(), ReportError> {
        if count > self.max_entries {
            return Err(ReportError::TooManyEntries {
                count,
                limit: self.max_entries,
            });
        }
        Ok(())
    }
}
