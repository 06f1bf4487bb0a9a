// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coarser reporting periods built by merging weeks.

use crate::models::bucket::{Bucket, BucketStats, WeekKey};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Window sizes accepted for N-week periods.
pub const ALLOWED_WEEK_WINDOWS: [u32; 4] = [4, 8, 12, 24];

/// How weeks are grouped in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PeriodMode {
    #[default]
    Weekly,
    Monthly,
    /// Fixed windows of N weeks anchored at the first observed week.
    Weeks(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown period {0:?} (expected weekly, monthly, 4-weeks, 8-weeks, 12-weeks or 24-weeks)")]
pub struct PeriodModeError(pub String);

impl FromStr for PeriodMode {
    type Err = PeriodModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "weekly" => return Ok(PeriodMode::Weekly),
            "monthly" => return Ok(PeriodMode::Monthly),
            _ => {}
        }

        normalized
            .strip_suffix("-weeks")
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| ALLOWED_WEEK_WINDOWS.contains(n))
            .map(PeriodMode::Weeks)
            .ok_or_else(|| PeriodModeError(s.to_string()))
    }
}

impl TryFrom<String> for PeriodMode {
    type Error = PeriodModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodMode> for String {
    fn from(mode: PeriodMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodMode::Weekly => write!(f, "weekly"),
            PeriodMode::Monthly => write!(f, "monthly"),
            PeriodMode::Weeks(n) => write!(f, "{}-weeks", n),
        }
    }
}

/// Statistics for a month or an N-week window.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodBucket {
    /// Sortable key: `YYYY-MM` for months, the window's start date otherwise.
    pub key: String,
    /// Human-readable name, e.g. `January 2024`.
    pub name: String,
    /// Contributing weeks in chronological order.
    pub weeks: Vec<WeekKey>,
    pub stats: BucketStats,
}

impl Bucket for PeriodBucket {
    const KIND: &'static str = "Period";

    fn heading(&self) -> String {
        format!("Period: {}", self.name)
    }

    fn stats(&self) -> &BucketStats {
        &self.stats
    }

    fn date_span(&self) -> (NaiveDate, NaiveDate) {
        match (self.weeks.first(), self.weeks.last()) {
            (Some(first), Some(last)) => (first.start(), last.end()),
            _ => (NaiveDate::MIN, NaiveDate::MIN),
        }
    }

    fn included_weeks(&self) -> &[WeekKey] {
        &self.weeks
    }
}
