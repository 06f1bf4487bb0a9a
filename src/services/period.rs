// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Re-bucketing of weeks into months or fixed N-week windows.

use crate::models::{BucketStats, PeriodBucket, PeriodMode, WeekBucket, WeekKey};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Merge weeks into periods, returned in key order.
///
/// A week always lands in exactly one period: monthly periods take the month
/// of the week's Monday, N-week windows are counted from the earliest Monday in
/// `weeks`. `PeriodMode::Weekly` yields one period per week.
pub fn aggregate_periods(mut weeks: Vec<WeekBucket>, mode: PeriodMode) -> Vec<PeriodBucket> {
    let Some(anchor) = weeks.iter().map(|w| w.key.start()).min() else {
        return Vec::new();
    };
    weeks.sort_by_key(|w| w.key);

    let mut periods: BTreeMap<String, PeriodBucket> = BTreeMap::new();
    for week in weeks {
        let (key, name) = period_of(week.key, anchor, mode);
        let period = periods
            .entry(key.clone())
            .or_insert_with(|| PeriodBucket {
                key,
                name,
                weeks: Vec::new(),
                stats: BucketStats::default(),
            });
        period.weeks.push(week.key);
        period.stats.merge(week.stats);
    }

    tracing::debug!(mode = %mode, periods = periods.len(), "Aggregated weeks into periods");
    periods.into_values().collect()
}

/// Sortable key and display name of the period containing `week`.
fn period_of(week: WeekKey, anchor: NaiveDate, mode: PeriodMode) -> (String, String) {
    let monday = week.start();
    match mode {
        PeriodMode::Weekly => (monday.format("%Y-%m-%d").to_string(), week.to_string()),
        PeriodMode::Monthly => (
            monday.format("%Y-%m").to_string(),
            monday.format("%B %Y").to_string(),
        ),
        PeriodMode::Weeks(n) => {
            let span_days = 7 * i64::from(n.max(1));
            let index = (monday - anchor).num_days() / span_days;
            let start = anchor + Duration::days(index * span_days);
            let end = start + Duration::days(span_days - 1);
            (
                start.format("%Y-%m-%d").to_string(),
                format!("{} to {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
            )
        }
    }
}
