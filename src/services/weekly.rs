// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly aggregation.
//!
//! Entries are classified (time zone applied once), grouped by local day,
//! reduced to per-day partial buckets and merged into their week. Per-day
//! partials are independent, so large inputs build them in parallel; the merge
//! always runs in chronological order, keeping both paths identical.

use crate::models::{BucketStats, ClassifiedEntry, Entry, WeekBucket, WeekKey};
use crate::services::classifier::classify_entry;
use crate::services::session::build_sessions;
use crate::units::UnitSystem;
use chrono::NaiveDate;
use chrono_tz::Tz;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// Builds [`WeekBucket`]s from entries for one time zone and unit system.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyAggregator {
    tz: Tz,
    units: UnitSystem,
    /// Day count at which per-day partials are built on the rayon pool.
    parallel_min_days: usize,
}

impl WeeklyAggregator {
    pub fn new(tz: Tz, units: UnitSystem) -> Self {
        Self {
            tz,
            units,
            parallel_min_days: usize::MAX,
        }
    }

    pub fn with_parallel_min_days(mut self, days: usize) -> Self {
        self.parallel_min_days = days.max(1);
        self
    }

    /// Classify every entry, converting to local time and display units.
    pub fn classify<'e>(&self, entries: &'e [Entry]) -> Vec<ClassifiedEntry<'e>> {
        entries
            .iter()
            .map(|e| classify_entry(e, self.tz, self.units))
            .collect()
    }

    /// Aggregate classified entries into chronologically ordered weeks.
    pub fn aggregate(&self, entries: Vec<ClassifiedEntry<'_>>) -> Vec<WeekBucket> {
        let days = group_by_day(entries);
        let parallel = days.len() >= self.parallel_min_days;

        let partials: Vec<(WeekKey, BucketStats)> = if parallel {
            days.par_iter()
                .map(|(date, day)| (WeekKey::containing(*date), self.summarize_day(day)))
                .collect()
        } else {
            days.iter()
                .map(|(date, day)| (WeekKey::containing(*date), self.summarize_day(day)))
                .collect()
        };

        let mut weeks: BTreeMap<WeekKey, BucketStats> = BTreeMap::new();
        for (key, partial) in partials {
            weeks.entry(key).or_default().merge(partial);
        }

        tracing::debug!(
            days = days.len(),
            weeks = weeks.len(),
            parallel,
            "Aggregated entries into weeks"
        );

        weeks
            .into_iter()
            .map(|(key, stats)| WeekBucket { key, stats })
            .collect()
    }

    /// Partial bucket for one local day, entries in chronological order.
    fn summarize_day(&self, day: &[ClassifiedEntry<'_>]) -> BucketStats {
        let mut stats = BucketStats::default();
        for item in day {
            stats.record(item, self.units);
        }
        for session in build_sessions(day) {
            stats.add_session(session.duration());
        }
        stats
    }
}

/// Group entries by local date, each day sorted chronologically (stable).
fn group_by_day(entries: Vec<ClassifiedEntry<'_>>) -> Vec<(NaiveDate, Vec<ClassifiedEntry<'_>>)> {
    let mut days: BTreeMap<NaiveDate, Vec<ClassifiedEntry<'_>>> = BTreeMap::new();
    for item in entries {
        days.entry(item.local_date()).or_default().push(item);
    }
    days.into_iter()
        .map(|(date, mut day)| {
            day.sort_by_key(|e| e.entry.timestamp);
            (date, day)
        })
        .collect()
}
