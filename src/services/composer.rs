// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Markdown report rendering.

use crate::models::{Bucket, BucketStats, WorkoutSet};
use crate::time_utils::format_duration;
use crate::units::UnitSystem;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const REPORT_TITLE: &str = "# Workout Summary Report";
const SECTION_RULE: &str = "---";

/// Level of detail rendered for each bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Per-exercise distance and volume only.
    #[default]
    Summary,
    /// Daily set tables and per-exercise progression.
    Detailed,
}

/// Percentage change from `previous` to `current`.
///
/// `None` when there is no previous value to compare against.
pub fn percent_change(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous * 100.0)
    }
}

/// Renders sorted buckets into a Markdown report.
#[derive(Debug, Clone, Copy)]
pub struct ReportComposer {
    units: UnitSystem,
    format: ReportFormat,
}

impl ReportComposer {
    pub fn new(units: UnitSystem, format: ReportFormat) -> Self {
        Self { units, format }
    }

    /// Render `buckets` (already in chronological order).
    ///
    /// `range` is the requested date range shown in the overall summary; the
    /// observed span of the buckets is used when it is `None`.
    pub fn compose<B: Bucket>(&self, buckets: &[B], range: Option<(NaiveDate, NaiveDate)>) -> String {
        let mut lines = vec![REPORT_TITLE.to_string(), String::new()];

        let mut previous: Option<&BucketStats> = None;
        for bucket in buckets {
            self.render_bucket(&mut lines, bucket, previous);
            previous = Some(bucket.stats());
        }

        self.render_overall(&mut lines, buckets, range);
        lines.join("\n")
    }

    fn weight_unit(&self) -> &'static str {
        self.units.weight_unit()
    }

    fn distance_unit(&self) -> &'static str {
        self.units.distance_unit()
    }

    fn render_bucket<B: Bucket>(&self, lines: &mut Vec<String>, bucket: &B, previous: Option<&BucketStats>) {
        let stats = bucket.stats();
        lines.push(format!("## {}", bucket.heading()));
        lines.push(String::new());

        let weeks = bucket.included_weeks();
        if !weeks.is_empty() {
            let listed: Vec<String> = weeks.iter().map(|w| w.to_string()).collect();
            lines.push(format!("Weeks included: {}", listed.join(", ")));
            lines.push(String::new());
        }

        match self.format {
            ReportFormat::Summary => self.render_breakdown(lines, stats),
            ReportFormat::Detailed => {
                self.render_daily_workouts(lines, stats);
                self.render_exercise_details(lines, stats);
            }
        }

        self.render_statistics(lines, stats, previous);
        lines.push(String::new());
        lines.push(SECTION_RULE.to_string());
        lines.push(String::new());
    }

    fn render_breakdown(&self, lines: &mut Vec<String>, stats: &BucketStats) {
        if !stats.distance_by_exercise.is_empty() {
            lines.push("### Distance by Exercise".to_string());
            for (exercise, distance) in &stats.distance_by_exercise {
                lines.push(format!("- {}: {:.2} {}", exercise, distance, self.distance_unit()));
            }
            lines.push(String::new());
        }

        if !stats.volume_by_exercise.is_empty() {
            lines.push("### Volume by Exercise".to_string());
            for (exercise, volume) in &stats.volume_by_exercise {
                lines.push(format!("- {}: {:.2} {}*reps", exercise, volume, self.weight_unit()));
            }
            lines.push(String::new());
        }
    }

    fn render_daily_workouts(&self, lines: &mut Vec<String>, stats: &BucketStats) {
        lines.push("### Daily Workouts".to_string());
        lines.push(String::new());

        for (minute, sets) in &stats.workouts {
            lines.push(format!("#### {}", minute));
            lines.push(String::new());

            for (exercise, exercise_sets) in group_by_exercise(sets) {
                lines.push(format!("**{}** ({} sets)", exercise, exercise_sets.len()));
                lines.push("| Set | Reps | Weight | Duration | Type |".to_string());
                lines.push("|-----|------|--------|----------|------|".to_string());
                for (i, set) in exercise_sets.iter().enumerate() {
                    lines.push(format!(
                        "| {} | {} | {:.1} {} | {} | {} |",
                        i + 1,
                        set.reps,
                        set.weight,
                        set.weight_unit,
                        format_duration(set.duration),
                        set_type(set.is_warmup, set.is_cardio),
                    ));
                }
                lines.push(String::new());
            }
        }
    }

    fn render_exercise_details(&self, lines: &mut Vec<String>, stats: &BucketStats) {
        let unit = self.weight_unit();
        lines.push("### Exercise Details".to_string());
        lines.push(String::new());

        for (exercise, detail) in &stats.exercise_details {
            lines.push(format!("#### {}", exercise));
            lines.push(format!("- Working Sets: {}", detail.working_sets));
            lines.push(format!("- Warmup Sets: {}", detail.warmup_sets));
            lines.push(format!("- Total Reps: {}", detail.total_reps));
            if detail.is_cardio {
                lines.push(format!("- Total Duration: {}", format_duration(detail.total_duration)));
            }
            lines.push(format!("- Max Weight: {:.1} {}", detail.max_weight, unit));
            lines.push(format!("- Total Volume: {:.1} {}*reps", detail.total_volume, unit));
            lines.push(String::new());

            lines.push("Set Progression:".to_string());
            lines.push("| Set | Weight | Reps | Type |".to_string());
            lines.push("|-----|--------|------|------|".to_string());
            for (i, set) in detail.sets.iter().enumerate() {
                lines.push(format!(
                    "| {} | {:.1} {} | {} | {} |",
                    i + 1,
                    set.weight,
                    unit,
                    set.reps,
                    set_type(set.is_warmup, set.is_cardio),
                ));
            }
            lines.push(String::new());
        }
    }

    fn render_statistics(&self, lines: &mut Vec<String>, stats: &BucketStats, previous: Option<&BucketStats>) {
        lines.push("### Summary Statistics".to_string());
        lines.push(format!("- Total Workout Time: {}", format_duration(stats.total_duration())));
        lines.push(format!("- Strength Training Time: {}", format_duration(stats.strength_duration)));
        lines.push(format!("- Cardio Time: {}", format_duration(stats.cardio_duration)));
        lines.push(format!("- Strength Sessions: {}", stats.session_count));
        lines.push(format!("- Total Distance: {:.2} {}", stats.distance_total, self.distance_unit()));
        lines.push(format!("- Total Reps: {}", stats.reps_total));
        lines.push(format!("- Total Volume: {:.2} {}*reps", stats.volume_total, self.weight_unit()));

        if let Some(prev) = previous {
            if let Some(change) = percent_change(prev.distance_total, stats.distance_total) {
                lines.push(format!("- Distance Change: {:+.2}%", change));
            }
            if let Some(change) = percent_change(prev.volume_total, stats.volume_total) {
                lines.push(format!("- Volume Change: {:+.2}%", change));
            }
        }
    }

    fn render_overall<B: Bucket>(&self, lines: &mut Vec<String>, buckets: &[B], range: Option<(NaiveDate, NaiveDate)>) {
        lines.push("## Overall Summary".to_string());
        lines.push(String::new());

        let observed = match (buckets.first(), buckets.last()) {
            (Some(first), Some(last)) => Some((first.date_span().0, last.date_span().1)),
            _ => None,
        };
        if let Some((start, end)) = range.or(observed) {
            lines.push(format!(
                "- Date Range: {} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ));
        }

        if buckets.is_empty() {
            lines.push("- No workouts found in the selected date range.".to_string());
            return;
        }

        let mut totals = OverallTotals::default();
        for bucket in buckets {
            totals.add(bucket.stats());
        }
        let kind = B::KIND;
        let count = buckets.len();
        let per_bucket = |value: f64| value / count.max(1) as f64;

        lines.push(format!("- {}s: {}", kind, count));
        lines.push(format!("- Total Workout Time: {}", format_duration(totals.duration)));
        lines.push(format!("- Strength Sessions: {}", totals.sessions));
        lines.push(format!("- Total Distance: {:.2} {}", totals.distance, self.distance_unit()));
        lines.push(format!("- Total Reps: {}", totals.reps));
        lines.push(format!("- Total Volume: {:.2} {}*reps", totals.volume, self.weight_unit()));
        lines.push(format!(
            "- Average Workout Time per {}: {}",
            kind,
            format_duration(per_bucket(totals.duration))
        ));
        lines.push(format!(
            "- Average Distance per {}: {:.2} {}",
            kind,
            per_bucket(totals.distance),
            self.distance_unit()
        ));
        lines.push(format!(
            "- Average Volume per {}: {:.2} {}*reps",
            kind,
            per_bucket(totals.volume),
            self.weight_unit()
        ));
    }
}

#[derive(Default)]
struct OverallTotals {
    duration: f64,
    distance: f64,
    volume: f64,
    reps: u64,
    sessions: u32,
}

impl OverallTotals {
    fn add(&mut self, stats: &BucketStats) {
        self.duration += stats.total_duration();
        self.distance += stats.distance_total;
        self.volume += stats.volume_total;
        self.reps += stats.reps_total;
        self.sessions += stats.session_count;
    }
}

fn set_type(is_warmup: bool, is_cardio: bool) -> &'static str {
    if is_cardio {
        "Cardio"
    } else if is_warmup {
        "Warmup"
    } else {
        "Working"
    }
}

/// Group a timeline slot by exercise, keeping first-appearance order.
fn group_by_exercise(sets: &[WorkoutSet]) -> Vec<(&str, Vec<&WorkoutSet>)> {
    let mut groups: Vec<(&str, Vec<&WorkoutSet>)> = Vec::new();
    for set in sets {
        match groups.iter_mut().find(|(name, _)| *name == set.exercise) {
            Some((_, group)) => group.push(set),
            None => groups.push((set.exercise.as_str(), vec![set])),
        }
    }
    groups
}
