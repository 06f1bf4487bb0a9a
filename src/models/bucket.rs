// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calendar-bucketed workout aggregates.
//!
//! [`BucketStats`] is the shared accumulator behind both week and period
//! buckets. Its `merge` is associative, so partial buckets built from any
//! partition of the input combine into the same totals.

use crate::models::entry::ClassifiedEntry;
use crate::time_utils::week_start;
use crate::units::UnitSystem;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// One recorded set inside an [`ExerciseDetail`].
#[derive(Debug, Clone, PartialEq)]
pub struct SetRecord {
    /// Display weight, unrounded
    pub weight: f64,
    pub reps: u32,
    pub is_warmup: bool,
    /// Seconds
    pub duration: f64,
    pub is_cardio: bool,
}

/// One set as it appears in the workout timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub exercise: String,
    pub weight: f64,
    pub weight_unit: &'static str,
    pub reps: u32,
    pub is_warmup: bool,
    /// Local clock time (`HH:MM`)
    pub time: String,
    pub duration: f64,
    pub is_cardio: bool,
}

/// Per-exercise statistics within a bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDetail {
    /// Recorded sets in chronological order
    pub sets: Vec<SetRecord>,
    pub total_volume: f64,
    pub max_weight: f64,
    pub total_reps: u64,
    pub total_duration: f64,
    pub working_sets: u32,
    pub warmup_sets: u32,
    /// Fixed by the first set seen for this exercise in the bucket
    pub is_cardio: bool,
}

impl ExerciseDetail {
    pub fn new(is_cardio: bool) -> Self {
        Self {
            sets: Vec::new(),
            total_volume: 0.0,
            max_weight: 0.0,
            total_reps: 0,
            total_duration: 0.0,
            working_sets: 0,
            warmup_sets: 0,
            is_cardio,
        }
    }

    pub fn record(&mut self, set: SetRecord) {
        self.total_volume += set.weight * f64::from(set.reps);
        self.max_weight = self.max_weight.max(set.weight);
        self.total_reps += u64::from(set.reps);
        self.total_duration += set.duration;
        if set.is_warmup {
            self.warmup_sets += 1;
        } else {
            self.working_sets += 1;
        }
        self.sets.push(set);
    }

    /// Fold `other` (a later bucket) into this one.
    pub fn merge(&mut self, other: ExerciseDetail) {
        self.total_volume += other.total_volume;
        self.max_weight = self.max_weight.max(other.max_weight);
        self.total_reps += other.total_reps;
        self.total_duration += other.total_duration;
        self.working_sets += other.working_sets;
        self.warmup_sets += other.warmup_sets;
        self.sets.extend(other.sets);
    }
}

/// Accumulated statistics for a week or period.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketStats {
    /// Seconds, summed from cardio entry durations
    pub cardio_duration: f64,
    /// Seconds, summed from strength session estimates
    pub strength_duration: f64,
    pub distance_total: f64,
    pub reps_total: u64,
    pub volume_total: f64,
    pub session_count: u32,
    pub entry_count: usize,
    pub distance_by_exercise: BTreeMap<String, f64>,
    pub volume_by_exercise: BTreeMap<String, f64>,
    pub exercise_details: BTreeMap<String, ExerciseDetail>,
    /// Timeline keyed by local `YYYY-MM-DD HH:MM`
    pub workouts: BTreeMap<String, Vec<WorkoutSet>>,
}

impl BucketStats {
    /// Accumulate one classified entry.
    ///
    /// Strength time is not taken from the entry; it arrives separately via
    /// [`BucketStats::add_session`].
    pub fn record(&mut self, item: &ClassifiedEntry<'_>, units: UnitSystem) {
        let entry = item.entry;
        let kind = item.kind();
        let weight = item.derived.display_weight;

        self.entry_count += 1;
        self.reps_total += u64::from(entry.reps);
        if kind.is_cardio() {
            self.cardio_duration += entry.duration_s;
        }

        self.workouts
            .entry(item.minute_key())
            .or_default()
            .push(WorkoutSet {
                exercise: entry.exercise.clone(),
                weight,
                weight_unit: item.derived.weight_unit,
                reps: entry.reps,
                is_warmup: entry.is_warmup,
                time: item.clock_time(),
                duration: entry.duration_s,
                is_cardio: kind.is_cardio(),
            });

        self.exercise_details
            .entry(entry.exercise.clone())
            .or_insert_with(|| ExerciseDetail::new(kind.is_cardio()))
            .record(SetRecord {
                weight,
                reps: entry.reps,
                is_warmup: entry.is_warmup,
                duration: entry.duration_s,
                is_cardio: kind.is_cardio(),
            });

        let (distance, _) = units.distance(entry.distance_m / 1000.0);
        self.distance_total += distance;
        if distance > 0.0 {
            *self
                .distance_by_exercise
                .entry(entry.exercise.clone())
                .or_insert(0.0) += distance;
        }

        let volume = item.volume();
        self.volume_total += volume;
        if volume > 0.0 {
            *self
                .volume_by_exercise
                .entry(entry.exercise.clone())
                .or_insert(0.0) += volume;
        }
    }

    /// Account for one strength session of the given length (seconds).
    pub fn add_session(&mut self, duration: f64) {
        self.strength_duration += duration;
        self.session_count += 1;
    }

    pub fn total_duration(&self) -> f64 {
        self.cardio_duration + self.strength_duration
    }

    /// Fold `other` into this bucket. `other` is expected to be the later of
    /// the two so that set lists stay chronological.
    pub fn merge(&mut self, other: BucketStats) {
        self.cardio_duration += other.cardio_duration;
        self.strength_duration += other.strength_duration;
        self.distance_total += other.distance_total;
        self.reps_total += other.reps_total;
        self.volume_total += other.volume_total;
        self.session_count += other.session_count;
        self.entry_count += other.entry_count;

        for (exercise, distance) in other.distance_by_exercise {
            *self.distance_by_exercise.entry(exercise).or_insert(0.0) += distance;
        }
        for (exercise, volume) in other.volume_by_exercise {
            *self.volume_by_exercise.entry(exercise).or_insert(0.0) += volume;
        }
        for (exercise, detail) in other.exercise_details {
            match self.exercise_details.get_mut(&exercise) {
                Some(existing) => existing.merge(detail),
                None => {
                    self.exercise_details.insert(exercise, detail);
                }
            }
        }
        for (minute, sets) in other.workouts {
            self.workouts.entry(minute).or_default().extend(sets);
        }
    }
}

/// Monday-to-Sunday week, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self(week_start(date))
    }

    pub fn start(&self) -> NaiveDate {
        self.0
    }

    pub fn end(&self) -> NaiveDate {
        self.0 + Duration::days(6)
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start().format("%Y-%m-%d"),
            self.end().format("%Y-%m-%d")
        )
    }
}

/// Statistics for one calendar week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    pub key: WeekKey,
    pub stats: BucketStats,
}

/// Common view over week and period buckets used by the report composer.
pub trait Bucket {
    /// Bucket noun used in report labels ("Week", "Period").
    const KIND: &'static str;

    /// Section heading, e.g. `Week: 2024-01-15 to 2024-01-21`.
    fn heading(&self) -> String;

    fn stats(&self) -> &BucketStats;

    /// First and last calendar day covered by observed weeks.
    fn date_span(&self) -> (NaiveDate, NaiveDate);

    /// Constituent weeks, for buckets built by merging.
    fn included_weeks(&self) -> &[WeekKey] {
        &[]
    }
}

impl Bucket for WeekBucket {
    const KIND: &'static str = "Week";

    fn heading(&self) -> String {
        format!("Week: {}", self.key)
    }

    fn stats(&self) -> &BucketStats {
        &self.stats
    }

    fn date_span(&self) -> (NaiveDate, NaiveDate) {
        (self.key.start(), self.key.end())
    }
}
