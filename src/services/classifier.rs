// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise type classification.

use crate::models::{Classification, ClassifiedEntry, Entry, ExerciseKind};
use crate::units::UnitSystem;
use chrono_tz::Tz;

/// Untimed entries longer than this with no reps or distance count as cardio
/// (elliptical, rowing machine).
const STATIONARY_CARDIO_MIN_SECS: f64 = 300.0;

/// Classify a set from its canonical (kg, meters, seconds) magnitudes.
pub fn classify(reps: u32, weight_kg: f64, distance_m: f64, duration_s: f64) -> ExerciseKind {
    let is_cardio = (duration_s > 0.0 && distance_m > 0.0) // running, walking
        || (reps == 0 && distance_m == 0.0 && duration_s > STATIONARY_CARDIO_MIN_SECS);
    if is_cardio {
        return ExerciseKind::Cardio;
    }

    let is_strength = (reps == 0 && weight_kg > 0.0) // carries, sled push
        || (reps > 0 && weight_kg == 0.0 && duration_s == 0.0) // bodyweight
        || (reps > 0 && weight_kg > 0.0)
        || (reps > 0 && distance_m == 0.0)
        || (reps == 0 && distance_m == 0.0); // holds: plank, dead hang

    if is_strength {
        ExerciseKind::Strength
    } else {
        ExerciseKind::Other
    }
}

/// Derive the classification, local timestamp and display weight for an entry.
pub fn classify_entry(entry: &Entry, tz: Tz, units: UnitSystem) -> ClassifiedEntry<'_> {
    let (display_weight, weight_unit) = units.weight(entry.weight_kg);
    ClassifiedEntry {
        entry,
        derived: Classification {
            kind: classify(
                entry.reps,
                entry.weight_kg,
                entry.distance_m,
                entry.duration_s,
            ),
            local: entry.timestamp.with_timezone(&tz),
            display_weight,
            weight_unit,
        },
    }
}
