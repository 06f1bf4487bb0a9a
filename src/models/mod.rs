// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod bucket;
pub mod entry;
pub mod period;

pub use bucket::{Bucket, BucketStats, ExerciseDetail, SetRecord, WeekBucket, WeekKey, WorkoutSet};
pub use entry::{Classification, ClassifiedEntry, Entry, EntryError, ExerciseKind, RawEntry};
pub use period::{PeriodBucket, PeriodMode, PeriodModeError};
