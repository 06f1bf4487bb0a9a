// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged exercise sets: raw export rows, canonical entries and their
//! derived classification.

use crate::time_utils::{parse_timestamp, TimestampParseError};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use validator::Validate;

/// One row of a Fitbod-style workout export.
///
/// Empty cells (`null` or `""`) in the numeric columns read as 0.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawEntry {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Exercise")]
    #[validate(length(min = 1, max = 200))]
    pub exercise: String,
    #[serde(rename = "Reps", default, deserialize_with = "deserialize_reps")]
    pub reps: u32,
    #[serde(rename = "Weight(kg)", default, deserialize_with = "deserialize_number")]
    #[validate(range(min = 0.0))]
    pub weight_kg: f64,
    #[serde(rename = "Distance(m)", default, deserialize_with = "deserialize_number")]
    #[validate(range(min = 0.0))]
    pub distance_m: f64,
    #[serde(rename = "Duration(s)", default)]
    #[validate(range(min = 0.0))]
    pub duration_s: Option<f64>,
    #[serde(rename = "Incline", default)]
    pub incline: Option<f64>,
    #[serde(rename = "Resistance", default)]
    pub resistance: Option<f64>,
    #[serde(rename = "isWarmup", default, deserialize_with = "deserialize_flag")]
    pub is_warmup: bool,
    #[serde(rename = "Note", default)]
    pub note: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub multiplier: Option<f64>,
}

/// Reasons a raw row cannot become an [`Entry`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntryError {
    #[error(transparent)]
    Timestamp(#[from] TimestampParseError),

    #[error("Exercise name is empty")]
    MissingExercise,
}

impl RawEntry {
    /// Convert into a canonical entry.
    ///
    /// Weight is rounded to the nearest 0.5 kg (ties to even) before the row
    /// multiplier is applied, matching how the export app records
    /// plate-loaded weights.
    pub fn into_entry(self) -> Result<Entry, EntryError> {
        let exercise = self.exercise.trim().to_string();
        if exercise.is_empty() {
            return Err(EntryError::MissingExercise);
        }
        let timestamp = parse_timestamp(&self.date)?;
        let weight_kg = (self.weight_kg * 2.0).round_ties_even() / 2.0 * self.multiplier.unwrap_or(1.0);

        Ok(Entry {
            exercise,
            reps: self.reps,
            weight_kg,
            distance_m: self.distance_m,
            duration_s: self.duration_s.unwrap_or(0.0),
            is_warmup: self.is_warmup,
            timestamp,
            note: self.note.filter(|n| !n.trim().is_empty()),
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Text(String),
}

/// Accept `true`/`false` as JSON booleans or as (case-insensitive) strings.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(false),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid isWarmup value {:?}", other))),
        },
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Number(f64),
    Text(String),
}

/// Numeric value of a spreadsheet cell; empty cells are 0.
fn cell_value<E: serde::de::Error>(cell: Option<Cell>, column: &str) -> Result<f64, E> {
    match cell {
        None => Ok(0.0),
        Some(Cell::Number(value)) => Ok(value),
        Some(Cell::Text(text)) if text.trim().is_empty() => Ok(0.0),
        Some(Cell::Text(text)) => text
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid {} value {:?}", column, text))),
    }
}

fn deserialize_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    cell_value(Option::<Cell>::deserialize(deserializer)?, "numeric")
}

/// Reps may arrive as floats (`5.0`) from spreadsheet exports; the fraction
/// is dropped.
fn deserialize_reps<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = cell_value::<D::Error>(Option::<Cell>::deserialize(deserializer)?, "Reps")?;
    if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
        return Err(D::Error::custom(format!("invalid Reps value {}", value)));
    }
    Ok(value.trunc() as u32)
}

/// A single logged set in canonical units. Never mutated after ingestion.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub exercise: String,
    pub reps: u32,
    /// Kilograms
    pub weight_kg: f64,
    /// Meters
    pub distance_m: f64,
    /// Seconds (0 when not recorded)
    pub duration_s: f64,
    pub is_warmup: bool,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
}

/// Exercise type derived from an entry's numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseKind {
    Cardio,
    Strength,
    /// Neither cardio nor strength (e.g. a short carry logged by distance only).
    Other,
}

impl ExerciseKind {
    pub fn is_cardio(self) -> bool {
        self == ExerciseKind::Cardio
    }

    pub fn is_strength(self) -> bool {
        self == ExerciseKind::Strength
    }
}

/// Fields derived from an entry at classification time.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub kind: ExerciseKind,
    /// Timestamp in the report time zone. Applied once, here.
    pub local: DateTime<Tz>,
    /// Weight in the display unit system, unrounded.
    pub display_weight: f64,
    pub weight_unit: &'static str,
}

/// An entry paired with its derived fields.
#[derive(Debug, Clone)]
pub struct ClassifiedEntry<'a> {
    pub entry: &'a Entry,
    pub derived: Classification,
}

impl ClassifiedEntry<'_> {
    pub fn kind(&self) -> ExerciseKind {
        self.derived.kind
    }

    pub fn local_date(&self) -> NaiveDate {
        self.derived.local.date_naive()
    }

    /// Display weight × reps.
    pub fn volume(&self) -> f64 {
        self.derived.display_weight * f64::from(self.entry.reps)
    }

    /// Workout timeline key (`YYYY-MM-DD HH:MM`).
    pub fn minute_key(&self) -> String {
        self.derived.local.format("%Y-%m-%d %H:%M").to_string()
    }

    pub fn clock_time(&self) -> String {
        self.derived.local.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawEntry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_into_entry_rounds_weight_then_applies_multiplier() {
        let entry = raw(json!({
            "Date": "2024-01-15 10:00:00",
            "Exercise": "Dumbbell Bench Press",
            "Reps": 10,
            "Weight(kg)": 22.7,
            "multiplier": 2.0
        }))
        .into_entry()
        .unwrap();

        assert_eq!(entry.weight_kg, 45.0);
        assert_eq!(entry.duration_s, 0.0);
        assert!(!entry.is_warmup);
    }

    #[test]
    fn test_weight_rounding_ties_to_even() {
        let weight = |kg: f64| {
            raw(json!({"Date": "2024-01-15", "Exercise": "Bench Press", "Weight(kg)": kg}))
                .into_entry()
                .unwrap()
                .weight_kg
        };

        assert_eq!(weight(61.25), 61.0);
        assert_eq!(weight(11.25), 11.0);
        assert_eq!(weight(61.75), 62.0);
        assert_eq!(weight(61.3), 61.5);
    }

    #[test]
    fn test_empty_numeric_cells_read_as_zero() {
        let entry = raw(json!({
            "Date": "2024-01-15",
            "Exercise": "Plank",
            "Reps": null,
            "Weight(kg)": null,
            "Distance(m)": "",
            "Duration(s)": null,
            "isWarmup": null
        }));

        assert_eq!(entry.reps, 0);
        assert_eq!(entry.weight_kg, 0.0);
        assert_eq!(entry.distance_m, 0.0);
        assert_eq!(entry.duration_s, None);
        assert!(!entry.is_warmup);
    }

    #[test]
    fn test_float_and_text_reps() {
        let float = raw(json!({"Date": "2024-01-15", "Exercise": "Squat", "Reps": 5.0}));
        let text = raw(json!({"Date": "2024-01-15", "Exercise": "Squat", "Reps": "8", "Weight(kg)": "60.5"}));

        assert_eq!(float.reps, 5);
        assert_eq!(text.reps, 8);
        assert_eq!(text.weight_kg, 60.5);
    }

    #[test]
    fn test_negative_reps_rejected() {
        let result = serde_json::from_value::<RawEntry>(
            json!({"Date": "2024-01-15", "Exercise": "Squat", "Reps": -3}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_warmup_flag_accepts_strings_and_bools() {
        let as_string = raw(json!({"Date": "2024-01-15", "Exercise": "Squat", "isWarmup": "True"}));
        let as_bool = raw(json!({"Date": "2024-01-15", "Exercise": "Squat", "isWarmup": true}));
        let missing = raw(json!({"Date": "2024-01-15", "Exercise": "Squat"}));

        assert!(as_string.is_warmup);
        assert!(as_bool.is_warmup);
        assert!(!missing.is_warmup);
    }

    #[test]
    fn test_warmup_flag_rejects_unknown_text() {
        let result = serde_json::from_value::<RawEntry>(
            json!({"Date": "2024-01-15", "Exercise": "Squat", "isWarmup": "maybe"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_into_entry_rejects_blank_exercise() {
        let err = raw(json!({"Date": "2024-01-15", "Exercise": "   "}))
            .into_entry()
            .unwrap_err();
        assert_eq!(err, EntryError::MissingExercise);
    }

    #[test]
    fn test_into_entry_surfaces_bad_timestamp() {
        let err = raw(json!({"Date": "yesterday", "Exercise": "Squat"}))
            .into_entry()
            .unwrap_err();
        assert!(matches!(err, EntryError::Timestamp(ref e) if e.value == "yesterday"));
    }

    #[test]
    fn test_validation_rejects_negative_weight() {
        let entry = raw(json!({"Date": "2024-01-15", "Exercise": "Squat", "Weight(kg)": -5.0}));
        assert!(entry.validate().is_err());
    }
}
