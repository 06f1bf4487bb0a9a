// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Unit systems and display conversion.
//!
//! Entries are stored in canonical units (kilograms, meters, seconds).
//! Conversion to the display system happens exactly once per entry.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const LBS_PER_KG: f64 = 2.20462;
const MILES_PER_KM: f64 = 0.621371;

/// Unit system used for report display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Convert a weight in kilograms to the display unit.
    pub fn weight(self, kg: f64) -> (f64, &'static str) {
        match self {
            UnitSystem::Metric => (kg, "kg"),
            UnitSystem::Imperial => (kg * LBS_PER_KG, "lbs"),
        }
    }

    /// Convert a distance in kilometers to the display unit.
    pub fn distance(self, km: f64) -> (f64, &'static str) {
        match self {
            UnitSystem::Metric => (km, "km"),
            UnitSystem::Imperial => (km * MILES_PER_KM, "miles"),
        }
    }

    pub fn weight_unit(self) -> &'static str {
        self.weight(0.0).1
    }

    pub fn distance_unit(self) -> &'static str {
        self.distance(0.0).1
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_is_identity() {
        assert_eq!(UnitSystem::Metric.weight(100.0), (100.0, "kg"));
        assert_eq!(UnitSystem::Metric.distance(5.0), (5.0, "km"));
    }

    #[test]
    fn test_imperial_conversion() {
        let (lbs, unit) = UnitSystem::Imperial.weight(100.0);
        assert!((lbs - 220.462).abs() < 1e-9);
        assert_eq!(unit, "lbs");

        let (miles, unit) = UnitSystem::Imperial.distance(10.0);
        assert!((miles - 6.21371).abs() < 1e-9);
        assert_eq!(unit, "miles");
    }

    #[test]
    fn test_deserialize_lowercase() {
        let system: UnitSystem = serde_json::from_str("\"imperial\"").unwrap();
        assert_eq!(system, UnitSystem::Imperial);
        assert!(serde_json::from_str::<UnitSystem>("\"stones\"").is_err());
    }
}
