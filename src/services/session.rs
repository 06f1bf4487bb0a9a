// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strength session reconstruction.
//!
//! Exports record sets, not sessions. Sessions are rebuilt from timestamp
//! gaps so strength time can be estimated. This is the one order-sensitive
//! step of aggregation: input must be a single local day's entries in
//! chronological order.

use crate::models::ClassifiedEntry;

/// Maximum gap (inclusive) between a session's last set and the next one.
pub const SESSION_GAP_SECS: i64 = 1800;

/// Estimated time per set when a session carries a single timestamp.
const WORKING_SET_ESTIMATE_SECS: f64 = 120.0;
const WARMUP_SET_ESTIMATE_SECS: f64 = 60.0;

/// A contiguous run of strength sets within one day.
#[derive(Debug)]
pub struct Session<'a, 'e> {
    entries: Vec<&'a ClassifiedEntry<'e>>,
}

impl<'a, 'e> Session<'a, 'e> {
    fn start(entry: &'a ClassifiedEntry<'e>) -> Self {
        Self {
            entries: vec![entry],
        }
    }

    pub fn entries(&self) -> &[&'a ClassifiedEntry<'e>] {
        &self.entries
    }

    /// Whether `entry` is close enough to this session's last set to join it.
    fn accepts(&self, entry: &ClassifiedEntry<'_>) -> bool {
        self.entries.last().is_some_and(|last| {
            (entry.entry.timestamp - last.entry.timestamp).num_seconds() <= SESSION_GAP_SECS
        })
    }

    /// Session length in seconds.
    ///
    /// Uses the recorded time span when the sets carry more than one distinct
    /// timestamp. Imports that stamp every set identically get an estimate of
    /// 120 s per working set and 60 s per warm-up set instead.
    pub fn duration(&self) -> f64 {
        let (Some(first), Some(last)) = (self.entries.first(), self.entries.last()) else {
            return 0.0;
        };
        let distinct_timestamps = self
            .entries
            .iter()
            .any(|e| e.entry.timestamp != first.entry.timestamp);

        if distinct_timestamps {
            (last.entry.timestamp - first.entry.timestamp).num_milliseconds() as f64 / 1000.0
        } else {
            self.entries
                .iter()
                .map(|e| {
                    if e.entry.is_warmup {
                        WARMUP_SET_ESTIMATE_SECS
                    } else {
                        WORKING_SET_ESTIMATE_SECS
                    }
                })
                .sum()
        }
    }
}

/// Group one day's strength entries into sessions.
///
/// Each entry joins the first session (in creation order) whose last set is
/// within [`SESSION_GAP_SECS`]; otherwise it opens a new session. Entries that
/// are not strength-classified are skipped.
pub fn build_sessions<'a, 'e>(day: &'a [ClassifiedEntry<'e>]) -> Vec<Session<'a, 'e>> {
    let mut sessions: Vec<Session<'a, 'e>> = Vec::new();

    for entry in day.iter().filter(|e| e.kind().is_strength()) {
        match sessions.iter_mut().find(|s| s.accepts(entry)) {
            Some(session) => session.entries.push(entry),
            None => sessions.push(Session::start(entry)),
        }
    }

    sessions
}
