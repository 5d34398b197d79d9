//! Core domain types for the daylog system.
//!
//! This module defines the fundamental types used throughout the system:
//! - Raw sleep and workout records as they appear in input files
//! - Normalized events stored inside a day
//! - Day buckets and the ordered day map produced by the merge

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Calendar day in the reference timezone, serialized as `YYYY-MM-DD`
pub type DayKey = NaiveDate;

/// Day-keyed buckets, always iterated in ascending day order
pub type DayMap = BTreeMap<DayKey, DayBucket>;

// ============================================================================
// Input Records
// ============================================================================

/// A sleep session from the sleep file
///
/// `start` and `end` are kept verbatim; they are only parsed when the
/// record is bucketed. `duration_hours` is authoritative even if it
/// disagrees with `end - start`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SleepRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_id: Option<u64>,
    pub start: String,
    pub end: String,
    pub duration_hours: f64,
}

/// A workout from the activity file
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub workout_type: String,
    /// Wall clock plus zone abbreviation, e.g. `2023-10-01 23:00:00 PDT`
    pub timestamp_local: String,
    pub duration_minutes: u32,
    pub calories_burned: u32,
}

/// Top-level shape of the activity file
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct ActivityFile {
    #[serde(default)]
    pub workouts: Vec<WorkoutRecord>,
}

// ============================================================================
// Normalized Events and Buckets
// ============================================================================

/// Which stream an event came from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Sleep,
    Workout,
}

/// A record copied into a day bucket, minus its source identifier
///
/// `local_time` is the instant used for bucketing, expressed in the
/// reference timezone.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum NormalizedEvent {
    Sleep {
        start: String,
        end: String,
        duration_hours: f64,
        local_time: DateTime<FixedOffset>,
    },
    Workout {
        #[serde(rename = "type")]
        workout_type: String,
        timestamp_local: String,
        duration_minutes: u32,
        calories_burned: u32,
        local_time: DateTime<FixedOffset>,
    },
}

impl NormalizedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            NormalizedEvent::Sleep { .. } => EventKind::Sleep,
            NormalizedEvent::Workout { .. } => EventKind::Workout,
        }
    }

    pub fn local_time(&self) -> DateTime<FixedOffset> {
        match self {
            NormalizedEvent::Sleep { local_time, .. }
            | NormalizedEvent::Workout { local_time, .. } => *local_time,
        }
    }
}

/// Everything recorded for one calendar day
///
/// Each total is owned by one stream: sleep sets `total_sleep_hours`,
/// activity sets the other three. A total stays `None` (and is omitted
/// from JSON) until its stream contributes to the day.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DayBucket {
    #[serde(default)]
    pub events: Vec<NormalizedEvent>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_sleep_hours: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_calories: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_workout_minutes: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_types: Option<BTreeSet<String>>,
}

impl DayBucket {
    /// Hours slept, 0 when no sleep was recorded
    pub fn sleep_hours(&self) -> f64 {
        self.total_sleep_hours.unwrap_or(0.0)
    }

    /// Calories burned, 0 when no workout was recorded
    pub fn calories(&self) -> u64 {
        self.total_calories.unwrap_or(0)
    }

    pub fn workout_minutes(&self) -> u64 {
        self.total_workout_minutes.unwrap_or(0)
    }

    /// Number of events of the given kind
    pub fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}
