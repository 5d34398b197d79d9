#![forbid(unsafe_code)]

//! Core domain model and merge engine for daylog.
//!
//! This crate provides:
//! - Domain types (sleep/workout records, day buckets, the day map)
//! - Timezone normalization into calendar day keys
//! - Per-stream day aggregation and the two-stream merge
//! - Summary statistics (extremes, healthy streaks, averages)
//! - Loading, snapshot output and synthetic data generation

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod timezone;
pub mod aggregate;
pub mod merge;
pub mod stats;
pub mod summary;
pub mod loader;
pub mod generate;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use timezone::ReferenceZone;
pub use aggregate::{aggregate_sleep, aggregate_workouts, DayAccumulator, DayEvent};
pub use merge::{merge, merge_streams, write_snapshot};
pub use stats::{
    activity_extremes, average_calories_when_sleep_under, average_calories_when_sleep_under_6h,
    is_healthy, longest_healthy_streak, sleep_extremes, HealthPolicy,
};
pub use summary::Summary;
pub use loader::{load_activity, load_sleep};
