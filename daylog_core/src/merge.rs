//! Merging the sleep and activity day maps, and persisting the result.
//!
//! The snapshot is written atomically: serialize into a temp file next to
//! the destination, sync it, then rename over the old snapshot. Readers
//! only ever see a complete old or new file.

use crate::aggregate::{aggregate_sleep, aggregate_workouts};
use crate::timezone::ReferenceZone;
use crate::{DayBucket, DayMap, Error, Result, SleepRecord, WorkoutRecord};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl DayBucket {
    /// Fold another bucket for the same day into this one
    ///
    /// Events are appended after ours. Totals add up (each stream owns its
    /// own totals, so in practice one side is always `None`). Training types
    /// are unioned.
    pub fn absorb(&mut self, other: DayBucket) {
        self.events.extend(other.events);
        self.total_sleep_hours = sum_opt(self.total_sleep_hours, other.total_sleep_hours);
        self.total_calories = sum_opt(self.total_calories, other.total_calories);
        self.total_workout_minutes =
            sum_opt(self.total_workout_minutes, other.total_workout_minutes);

        if let Some(theirs) = other.training_types {
            self.training_types
                .get_or_insert_with(BTreeSet::new)
                .extend(theirs);
        }
    }
}

fn sum_opt<T: std::ops::Add<Output = T>>(a: Option<T>, b: Option<T>) -> Option<T> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Combine the sleep-side and activity-side day maps
///
/// The result holds every day from either side. For a shared day, sleep
/// events come first, followed by activity events.
pub fn merge(sleep: DayMap, activity: DayMap) -> DayMap {
    if sleep.is_empty() {
        tracing::info!("No sleep data, using {} activity days as-is", activity.len());
        return activity;
    }
    if activity.is_empty() {
        tracing::info!("No activity data, using {} sleep days as-is", sleep.len());
        return sleep;
    }

    let mut merged = sleep;
    let mut shared = 0;
    for (day, bucket) in activity {
        match merged.get_mut(&day) {
            Some(existing) => {
                existing.absorb(bucket);
                shared += 1;
            }
            None => {
                merged.insert(day, bucket);
            }
        }
    }

    tracing::debug!("Merged into {} days ({} shared)", merged.len(), shared);
    merged
}

/// Aggregate both streams independently, then merge them
pub fn merge_streams(
    sleep: &[SleepRecord],
    workouts: &[WorkoutRecord],
    zone: &ReferenceZone,
) -> Result<DayMap> {
    let sleep_days = aggregate_sleep(sleep, zone)?;
    let activity_days = aggregate_workouts(workouts, zone)?;
    Ok(merge(sleep_days, activity_days))
}

/// Write the merged map as pretty JSON, replacing any previous snapshot
pub fn write_snapshot(days: &DayMap, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        days.serialize(&mut serializer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote {} days to {:?}", days.len(), path);
    Ok(())
}
