//! Folding one event stream into day buckets.
//!
//! Each record resolves to a day key in the reference zone, gets copied into
//! that day's event list without its identifier, and bumps the totals owned
//! by its stream.

use crate::timezone::ReferenceZone;
use crate::{
    DayBucket, DayKey, DayMap, NormalizedEvent, Result, SleepRecord, WorkoutRecord,
};
use chrono::{DateTime, FixedOffset};
use std::collections::BTreeSet;

/// A record that can be placed into a day bucket
pub trait DayEvent {
    /// Instant used for bucketing, expressed in the reference zone
    fn resolve(&self, zone: &ReferenceZone) -> Result<DateTime<FixedOffset>>;

    /// Day the record belongs to
    fn day_key(&self, zone: &ReferenceZone, resolved: &DateTime<FixedOffset>) -> DayKey {
        zone.day_key(resolved)
    }

    /// Copy of the record as stored in a bucket (identifier stripped)
    fn to_event(&self, local_time: DateTime<FixedOffset>) -> NormalizedEvent;

    /// Add this record's contribution to the bucket totals
    fn accumulate(&self, bucket: &mut DayBucket);
}

impl DayEvent for SleepRecord {
    fn resolve(&self, zone: &ReferenceZone) -> Result<DateTime<FixedOffset>> {
        zone.resolve_instant(&self.start)
    }

    fn to_event(&self, local_time: DateTime<FixedOffset>) -> NormalizedEvent {
        NormalizedEvent::Sleep {
            start: self.start.clone(),
            end: self.end.clone(),
            duration_hours: self.duration_hours,
            local_time,
        }
    }

    fn accumulate(&self, bucket: &mut DayBucket) {
        bucket.add_sleep(self.duration_hours);
    }
}

impl DayEvent for WorkoutRecord {
    fn resolve(&self, zone: &ReferenceZone) -> Result<DateTime<FixedOffset>> {
        zone.resolve_wall_clock(&self.timestamp_local)
    }

    /// Wall clocks are keyed by the date as written, with no conversion
    fn day_key(&self, _zone: &ReferenceZone, resolved: &DateTime<FixedOffset>) -> DayKey {
        resolved.date_naive()
    }

    fn to_event(&self, local_time: DateTime<FixedOffset>) -> NormalizedEvent {
        NormalizedEvent::Workout {
            workout_type: self.workout_type.clone(),
            timestamp_local: self.timestamp_local.clone(),
            duration_minutes: self.duration_minutes,
            calories_burned: self.calories_burned,
            local_time,
        }
    }

    fn accumulate(&self, bucket: &mut DayBucket) {
        bucket.add_workout(&self.workout_type, self.duration_minutes, self.calories_burned);
    }
}

impl DayBucket {
    /// Add slept hours, creating the sleep total on first use
    pub fn add_sleep(&mut self, hours: f64) {
        *self.total_sleep_hours.get_or_insert(0.0) += hours;
    }

    /// Add one workout, creating the activity totals on first use
    pub fn add_workout(&mut self, workout_type: &str, minutes: u32, calories: u32) {
        *self.total_calories.get_or_insert(0) += u64::from(calories);
        *self.total_workout_minutes.get_or_insert(0) += u64::from(minutes);
        self.training_types
            .get_or_insert_with(BTreeSet::new)
            .insert(workout_type.to_string());
    }
}

/// Day buckets under construction for a single stream
#[derive(Debug, Default)]
pub struct DayAccumulator {
    zone: ReferenceZone,
    days: DayMap,
}

impl DayAccumulator {
    pub fn new(zone: ReferenceZone) -> Self {
        Self {
            zone,
            days: DayMap::new(),
        }
    }

    /// Bucket for `day`, created empty if this is its first event
    pub fn bucket_mut(&mut self, day: DayKey) -> &mut DayBucket {
        self.days.entry(day).or_default()
    }

    /// Place one record into its day
    pub fn push<E: DayEvent>(&mut self, record: &E) -> Result<DayKey> {
        let resolved = record.resolve(&self.zone)?;
        let day = record.day_key(&self.zone, &resolved);

        let bucket = self.bucket_mut(day);
        bucket.events.push(record.to_event(resolved));
        record.accumulate(bucket);

        Ok(day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn finish(self) -> DayMap {
        self.days
    }
}

/// Fold a stream of records into day buckets
///
/// The first malformed timestamp aborts the whole stream.
pub fn aggregate<E: DayEvent>(records: &[E], zone: &ReferenceZone) -> Result<DayMap> {
    let mut acc = DayAccumulator::new(*zone);
    for record in records {
        acc.push(record)?;
    }

    tracing::debug!(
        "Aggregated {} records into {} days ({})",
        records.len(),
        acc.len(),
        zone
    );
    Ok(acc.finish())
}

pub fn aggregate_sleep(records: &[SleepRecord], zone: &ReferenceZone) -> Result<DayMap> {
    aggregate(records, zone)
}

pub fn aggregate_workouts(records: &[WorkoutRecord], zone: &ReferenceZone) -> Result<DayMap> {
    aggregate(records, zone)
}
