//! Summary statistics over a merged day map.
//!
//! Every function walks the map in its iteration order (ascending day), so
//! "consecutive" for streaks means consecutive entries, not calendar days.

use crate::{DayBucket, DayKey, DayMap};
use serde::{Deserialize, Serialize};

/// Thresholds that decide whether a day counts as healthy
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthPolicy {
    #[serde(default = "default_min_sleep_hours")]
    pub min_sleep_hours: f64,

    /// Compared against `total_calories`, not workout minutes
    #[serde(default = "default_min_calories")]
    pub min_calories: u64,

    /// Count a healthy run that is still open at the last day (off: only
    /// runs closed by an unhealthy day count)
    #[serde(default = "default_count_open_streak")]
    pub count_open_streak: bool,

    /// Upper bound (exclusive) for the short-sleep calorie average
    #[serde(default = "default_short_sleep_hours")]
    pub short_sleep_hours: f64,
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            min_sleep_hours: default_min_sleep_hours(),
            min_calories: default_min_calories(),
            count_open_streak: default_count_open_streak(),
            short_sleep_hours: default_short_sleep_hours(),
        }
    }
}

fn default_min_sleep_hours() -> f64 {
    7.0
}

fn default_min_calories() -> u64 {
    30
}

fn default_count_open_streak() -> bool {
    false
}

fn default_short_sleep_hours() -> f64 {
    6.0
}

/// A value observed on a specific day
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayValue<T> {
    pub day: DayKey,
    pub value: T,
}

/// Highest and lowest values across the map
///
/// `max` is `None` when no day exceeds zero; `min` is `None` only for an
/// empty map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extremes<T> {
    pub max: Option<DayValue<T>>,
    pub min: Option<DayValue<T>>,
}

/// Longest run of healthy days
///
/// `end` is the day after the run: the unhealthy day that closed it, or the
/// calendar day after the last entry for a run open at the end of the map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Streak {
    pub length: usize,
    pub start: Option<DayKey>,
    pub end: Option<DayKey>,
}

fn extremes<T, F>(days: &DayMap, value_of: F) -> Extremes<T>
where
    T: PartialOrd + Copy + Default,
    F: Fn(&DayBucket) -> T,
{
    let mut max: Option<DayValue<T>> = None;
    let mut min: Option<DayValue<T>> = None;

    for (day, bucket) in days {
        let value = value_of(bucket);
        let max_so_far = max.map_or(T::default(), |m| m.value);
        if value > max_so_far {
            max = Some(DayValue { day: *day, value });
        }
        if min.map_or(true, |m| value < m.value) {
            min = Some(DayValue { day: *day, value });
        }
    }

    Extremes { max, min }
}

/// Days with the most and least sleep (ties keep the earliest day)
pub fn sleep_extremes(days: &DayMap) -> Extremes<f64> {
    extremes(days, DayBucket::sleep_hours)
}

/// Days with the most and least calories burned (ties keep the earliest day)
pub fn activity_extremes(days: &DayMap) -> Extremes<u64> {
    extremes(days, DayBucket::calories)
}

pub fn is_healthy(bucket: &DayBucket, policy: &HealthPolicy) -> bool {
    bucket.sleep_hours() >= policy.min_sleep_hours && bucket.calories() >= policy.min_calories
}

/// Find the longest run of consecutive healthy entries
///
/// A run replaces the best one only when strictly longer, so ties keep
/// the first run found.
pub fn longest_healthy_streak(days: &DayMap, policy: &HealthPolicy) -> Streak {
    let mut best = Streak::default();
    let mut run_start: Option<DayKey> = None;
    let mut run_len = 0;
    let mut last_day: Option<DayKey> = None;

    for (day, bucket) in days {
        if is_healthy(bucket, policy) {
            if run_len == 0 {
                run_start = Some(*day);
            }
            run_len += 1;
        } else {
            if run_len > best.length {
                best = Streak {
                    length: run_len,
                    start: run_start,
                    end: Some(*day),
                };
            }
            run_len = 0;
            run_start = None;
        }
        last_day = Some(*day);
    }

    if run_len > 0 {
        if policy.count_open_streak && run_len > best.length {
            best = Streak {
                length: run_len,
                start: run_start,
                end: last_day.and_then(|d| d.succ_opt()),
            };
        } else if !policy.count_open_streak {
            tracing::debug!("Ignoring open healthy run of {} days at end of data", run_len);
        }
    }

    best
}

/// Mean calories over days with less than `hours` of sleep
///
/// Returns `None` when no day qualifies.
pub fn average_calories_when_sleep_under(days: &DayMap, hours: f64) -> Option<f64> {
    let (total, count) = days
        .values()
        .filter(|b| b.sleep_hours() < hours)
        .fold((0u64, 0u32), |(total, count), b| {
            (total + b.calories(), count + 1)
        });

    if count == 0 {
        None
    } else {
        Some(total as f64 / f64::from(count))
    }
}

pub fn average_calories_when_sleep_under_6h(days: &DayMap) -> Option<f64> {
    average_calories_when_sleep_under(days, default_short_sleep_hours())
}
