//! Synthetic sleep and workout files for demos and manual testing.
//!
//! Calorie figures are toy per-minute rates, not physiology.

use crate::timezone::ReferenceZone;
use crate::{ActivityFile, Error, Result, SleepRecord, WorkoutRecord};
use chrono::{Duration, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SLEEP_FILE_NAME: &str = "sleep.json";
pub const ACTIVITY_FILE_NAME: &str = "workouts.json";

pub const WORKOUT_TYPES: &[&str] = &["Running", "Cycling", "Swimming", "Yoga", "HIIT", "Weights"];

/// Generator parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    #[serde(default = "default_entries")]
    pub sleep_entries: usize,

    #[serde(default = "default_entries")]
    pub workout_entries: usize,

    /// First day of the window (inclusive, midnight)
    #[serde(default = "default_start")]
    pub start: NaiveDate,

    /// Last instant of the window is midnight of this day
    #[serde(default = "default_end")]
    pub end: NaiveDate,

    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            sleep_entries: default_entries(),
            workout_entries: default_entries(),
            start: default_start(),
            end: default_end(),
            seed: None,
        }
    }
}

fn default_entries() -> usize {
    5
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 1).unwrap_or_default()
}

fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 31).unwrap_or_default()
}

/// Rough kcal per minute for a workout type (6 for anything unknown)
pub fn calories_per_minute(workout_type: &str) -> u32 {
    match workout_type {
        "Running" => 11,
        "Cycling" => 8,
        "Swimming" => 10,
        "Yoga" => 4,
        "HIIT" => 12,
        "Weights" => 6,
        _ => 6,
    }
}

pub fn calories_for_workout(workout_type: &str, duration_minutes: u32) -> u32 {
    calories_per_minute(workout_type) * duration_minutes
}

/// Random record source over a fixed time window
pub struct Generator {
    rng: StdRng,
    window_start: NaiveDateTime,
    window_secs: i64,
    zone: ReferenceZone,
}

impl Generator {
    pub fn new(config: &GeneratorConfig, zone: ReferenceZone) -> Result<Self> {
        if config.end < config.start {
            return Err(Error::Config(format!(
                "Generator window ends ({}) before it starts ({})",
                config.end, config.start
            )));
        }

        let window_start = config.start.and_hms_opt(0, 0, 0).unwrap_or_default();
        let window_end = config.end.and_hms_opt(0, 0, 0).unwrap_or_default();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            rng,
            window_start,
            window_secs: (window_end - window_start).num_seconds(),
            zone,
        })
    }

    fn random_wall_clock(&mut self) -> NaiveDateTime {
        let offset = self.rng.random_range(0..=self.window_secs);
        self.window_start + Duration::seconds(offset)
    }

    /// Sleep sessions starting at random UTC instants, 5 to 9 hours long
    pub fn sleep_records(&mut self, count: usize) -> Vec<SleepRecord> {
        (0..count)
            .map(|i| {
                let start = Utc.from_utc_datetime(&self.random_wall_clock());
                let hours: f64 = self.rng.random_range(5.0..=9.0);
                let duration_hours = (hours * 10.0).round() / 10.0;
                let end = start + Duration::seconds((duration_hours * 3600.0).round() as i64);

                SleepRecord {
                    sleep_id: Some(i as u64 + 1),
                    start: start.to_rfc3339_opts(SecondsFormat::Secs, true),
                    end: end.to_rfc3339_opts(SecondsFormat::Secs, true),
                    duration_hours,
                }
            })
            .collect()
    }

    /// Workouts at random wall-clock times in the reference zone
    pub fn workouts(&mut self, count: usize) -> Vec<WorkoutRecord> {
        (0..count)
            .map(|i| {
                let naive = self.random_wall_clock();
                let local = self.zone.localize(naive).with_timezone(&self.zone.tz());
                let workout_type = WORKOUT_TYPES
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or("Running");
                let duration_minutes = self.rng.random_range(20..=90);

                WorkoutRecord {
                    id: Some(i as u64 + 1),
                    workout_type: workout_type.to_string(),
                    timestamp_local: local.format("%Y-%m-%d %H:%M:%S %Z").to_string(),
                    duration_minutes,
                    calories_burned: calories_for_workout(workout_type, duration_minutes),
                }
            })
            .collect()
    }
}

fn write_pretty<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(value)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Write `sleep.json` into `dir`, returning its path
pub fn write_sleep_file(records: &[SleepRecord], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(SLEEP_FILE_NAME);
    write_pretty(&records, &path)?;
    tracing::info!("Generated {} sleep entries at {:?}", records.len(), path);
    Ok(path)
}

/// Write `workouts.json` into `dir`, returning its path
pub fn write_activity_file(records: &[WorkoutRecord], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(ACTIVITY_FILE_NAME);
    let file = ActivityFile {
        workouts: records.to_vec(),
    };
    write_pretty(&file, &path)?;
    tracing::info!("Generated {} workouts at {:?}", records.len(), path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_activity, load_sleep};
    use crate::merge::merge_streams;

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(seed),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_calorie_rates() {
        assert_eq!(calories_for_workout("Running", 30), 330);
        assert_eq!(calories_for_workout("Yoga", 45), 180);
        assert_eq!(calories_for_workout("Pilates", 10), 60);
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let zone = ReferenceZone::default();
        let mut a = Generator::new(&seeded(42), zone).unwrap();
        let mut b = Generator::new(&seeded(42), zone).unwrap();

        assert_eq!(a.sleep_records(5), b.sleep_records(5));
        assert_eq!(a.workouts(5), b.workouts(5));
    }

    #[test]
    fn test_generated_values_are_in_range() {
        let zone = ReferenceZone::default();
        let mut generator = Generator::new(&seeded(7), zone).unwrap();

        let sleep = generator.sleep_records(50);
        assert_eq!(sleep.len(), 50);
        assert_eq!(sleep[0].sleep_id, Some(1));
        for record in &sleep {
            assert!((5.0..=9.0).contains(&record.duration_hours));
            assert!(record.start.ends_with('Z'));
        }

        for workout in generator.workouts(50) {
            assert!((20..=90).contains(&workout.duration_minutes));
            assert!(WORKOUT_TYPES.contains(&workout.workout_type.as_str()));
            assert_eq!(
                workout.calories_burned,
                calories_for_workout(&workout.workout_type, workout.duration_minutes)
            );
            let abbr = workout.timestamp_local.rsplit(' ').next().unwrap();
            assert!(abbr == "PDT" || abbr == "PST", "{}", workout.timestamp_local);
        }
    }

    #[test]
    fn test_rejects_inverted_window() {
        let config = GeneratorConfig {
            start: NaiveDate::from_ymd_opt(2023, 11, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
            ..GeneratorConfig::default()
        };
        assert!(Generator::new(&config, ReferenceZone::default()).is_err());
    }

    #[test]
    fn test_generated_files_load_and_merge() {
        let temp_dir = tempfile::tempdir().unwrap();
        let zone = ReferenceZone::default();
        let mut generator = Generator::new(&seeded(3), zone).unwrap();

        let sleep_path = write_sleep_file(&generator.sleep_records(5), temp_dir.path()).unwrap();
        let activity_path = write_activity_file(&generator.workouts(5), temp_dir.path()).unwrap();

        let sleep = load_sleep(&sleep_path).unwrap();
        let workouts = load_activity(&activity_path).unwrap();
        assert_eq!(sleep.len(), 5);
        assert_eq!(workouts.len(), 5);

        let merged = merge_streams(&sleep, &workouts, &zone).unwrap();
        let events: usize = merged.values().map(|b| b.events.len()).sum();
        assert_eq!(events, 10);
    }
}
