//! Loading sleep and activity input files.

use crate::{ActivityFile, Error, Result, SleepRecord, WorkoutRecord};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}

/// Load a sleep file: a JSON array of sleep records
pub fn load_sleep(path: &Path) -> Result<Vec<SleepRecord>> {
    let records: Vec<SleepRecord> = read_json(path)?;
    tracing::info!("Loaded {} sleep entries from {:?}", records.len(), path);
    Ok(records)
}

/// Load an activity file: `{"workouts": [...]}`
///
/// A file without a `workouts` key yields no workouts.
pub fn load_activity(path: &Path) -> Result<Vec<WorkoutRecord>> {
    let file: ActivityFile = read_json(path)?;
    tracing::info!(
        "Loaded {} activity entries from {:?}",
        file.workouts.len(),
        path
    );
    Ok(file.workouts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_sleep_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sleep.json");
        fs::write(
            &path,
            r#"[
  {"sleep_id": 1, "start": "2023-10-02T06:30:00Z", "end": "2023-10-02T14:30:00Z", "duration_hours": 8},
  {"start": "2023-10-03T06:00:00Z", "end": "2023-10-03T11:00:00Z", "duration_hours": 5.2}
]"#,
        )
        .unwrap();

        let records = load_sleep(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sleep_id, Some(1));
        assert_eq!(records[0].duration_hours, 8.0);
        assert_eq!(records[1].sleep_id, None);
    }

    #[test]
    fn test_load_activity_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.json");
        fs::write(
            &path,
            r#"{"workouts": [
  {"id": 3, "type": "Yoga", "timestamp_local": "2023-10-01 23:00:00 PDT", "duration_minutes": 45, "calories_burned": 180}
]}"#,
        )
        .unwrap();

        let workouts = load_activity(&path).unwrap();
        assert_eq!(workouts.len(), 1);
        assert_eq!(workouts[0].workout_type, "Yoga");
        assert_eq!(workouts[0].calories_burned, 180);
    }

    #[test]
    fn test_activity_file_without_workouts_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("workouts.json");
        fs::write(&path, "{}").unwrap();

        assert!(load_activity(&path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = load_sleep(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::MissingFile(_)));
    }

    #[test]
    fn test_invalid_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("sleep.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_sleep(&path).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
