//! Console summary of a merged day map.

use crate::stats::{
    activity_extremes, average_calories_when_sleep_under, longest_healthy_streak,
    sleep_extremes, Extremes, HealthPolicy, Streak,
};
use crate::DayMap;
use std::fmt;

const RULE: &str = "==================================================";

/// All statistics shown in the report
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub day_count: usize,
    pub sleep: Extremes<f64>,
    pub activity: Extremes<u64>,
    pub streak: Streak,
    pub short_sleep_average: Option<f64>,
    pub policy: HealthPolicy,
}

impl Summary {
    pub fn from_map(days: &DayMap, policy: &HealthPolicy) -> Self {
        Self {
            day_count: days.len(),
            sleep: sleep_extremes(days),
            activity: activity_extremes(days),
            streak: longest_healthy_streak(days, policy),
            short_sleep_average: average_calories_when_sleep_under(days, policy.short_sleep_hours),
            policy: policy.clone(),
        }
    }
}

fn write_extremes<T: fmt::Display + Copy>(
    f: &mut fmt::Formatter<'_>,
    ext: &Extremes<T>,
    max_label: &str,
    min_label: &str,
) -> fmt::Result {
    write!(f, "- ")?;
    if let Some(max) = ext.max {
        write!(f, "{}: {} (on {})", max_label, max.value, max.day)?;
    }
    if let Some(min) = ext.min {
        if ext.max.is_some() {
            write!(f, "; ")?;
        }
        write!(f, "{}: {} (on {})", min_label, min.value, min.day)?;
    }
    writeln!(f)
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", RULE)?;
        writeln!(f, "SUMMARY OF HEALTH DATA:")?;
        writeln!(f, "- {} days of health data recorded", self.day_count)?;

        write_extremes(f, &self.sleep, "Max Time Slept", "Min Time Slept")?;
        write_extremes(f, &self.activity, "Max Calories Burnt", "Min Calories Burnt")?;

        write!(
            f,
            "- Longest streak of Healthy Days ({}+ hours of sleep and {}+ calories burned): {} days",
            self.policy.min_sleep_hours, self.policy.min_calories, self.streak.length
        )?;
        if let (Some(start), Some(end)) = (self.streak.start, self.streak.end) {
            write!(f, " ({} - {})", start, end)?;
        }
        writeln!(f)?;

        match self.short_sleep_average {
            Some(avg) => writeln!(
                f,
                "- Average calories on Days with < {} hours of sleep: {:.2} calories",
                self.policy.short_sleep_hours, avg
            )?,
            None => writeln!(
                f,
                "- Average calories on Days with < {} hours of sleep: undefined (no qualifying days)",
                self.policy.short_sleep_hours
            )?,
        }

        writeln!(f, "{}", RULE)
    }
}
