//! Timestamp normalization against a single reference timezone.
//!
//! Sleep records carry absolute instants (usually `Z`-suffixed), workouts
//! carry wall-clock strings that are already local. Both end up as an
//! instant in the reference zone and a calendar [`DayKey`] in that zone.

use crate::{DayKey, Error, Result};
use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use std::fmt;
use std::str::FromStr;

/// Accepted layouts for instants that are not strict RFC 3339
const INSTANT_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Accepted layouts for wall-clock timestamps (after the zone abbreviation is removed)
const WALL_CLOCK_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Furthest a spring-forward gap is searched backwards
const MAX_GAP_HOURS: i64 = 48;

/// The timezone every day key is computed in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReferenceZone {
    tz: Tz,
}

impl ReferenceZone {
    /// IANA name used when nothing is configured
    pub const DEFAULT_NAME: &'static str = "America/Los_Angeles";

    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Look up a zone by IANA name, e.g. `Europe/Berlin`
    pub fn from_name(name: &str) -> Result<Self> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|e| Error::Config(format!("Unknown timezone {:?}: {}", name, e)))
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Calendar day of an instant, as seen in the reference zone
    pub fn day_key(&self, at: &DateTime<FixedOffset>) -> DayKey {
        at.with_timezone(&self.tz).date_naive()
    }

    /// Parse an absolute instant and express it in the reference zone
    pub fn resolve_instant(&self, value: &str) -> Result<DateTime<FixedOffset>> {
        let instant = parse_instant(value)?;
        Ok(instant.with_timezone(&self.tz).fixed_offset())
    }

    /// Parse a wall-clock string that is already in the reference zone
    ///
    /// No conversion is applied. A trailing zone abbreviation is checked
    /// against the zone's own abbreviation and only logged on mismatch.
    pub fn resolve_wall_clock(&self, value: &str) -> Result<DateTime<FixedOffset>> {
        let (naive, abbreviation) = parse_wall_clock(value)?;
        let local = self.localize(naive);

        if let Some(abbr) = abbreviation {
            let expected = local.with_timezone(&self.tz).offset().to_string();
            if !abbr.eq_ignore_ascii_case(&expected) {
                tracing::warn!(
                    "Timestamp {:?} is labelled {} but {} uses {} at that time",
                    value,
                    abbr,
                    self.name(),
                    expected
                );
            }
        }

        Ok(local)
    }

    /// Day key for an absolute instant string
    pub fn day_key_for_instant(&self, value: &str) -> Result<DayKey> {
        Ok(self.resolve_instant(value)?.date_naive())
    }

    /// Day key for a wall-clock string; the date is taken as written
    pub fn day_key_for_wall_clock(&self, value: &str) -> Result<DayKey> {
        let (naive, _) = parse_wall_clock(value)?;
        Ok(naive.date())
    }

    /// Attach the reference zone to a wall-clock time
    ///
    /// Ambiguous times (DST fall-back) take the earlier instant. Times that
    /// do not exist (spring-forward gap) keep the offset in force before
    /// the gap.
    pub(crate) fn localize(&self, naive: NaiveDateTime) -> DateTime<FixedOffset> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.fixed_offset(),
            LocalResult::Ambiguous(earliest, _) => earliest.fixed_offset(),
            LocalResult::None => {
                let before_gap = self.offset_before_gap(naive);
                tracing::debug!(
                    "Wall clock {} does not exist in {}, using offset {}",
                    naive,
                    self.name(),
                    before_gap
                );
                DateTime::from_naive_utc_and_offset(naive - before_gap, before_gap)
            }
        }
    }

    /// Offset of the last valid wall-clock time before `naive`
    ///
    /// Walks back an hour at a time, so gaps up to a full skipped day
    /// (Pacific/Apia, 2011) still resolve.
    fn offset_before_gap(&self, naive: NaiveDateTime) -> FixedOffset {
        (1..=MAX_GAP_HOURS)
            .find_map(|hours| {
                self.tz
                    .from_local_datetime(&(naive - Duration::hours(hours)))
                    .earliest()
            })
            .map(|dt| dt.offset().fix())
            .unwrap_or_else(|| self.tz.offset_from_utc_datetime(&naive).fix())
    }
}

impl Default for ReferenceZone {
    fn default() -> Self {
        Self::new(chrono_tz::America::Los_Angeles)
    }
}

impl FromStr for ReferenceZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl fmt::Display for ReferenceZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse an absolute instant in RFC 3339 or a close variant
pub fn parse_instant(value: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }

    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| Error::malformed(value, "expected an ISO-8601 instant with offset"))
}

/// Split a wall-clock string into its time and optional zone abbreviation
pub fn parse_wall_clock(value: &str) -> Result<(NaiveDateTime, Option<&str>)> {
    let trimmed = value.trim();
    let (clock, abbreviation) = match trimmed.rsplit_once(' ') {
        Some((head, tail)) if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_alphabetic()) => {
            (head.trim_end(), Some(tail))
        }
        _ => (trimmed, None),
    };

    WALL_CLOCK_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(clock, fmt).ok())
        .map(|naive| (naive, abbreviation))
        .ok_or_else(|| Error::malformed(value, "expected YYYY-MM-DD HH:MM:SS [ZONE]"))
}
