//! Prayer schedule resolution.
//!
//! Turns a synagogue's configured prayer times plus one day's astronomical
//! times into two ordered lists of `(label, HH:MM)` lines, one per day type.
//!
//! # Guarantees
//!
//! - Pure: no system clock, no I/O. The same entries and times always yield
//!   the same output, whatever the machine's timezone.
//! - Total: nothing here returns an error or panics on bad data. A line that
//!   cannot be timed shows the placeholder and the rest of the list is
//!   unaffected.
//!
//! # Functions
//!
//! - [`resolve`] — resolve with the default reference timezone and placeholder
//! - [`resolve_with_options`] — resolve with explicit [`ResolveOptions`]
//! - [`resolve_clock_time`] — time a single entry

use chrono::{NaiveTime, TimeDelta};
use chrono_tz::Tz;
use serde::Serialize;

use crate::clock::{
    format_clock_time, local_time, parse_clock_time, parse_timezone, DEFAULT_TIMEZONE,
    PLACEHOLDER,
};
use crate::error::ZmanimError;
use crate::model::{DailyAstronomicalTimes, DayType, PrayerTimeEntry, RelativeTime, TimeSpec};

/// Options for [`resolve_with_options`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOptions {
    /// Civil timezone in which clock times are displayed.
    pub timezone: Tz,
    /// Text shown for any line that has no time.
    pub placeholder: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            placeholder: PLACEHOLDER.to_string(),
        }
    }
}

impl ResolveOptions {
    /// Default options with a different IANA timezone.
    pub fn with_timezone(timezone: &str) -> Result<Self, ZmanimError> {
        Ok(Self {
            timezone: parse_timezone(timezone)?,
            ..Self::default()
        })
    }
}

/// The computed time of one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTime {
    At(NaiveTime),
    Unavailable,
}

impl ClockTime {
    pub fn render(self, placeholder: &str) -> String {
        match self {
            ClockTime::At(t) => format_clock_time(t),
            ClockTime::Unavailable => placeholder.to_string(),
        }
    }
}

/// One line of a resolved schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedScheduleLine {
    pub description: String,
    /// `HH:MM`, or the placeholder.
    pub clock_time: String,
}

/// Both day-type schedules, each in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedSchedule {
    pub weekday: Vec<ResolvedScheduleLine>,
    pub sabbath: Vec<ResolvedScheduleLine>,
}

impl ResolvedSchedule {
    pub fn lines(&self, day_type: DayType) -> &[ResolvedScheduleLine] {
        match day_type {
            DayType::Weekday => &self.weekday,
            DayType::Sabbath => &self.sabbath,
        }
    }
}

/// Resolve `entries` against `astro` using [`ResolveOptions::default`].
///
/// # Examples
///
/// ```
/// use zmanim_engine::clock::parse_instant;
/// use zmanim_engine::model::{DailyAstronomicalTimes, DayType, PrayerTimeEntry, PrayerType, TimeRelation, TimeSpec};
/// use zmanim_engine::schedule::resolve;
///
/// let astro = DailyAstronomicalTimes {
///     sunset: parse_instant("2026-01-15T17:30:00+02:00"),
///     ..Default::default()
/// };
/// let mincha = PrayerTimeEntry {
///     id: "m".into(),
///     day_type: DayType::Weekday,
///     prayer_type: PrayerType::Mincha,
///     description: String::new(),
///     time: TimeSpec::relative(TimeRelation::BeforeSunset, 25),
///     order: 0,
/// };
///
/// let schedule = resolve(&[mincha], Some(&astro));
/// assert_eq!(schedule.weekday[0].clock_time, "17:05");
/// assert_eq!(schedule.weekday[0].description, "מנחה");
/// ```
pub fn resolve(
    entries: &[PrayerTimeEntry],
    astro: Option<&DailyAstronomicalTimes>,
) -> ResolvedSchedule {
    resolve_with_options(entries, astro, &ResolveOptions::default())
}

/// Resolve `entries` against `astro` with explicit options.
///
/// Entries are partitioned by day type and stably sorted by `order`, so
/// entries sharing an `order` keep their input sequence. When `astro` is
/// `None` every relative entry shows the placeholder while fixed entries
/// still resolve.
pub fn resolve_with_options(
    entries: &[PrayerTimeEntry],
    astro: Option<&DailyAstronomicalTimes>,
    options: &ResolveOptions,
) -> ResolvedSchedule {
    ResolvedSchedule {
        weekday: resolve_group(entries, DayType::Weekday, astro, options),
        sabbath: resolve_group(entries, DayType::Sabbath, astro, options),
    }
}

fn resolve_group(
    entries: &[PrayerTimeEntry],
    day_type: DayType,
    astro: Option<&DailyAstronomicalTimes>,
    options: &ResolveOptions,
) -> Vec<ResolvedScheduleLine> {
    let mut group: Vec<&PrayerTimeEntry> =
        entries.iter().filter(|e| e.day_type == day_type).collect();
    group.sort_by_key(|e| e.order);

    group
        .into_iter()
        .map(|entry| ResolvedScheduleLine {
            description: entry.display_label().to_string(),
            clock_time: resolve_clock_time(entry, astro, &options.timezone)
                .render(&options.placeholder),
        })
        .collect()
}

/// Compute the clock time of a single entry.
pub fn resolve_clock_time(
    entry: &PrayerTimeEntry,
    astro: Option<&DailyAstronomicalTimes>,
    tz: &Tz,
) -> ClockTime {
    match &entry.time {
        TimeSpec::Fixed { time } => {
            if time.trim().is_empty() {
                return ClockTime::Unavailable;
            }
            match parse_clock_time(time) {
                Some(t) => ClockTime::At(t),
                None => {
                    tracing::warn!(entry = %entry.id, value = %time, "unreadable fixed time");
                    ClockTime::Unavailable
                }
            }
        }
        TimeSpec::Relative(relative) => match astro {
            Some(astro) => relative_clock_time(&entry.id, relative, astro, tz),
            None => ClockTime::Unavailable,
        },
        TimeSpec::Unrecognized { time_type, .. } => {
            tracing::warn!(entry = %entry.id, time_type = %time_type, "unrecognized time specification");
            ClockTime::Unavailable
        }
    }
}

fn relative_clock_time(
    id: &str,
    relative: &RelativeTime,
    astro: &DailyAstronomicalTimes,
    tz: &Tz,
) -> ClockTime {
    let Some(anchor) = astro.anchor(relative.relation.anchor()) else {
        return ClockTime::Unavailable;
    };

    if relative.minutes < 0 {
        tracing::debug!(entry = %id, minutes = relative.minutes, "negative offset, using its magnitude");
    }
    let magnitude = relative.minutes.unsigned_abs();
    let shifted = i64::try_from(magnitude)
        .ok()
        .and_then(|m| m.checked_mul(relative.relation.sign()))
        .and_then(TimeDelta::try_minutes)
        .and_then(|delta| anchor.checked_add_signed(delta));

    match shifted {
        Some(instant) => ClockTime::At(local_time(&instant, tz)),
        None => {
            tracing::warn!(entry = %id, minutes = relative.minutes, "offset out of range");
            ClockTime::Unavailable
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
