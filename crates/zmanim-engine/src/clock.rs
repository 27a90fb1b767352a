//! Clock-time parsing and formatting in a fixed reference timezone.
//!
//! Every function here takes its timezone explicitly. Nothing reads the
//! machine's local timezone or the system clock, so the same inputs format
//! to the same `HH:MM` string wherever the code runs.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ZmanimError;

/// Reference timezone of the synagogues served by this system.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Jerusalem;

/// Sentinel shown wherever a time cannot be produced.
pub const PLACEHOLDER: &str = "--:--";

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz, ZmanimError> {
    s.parse::<Tz>()
        .map_err(|_| ZmanimError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse a 24-hour clock time: `"07:30"`, `"7:30"`, `"19:05:00"`.
///
/// Returns `None` for anything else, including 12-hour forms.
pub fn parse_clock_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

/// Format a wall-clock time as `HH:MM`, dropping seconds.
pub fn format_clock_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Wall-clock time of `instant` in `tz`.
pub fn local_time<T: TimeZone>(instant: &DateTime<T>, tz: &Tz) -> NaiveTime {
    instant.with_timezone(tz).time()
}

/// Civil date of `now` in `tz`.
pub fn local_date(now: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    now.with_timezone(tz).date_naive()
}

/// Parse an RFC 3339 instant, keeping its UTC offset.
pub fn parse_instant(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}
