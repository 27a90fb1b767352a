//! # zmanim-engine
//!
//! Deterministic prayer-time schedules for synagogue displays.
//!
//! A synagogue configures its prayer times declaratively: a fixed clock time,
//! or a number of minutes before/after sunrise or sunset. Given one day's
//! astronomical times, this crate turns that configuration into the ordered
//! `(label, HH:MM)` lines a display shows, and never fails doing so: any line
//! that cannot be timed shows a placeholder instead.
//!
//! ## Modules
//!
//! - [`model`] — typed prayer-time entries and daily astronomical times
//! - [`record`] — stored document shapes and conversion to the typed model
//! - [`schedule`] — the resolver: entries + times → weekday and Sabbath lists
//! - [`editing`] — add / replace / remove / move entries with dense renumbering
//! - [`panel`] — the "times of day" panel
//! - [`sabbath`] — candle lighting, Havdalah and the weekly portion
//! - [`alerts`] — emergency messages for the display ticker
//! - [`clock`] — timezone-explicit parsing and `HH:MM` formatting
//! - [`error`] — Error types

pub mod alerts;
pub mod clock;
pub mod editing;
pub mod error;
pub mod model;
pub mod panel;
pub mod record;
pub mod sabbath;
pub mod schedule;

pub use alerts::{messages_for_city, EmergencyMessage};
pub use clock::{DEFAULT_TIMEZONE, PLACEHOLDER};
pub use editing::{add_entry, move_entry, new_entry, remove_entry, renumber, replace_entry, validate_entry};
pub use error::ZmanimError;
pub use model::{
    Anchor, DailyAstronomicalTimes, DayType, PrayerTimeEntry, PrayerType, RelativeTime,
    TimeRelation, TimeSpec,
};
pub use panel::{daily_times_panel, weekday_summary, Zman};
pub use record::{PrayerTimeRecord, RelativeTimeRecord, SynagogueRecord};
pub use sabbath::{sabbath_panel, CandleLightingOffset, SabbathPanel, SabbathTimes};
pub use schedule::{
    resolve, resolve_clock_time, resolve_with_options, ClockTime, ResolveOptions,
    ResolvedSchedule, ResolvedScheduleLine,
};
