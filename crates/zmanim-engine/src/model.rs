//! Typed prayer-time configuration and daily astronomical times.
//!
//! [`PrayerTimeEntry`] is the typed form of one configured schedule line. Its
//! time specification is a tagged variant ([`TimeSpec`]) so that exactly one
//! of "fixed clock time" and "offset from sunrise/sunset" is ever active.
//!
//! The stored document shape lives in [`crate::record`]; conversion between
//! the two is lenient where the stored data can be wrong (unknown relation,
//! missing relative block) and strict only where the entry cannot be placed
//! at all (unknown day type).

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::clock::parse_instant;
use crate::record::RelativeTimeRecord;

// ── Enumerations ────────────────────────────────────────────────────────────

/// Which of the two independent schedules an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Sabbath,
}

impl DayType {
    pub const ALL: [DayType; 2] = [DayType::Weekday, DayType::Sabbath];

    /// Label stored by the editing UI.
    pub fn label(self) -> &'static str {
        match self {
            DayType::Weekday => "חול",
            DayType::Sabbath => "שבת",
        }
    }

    /// Accepts the stored Hebrew label or the English identifier.
    pub fn parse(s: &str) -> Option<DayType> {
        match s.trim() {
            "חול" | "weekday" | "Weekday" => Some(DayType::Weekday),
            "שבת" | "sabbath" | "Sabbath" | "shabbat" => Some(DayType::Sabbath),
            _ => None,
        }
    }
}

/// Semantic category of a prayer. Used for labeling only, never for timing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrayerType {
    Mincha,
    Arvit,
    Shacharit,
    Other,
    /// A stored value outside the known set, kept verbatim (may be empty).
    Unrecognized(String),
}

impl PrayerType {
    pub fn label(&self) -> &str {
        match self {
            PrayerType::Mincha => "מנחה",
            PrayerType::Arvit => "ערבית",
            PrayerType::Shacharit => "שחרית",
            PrayerType::Other => "אחר",
            PrayerType::Unrecognized(raw) => raw,
        }
    }

    pub fn parse(s: &str) -> PrayerType {
        match s.trim() {
            "מנחה" | "mincha" | "Mincha" => PrayerType::Mincha,
            "ערבית" | "arvit" | "Arvit" | "maariv" => PrayerType::Arvit,
            "שחרית" | "shacharit" | "Shacharit" => PrayerType::Shacharit,
            "אחר" | "other" | "Other" => PrayerType::Other,
            _ => PrayerType::Unrecognized(s.to_string()),
        }
    }
}

/// Astronomical instant a relative time is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Sunrise,
    Sunset,
}

/// Direction and anchor of a relative prayer time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRelation {
    BeforeSunset,
    AfterSunset,
    BeforeSunrise,
    AfterSunrise,
}

impl TimeRelation {
    pub fn label(self) -> &'static str {
        match self {
            TimeRelation::BeforeSunset => "לפני השקיעה",
            TimeRelation::AfterSunset => "אחרי השקיעה",
            TimeRelation::BeforeSunrise => "לפני הזריחה",
            TimeRelation::AfterSunrise => "אחרי הזריחה",
        }
    }

    pub fn parse(s: &str) -> Option<TimeRelation> {
        match s.trim() {
            "לפני השקיעה" | "before_sunset" | "BeforeSunset" => Some(TimeRelation::BeforeSunset),
            "אחרי השקיעה" | "after_sunset" | "AfterSunset" => Some(TimeRelation::AfterSunset),
            "לפני הזריחה" | "before_sunrise" | "BeforeSunrise" => Some(TimeRelation::BeforeSunrise),
            "אחרי הזריחה" | "after_sunrise" | "AfterSunrise" => Some(TimeRelation::AfterSunrise),
            _ => None,
        }
    }

    pub fn anchor(self) -> Anchor {
        match self {
            TimeRelation::BeforeSunset | TimeRelation::AfterSunset => Anchor::Sunset,
            TimeRelation::BeforeSunrise | TimeRelation::AfterSunrise => Anchor::Sunrise,
        }
    }

    /// `-1` for "before", `+1` for "after".
    pub fn sign(self) -> i64 {
        match self {
            TimeRelation::BeforeSunset | TimeRelation::BeforeSunrise => -1,
            TimeRelation::AfterSunset | TimeRelation::AfterSunrise => 1,
        }
    }
}

// ── Entries ─────────────────────────────────────────────────────────────────

/// An offset in minutes from sunrise or sunset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelativeTime {
    pub relation: TimeRelation,
    pub minutes: i64,
}

/// How an entry's clock time is specified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeSpec {
    /// A local clock time as typed by the gabbai (normally `HH:MM`, may be empty).
    Fixed { time: String },
    Relative(RelativeTime),
    /// Stored data that names no usable time. The raw fields are kept so an
    /// edit of another entry does not destroy them.
    Unrecognized {
        time_type: String,
        fixed_time: Option<String>,
        relative_time: Option<RelativeTimeRecord>,
    },
}

impl TimeSpec {
    pub fn fixed(time: impl Into<String>) -> Self {
        TimeSpec::Fixed { time: time.into() }
    }

    pub fn relative(relation: TimeRelation, minutes: i64) -> Self {
        TimeSpec::Relative(RelativeTime { relation, minutes })
    }
}

/// One configured line of a synagogue's prayer schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerTimeEntry {
    pub id: String,
    pub day_type: DayType,
    pub prayer_type: PrayerType,
    pub description: String,
    pub time: TimeSpec,
    /// Display position within the day-type group. Ties keep input order.
    pub order: i64,
}

impl PrayerTimeEntry {
    /// The text shown to viewers: the description, or the prayer type label
    /// when the description is blank.
    pub fn display_label(&self) -> &str {
        if self.description.trim().is_empty() {
            self.prayer_type.label()
        } else {
            &self.description
        }
    }
}

// ── Daily astronomical times ────────────────────────────────────────────────

/// Named instants for one date and location, as returned by the provider.
///
/// Every field is optional. A value the provider sent in an unreadable form is
/// treated exactly like a missing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAstronomicalTimes {
    /// Civil date the times belong to, when the provider says.
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub alot_ha_shachar: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub misheyakir: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub sunrise: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        rename = "sofZmanShmaMGA",
        deserialize_with = "lenient_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub sof_zman_shma_mga: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub sof_zman_shma: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        rename = "sofZmanTfillaMGA",
        deserialize_with = "lenient_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub sof_zman_tfilla_mga: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub sof_zman_tfilla: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub chatzot: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub mincha_gedola: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub mincha_ketana: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub plag_ha_mincha: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub sunset: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        rename = "tzeit7083deg",
        deserialize_with = "lenient_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub tzeit_7083deg: Option<DateTime<FixedOffset>>,
    #[serde(
        default,
        rename = "tzeit72min",
        deserialize_with = "lenient_instant",
        skip_serializing_if = "Option::is_none"
    )]
    pub tzeit_72min: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "lenient_instant", skip_serializing_if = "Option::is_none")]
    pub chatzot_night: Option<DateTime<FixedOffset>>,
}

impl DailyAstronomicalTimes {
    pub fn anchor(&self, anchor: Anchor) -> Option<DateTime<FixedOffset>> {
        match anchor {
            Anchor::Sunrise => self.sunrise,
            Anchor::Sunset => self.sunset,
        }
    }
}

fn lenient_instant<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => {
            let parsed = parse_instant(&s);
            if parsed.is_none() {
                tracing::warn!(value = %s, "ignoring unreadable astronomical time");
            }
            parsed
        }
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(value = %other, "ignoring non-string astronomical time");
            None
        }
    })
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_type_parse_accepts_both_forms() {
        assert_eq!(DayType::parse("חול"), Some(DayType::Weekday));
        assert_eq!(DayType::parse("sabbath"), Some(DayType::Sabbath));
        assert_eq!(DayType::parse("holiday"), None);
    }

    #[test]
    fn test_prayer_type_unrecognized_keeps_raw() {
        assert_eq!(PrayerType::parse("שחרית"), PrayerType::Shacharit);
        let other = PrayerType::parse("סליחות");
        assert_eq!(other.label(), "סליחות");
        assert_eq!(PrayerType::parse("").label(), "");
    }

    #[test]
    fn test_relation_anchor_and_sign() {
        assert_eq!(TimeRelation::BeforeSunset.anchor(), Anchor::Sunset);
        assert_eq!(TimeRelation::AfterSunrise.anchor(), Anchor::Sunrise);
        assert_eq!(TimeRelation::BeforeSunrise.sign(), -1);
        assert_eq!(TimeRelation::AfterSunset.sign(), 1);
    }

    #[test]
    fn test_relation_label_round_trips() {
        for relation in [
            TimeRelation::BeforeSunset,
            TimeRelation::AfterSunset,
            TimeRelation::BeforeSunrise,
            TimeRelation::AfterSunrise,
        ] {
            assert_eq!(TimeRelation::parse(relation.label()), Some(relation));
        }
    }

    #[test]
    fn test_display_label_falls_back_to_prayer_type() {
        let entry = PrayerTimeEntry {
            id: "a".into(),
            day_type: DayType::Weekday,
            prayer_type: PrayerType::Shacharit,
            description: "".into(),
            time: TimeSpec::fixed("06:30"),
            order: 0,
        };
        assert_eq!(entry.display_label(), "שחרית");
    }

    #[test]
    fn test_display_label_blank_description_falls_back() {
        let entry = PrayerTimeEntry {
            id: "b".into(),
            day_type: DayType::Sabbath,
            prayer_type: PrayerType::Mincha,
            description: "   ".into(),
            time: TimeSpec::fixed("13:00"),
            order: 0,
        };
        assert_eq!(entry.display_label(), "מנחה");
    }

    #[test]
    fn test_astro_times_deserialize_hebcal_keys() {
        let json = r#"{
            "sunrise": "2026-01-15T06:38:00+02:00",
            "sunset": "2026-01-15T17:03:00+02:00",
            "sofZmanShmaMGA": "2026-01-15T08:31:00+02:00",
            "tzeit7083deg": "2026-01-15T17:38:00+02:00"
        }"#;
        let times: DailyAstronomicalTimes = serde_json::from_str(json).unwrap();
        assert!(times.sunrise.is_some());
        assert!(times.sunset.is_some());
        assert!(times.sof_zman_shma_mga.is_some());
        assert!(times.tzeit_7083deg.is_some());
        assert!(times.chatzot.is_none());
    }

    #[test]
    fn test_astro_times_unreadable_value_is_absent() {
        let json = r#"{ "sunrise": "soon", "sunset": 1700, "chatzot": null }"#;
        let times: DailyAstronomicalTimes = serde_json::from_str(json).unwrap();
        assert_eq!(times, DailyAstronomicalTimes::default());
    }

    #[test]
    fn test_astro_times_carry_civil_date() {
        let times: DailyAstronomicalTimes =
            serde_json::from_str(r#"{ "date": "2026-01-15", "sunset": "2026-01-15T17:03:00+02:00" }"#).unwrap();
        assert_eq!(times.date, NaiveDate::from_ymd_opt(2026, 1, 15));

        let times: DailyAstronomicalTimes = serde_json::from_str(r#"{ "date": "tomorrow" }"#).unwrap();
        assert_eq!(times.date, None);
    }
}
