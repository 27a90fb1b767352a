//! Stored document shapes for synagogue records.
//!
//! These mirror what the record store holds: string-typed enums with Hebrew
//! labels and a `timeType` discriminator next to two optional time fields.
//! [`PrayerTimeRecord`] converts into the typed [`PrayerTimeEntry`] and back.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ZmanimError;
use crate::model::{DayType, PrayerTimeEntry, PrayerType, TimeRelation, TimeSpec};
use crate::sabbath::CandleLightingOffset;

const TIME_TYPE_FIXED: &str = "fixed";
const TIME_TYPE_RELATIVE: &str = "relative";

/// The `relativeTime` block as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeTimeRecord {
    #[serde(default)]
    pub relation: String,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub minutes: i64,
}

/// One element of a synagogue's `prayerTimes` array as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerTimeRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub day_type: String,
    #[serde(default)]
    pub prayer_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_time: Option<RelativeTimeRecord>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub order: i64,
}

impl TryFrom<PrayerTimeRecord> for PrayerTimeEntry {
    type Error = ZmanimError;

    /// Fails only when the day type is unknown: such an entry belongs to
    /// neither schedule. Every other defect is carried in [`TimeSpec`].
    fn try_from(record: PrayerTimeRecord) -> Result<Self, Self::Error> {
        let day_type = DayType::parse(&record.day_type).ok_or_else(|| {
            ZmanimError::UnrecognizedTimeSpec(format!(
                "entry '{}' has unknown day type '{}'",
                record.id, record.day_type
            ))
        })?;

        let time = match record.time_type.trim() {
            TIME_TYPE_FIXED => TimeSpec::Fixed {
                time: record.fixed_time.unwrap_or_default(),
            },
            TIME_TYPE_RELATIVE => match record
                .relative_time
                .as_ref()
                .and_then(|r| TimeRelation::parse(&r.relation).map(|rel| (rel, r.minutes)))
            {
                Some((relation, minutes)) => TimeSpec::relative(relation, minutes),
                None => TimeSpec::Unrecognized {
                    time_type: record.time_type,
                    fixed_time: record.fixed_time,
                    relative_time: record.relative_time,
                },
            },
            _ => TimeSpec::Unrecognized {
                time_type: record.time_type,
                fixed_time: record.fixed_time,
                relative_time: record.relative_time,
            },
        };

        Ok(PrayerTimeEntry {
            id: record.id,
            day_type,
            prayer_type: PrayerType::parse(&record.prayer_type),
            description: record.description,
            time,
            order: record.order,
        })
    }
}

impl From<PrayerTimeEntry> for PrayerTimeRecord {
    fn from(entry: PrayerTimeEntry) -> Self {
        let (time_type, fixed_time, relative_time) = match entry.time {
            TimeSpec::Fixed { time } => (TIME_TYPE_FIXED.to_string(), Some(time), None),
            TimeSpec::Relative(rel) => (
                TIME_TYPE_RELATIVE.to_string(),
                None,
                Some(RelativeTimeRecord {
                    relation: rel.relation.label().to_string(),
                    minutes: rel.minutes,
                }),
            ),
            TimeSpec::Unrecognized {
                time_type,
                fixed_time,
                relative_time,
            } => (time_type, fixed_time, relative_time),
        };

        PrayerTimeRecord {
            id: entry.id,
            day_type: entry.day_type.label().to_string(),
            prayer_type: entry.prayer_type.label().to_string(),
            description: entry.description,
            time_type,
            fixed_time,
            relative_time,
            order: entry.order,
        }
    }
}

/// Snapshot of one synagogue document. Fields the schedule does not use
/// (titles, footer content, connection timestamps) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynagogueRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default = "default_candle_offset", deserialize_with = "lenient_minutes")]
    pub candle_lighting_offset: i64,
    #[serde(default)]
    pub prayer_times: Vec<PrayerTimeRecord>,
}

fn default_candle_offset() -> i64 {
    i64::from(CandleLightingOffset::DEFAULT.minutes())
}

impl SynagogueRecord {
    /// Typed entries, in stored order. Records with an unknown day type are
    /// skipped with a warning; they could not be shown in either schedule.
    pub fn entries(&self) -> Vec<PrayerTimeEntry> {
        self.prayer_times
            .iter()
            .cloned()
            .filter_map(|record| match PrayerTimeEntry::try_from(record) {
                Ok(entry) => Some(entry),
                Err(err) => {
                    tracing::warn!(synagogue = %self.id, error = %err, "skipping prayer time");
                    None
                }
            })
            .collect()
    }

    /// Stored offset if it lies in the allowed range, otherwise the default.
    pub fn candle_offset(&self) -> CandleLightingOffset {
        CandleLightingOffset::new(self.candle_lighting_offset).unwrap_or_else(|err| {
            tracing::warn!(synagogue = %self.id, error = %err, "using default candle-lighting offset");
            CandleLightingOffset::DEFAULT
        })
    }

    /// Stored records that cannot be placed in either schedule, with the reason.
    pub fn unplaced(&self) -> Vec<(&PrayerTimeRecord, ZmanimError)> {
        self.prayer_times
            .iter()
            .filter_map(|record| {
                PrayerTimeEntry::try_from(record.clone())
                    .err()
                    .map(|err| (record, err))
            })
            .collect()
    }

    /// Replace the placed prayer times with `entries`.
    ///
    /// Records [`entries`](Self::entries) skipped are kept unchanged after
    /// them. The inactive fixed or relative block of a stored record is
    /// carried over to the entry with the same id.
    pub fn set_entries(&mut self, entries: Vec<PrayerTimeEntry>) {
        let (placed, unplaced): (Vec<_>, Vec<_>) = std::mem::take(&mut self.prayer_times)
            .into_iter()
            .partition(|record| DayType::parse(&record.day_type).is_some());

        self.prayer_times = entries
            .into_iter()
            .map(|entry| {
                let mut record = PrayerTimeRecord::from(entry);
                if let Some(stored) = placed.iter().find(|stored| stored.id == record.id) {
                    if record.fixed_time.is_none() {
                        record.fixed_time = stored.fixed_time.clone();
                    }
                    if record.relative_time.is_none() {
                        record.relative_time = stored.relative_time.clone();
                    }
                }
                record
            })
            .chain(unplaced)
            .collect();
    }
}

/// Number inputs arrive as integers, floats or numeric strings. Fractions are
/// truncated; anything unreadable becomes `0`.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    })
}
