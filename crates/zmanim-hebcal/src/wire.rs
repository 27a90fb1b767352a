//! Hebcal JSON response shapes.
//!
//! Each parser checks the one structural element the response cannot do
//! without (`times`, `items`, `heDateParts`) and is lenient about everything
//! inside it.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use zmanim_engine::clock::parse_instant;
use zmanim_engine::{DailyAstronomicalTimes, SabbathTimes};

use crate::error::{ProviderError, Result};

/// A Hebrew calendar date as display strings (Hebrew numerals and month name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HebrewDate {
    pub day: String,
    pub month: String,
    pub year: String,
}

impl fmt::Display for HebrewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ב{} {}", self.day, self.month, self.year)
    }
}

/// `/zmanim` response → daily times.
pub fn parse_zmanim(body: &Value) -> Result<DailyAstronomicalTimes> {
    let times = body
        .get("times")
        .filter(|t| t.is_object())
        .ok_or_else(|| ProviderError::MalformedResponse("zmanim response has no 'times' object".into()))?;
    let mut parsed: DailyAstronomicalTimes = serde_json::from_value(times.clone())
        .map_err(|e| ProviderError::MalformedResponse(format!("zmanim times: {e}")))?;
    if parsed.date.is_none() {
        parsed.date = body
            .get("date")
            .and_then(Value::as_str)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());
    }
    Ok(parsed)
}

/// `/shabbat` response → candle lighting, Havdalah and portion.
///
/// The first item of each category wins.
pub fn parse_shabbat(body: &Value) -> Result<SabbathTimes> {
    let items = body
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::MalformedResponse("shabbat response has no 'items' array".into()))?;

    let find = |category: &str| items.iter().find(|item| item_str(item, "category") == Some(category));
    let instant = |category: &str| {
        find(category)
            .and_then(|item| item_str(item, "date"))
            .and_then(parse_instant)
    };

    let parasha = find("parashat")
        .and_then(|item| item_str(item, "hebrew").or_else(|| item_str(item, "title")))
        .map(str::to_string);

    Ok(SabbathTimes {
        candle_lighting: instant("candles"),
        havdalah: instant("havdalah"),
        parasha,
    })
}

/// `/converter` response → Hebrew date.
pub fn parse_hebrew_date(body: &Value) -> Result<HebrewDate> {
    let parts = body
        .get("heDateParts")
        .ok_or_else(|| ProviderError::MalformedResponse("converter response has no 'heDateParts'".into()))?;

    let part = |key: &str| {
        scalar_text(parts.get(key)).ok_or_else(|| {
            ProviderError::MalformedResponse(format!("converter response missing heDateParts.{key}"))
        })
    };

    Ok(HebrewDate {
        day: part("d")?,
        month: part("m")?,
        year: part("y")?,
    })
}

fn item_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key).and_then(Value::as_str)
}

/// Non-empty string or number rendered as text.
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
