//! Sabbath times: candle lighting, Havdalah and the weekly Torah portion.

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::clock::{format_clock_time, local_time};
use crate::error::ZmanimError;
use crate::model::DailyAstronomicalTimes;
use crate::schedule::ResolveOptions;

/// Minutes before sunset at which the Sabbath begins, per community custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct CandleLightingOffset(u32);

impl CandleLightingOffset {
    pub const MIN: u32 = 18;
    pub const MAX: u32 = 40;
    pub const DEFAULT: CandleLightingOffset = CandleLightingOffset(30);

    pub fn new(minutes: i64) -> Result<Self, ZmanimError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&minutes) {
            Ok(CandleLightingOffset(minutes as u32))
        } else {
            Err(ZmanimError::InvalidCandleOffset(minutes))
        }
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl Default for CandleLightingOffset {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<i64> for CandleLightingOffset {
    type Error = ZmanimError;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}

impl From<CandleLightingOffset> for i64 {
    fn from(offset: CandleLightingOffset) -> i64 {
        i64::from(offset.0)
    }
}

/// Sabbath instants for the coming (or current) Sabbath.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SabbathTimes {
    pub candle_lighting: Option<DateTime<FixedOffset>>,
    pub havdalah: Option<DateTime<FixedOffset>>,
    /// Weekly Torah portion name, as supplied by the provider.
    pub parasha: Option<String>,
}

impl SabbathTimes {
    /// Fill gaps from the daily times: candle lighting becomes sunset minus
    /// `offset`, Havdalah becomes the 72-minute nightfall. Values the
    /// provider did supply are kept.
    pub fn with_sunset_fallback(
        mut self,
        astro: Option<&DailyAstronomicalTimes>,
        offset: CandleLightingOffset,
    ) -> Self {
        let Some(astro) = astro else {
            return self;
        };
        if self.candle_lighting.is_none() {
            self.candle_lighting = astro
                .sunset
                .and_then(|sunset| candle_lighting_from_sunset(sunset, offset));
        }
        if self.havdalah.is_none() {
            self.havdalah = astro.tzeit_72min;
        }
        self
    }
}

/// Sunset minus the candle-lighting offset.
pub fn candle_lighting_from_sunset(
    sunset: DateTime<FixedOffset>,
    offset: CandleLightingOffset,
) -> Option<DateTime<FixedOffset>> {
    sunset.checked_sub_signed(TimeDelta::minutes(i64::from(offset.minutes())))
}

/// Sabbath header content ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SabbathPanel {
    pub parasha: String,
    pub candle_lighting: String,
    pub havdalah: String,
}

pub fn sabbath_panel(times: &SabbathTimes, options: &ResolveOptions) -> SabbathPanel {
    let render = |instant: Option<DateTime<FixedOffset>>| match instant {
        Some(dt) => format_clock_time(local_time(&dt, &options.timezone)),
        None => options.placeholder.clone(),
    };
    SabbathPanel {
        parasha: times.parasha.clone().unwrap_or_default(),
        candle_lighting: render(times.candle_lighting),
        havdalah: render(times.havdalah),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::parse_instant;

    fn friday_astro() -> DailyAstronomicalTimes {
        DailyAstronomicalTimes {
            sunset: parse_instant("2026-01-16T17:04:00+02:00"),
            tzeit_72min: parse_instant("2026-01-16T18:16:00+02:00"),
            ..Default::default()
        }
    }

    #[test]
    fn test_offset_range() {
        assert!(CandleLightingOffset::new(18).is_ok());
        assert!(CandleLightingOffset::new(40).is_ok());
        assert_eq!(
            CandleLightingOffset::new(17),
            Err(ZmanimError::InvalidCandleOffset(17))
        );
        assert!(CandleLightingOffset::new(41).is_err());
        assert!(CandleLightingOffset::new(-20).is_err());
    }

    #[test]
    fn test_offset_serde_validates() {
        let ok: CandleLightingOffset = serde_json::from_str("22").unwrap();
        assert_eq!(ok.minutes(), 22);
        assert!(serde_json::from_str::<CandleLightingOffset>("5").is_err());
    }

    #[test]
    fn test_candle_lighting_from_sunset() {
        let sunset = parse_instant("2026-01-16T17:04:00+02:00").unwrap();
        let offset = CandleLightingOffset::new(20).unwrap();
        let candles = candle_lighting_from_sunset(sunset, offset).unwrap();
        assert_eq!(candles, parse_instant("2026-01-16T16:44:00+02:00").unwrap());
    }

    #[test]
    fn test_fallback_fills_only_missing() {
        let provided = parse_instant("2026-01-16T16:40:00+02:00");
        let times = SabbathTimes {
            candle_lighting: provided,
            havdalah: None,
            parasha: Some("בא".into()),
        }
        .with_sunset_fallback(Some(&friday_astro()), CandleLightingOffset::DEFAULT);

        assert_eq!(times.candle_lighting, provided);
        assert_eq!(times.havdalah, parse_instant("2026-01-16T18:16:00+02:00"));
    }

    #[test]
    fn test_fallback_without_astro_is_noop() {
        let times = SabbathTimes::default().with_sunset_fallback(None, CandleLightingOffset::DEFAULT);
        assert_eq!(times, SabbathTimes::default());
    }

    #[test]
    fn test_panel_renders_placeholders() {
        let times = SabbathTimes::default()
            .with_sunset_fallback(Some(&friday_astro()), CandleLightingOffset::new(30).unwrap());
        let panel = sabbath_panel(&times, &ResolveOptions::default());
        assert_eq!(panel.candle_lighting, "16:34");
        assert_eq!(panel.havdalah, "18:16");
        assert_eq!(panel.parasha, "");

        let empty = sabbath_panel(&SabbathTimes::default(), &ResolveOptions::default());
        assert_eq!(empty.candle_lighting, "--:--");
        assert_eq!(empty.havdalah, "--:--");
    }
}
