//! The "times of day" panel: named daily instants rendered as clock times.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::clock::{format_clock_time, local_time};
use crate::model::DailyAstronomicalTimes;
use crate::schedule::{ResolveOptions, ResolvedScheduleLine};

/// A named daily instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Zman {
    Dawn,
    Misheyakir,
    Sunrise,
    SofZmanShmaMga,
    SofZmanShmaGra,
    SofZmanTfillaMga,
    SofZmanTfillaGra,
    Chatzot,
    MinchaGedola,
    MinchaKetana,
    PlagHaMincha,
    Sunset,
    Tzeit,
    Tzeit72,
    ChatzotNight,
}

impl Zman {
    /// Full panel, in display order.
    pub const ALL: [Zman; 15] = [
        Zman::Dawn,
        Zman::Misheyakir,
        Zman::Sunrise,
        Zman::SofZmanShmaMga,
        Zman::SofZmanShmaGra,
        Zman::SofZmanTfillaMga,
        Zman::SofZmanTfillaGra,
        Zman::Chatzot,
        Zman::MinchaGedola,
        Zman::MinchaKetana,
        Zman::PlagHaMincha,
        Zman::Sunset,
        Zman::Tzeit,
        Zman::Tzeit72,
        Zman::ChatzotNight,
    ];

    /// Shorter weekday list.
    pub const WEEKDAY_SUMMARY: [Zman; 10] = [
        Zman::Dawn,
        Zman::Sunrise,
        Zman::SofZmanShmaGra,
        Zman::SofZmanTfillaGra,
        Zman::Chatzot,
        Zman::MinchaGedola,
        Zman::MinchaKetana,
        Zman::PlagHaMincha,
        Zman::Sunset,
        Zman::Tzeit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Zman::Dawn => "עלות השחר",
            Zman::Misheyakir => "זמן טו״ת",
            Zman::Sunrise => "הנץ החמה",
            Zman::SofZmanShmaMga => "סו״ז ק\"ש מג\"א",
            Zman::SofZmanShmaGra => "סו״ז ק\"ש גר\"א",
            Zman::SofZmanTfillaMga => "סו״ז תפילה מג\"א",
            Zman::SofZmanTfillaGra => "סו״ז תפילה גר\"א",
            Zman::Chatzot => "חצות היום",
            Zman::MinchaGedola => "מנחה גדולה",
            Zman::MinchaKetana => "מנחה קטנה",
            Zman::PlagHaMincha => "פלג המנחה",
            Zman::Sunset => "שקיעה",
            Zman::Tzeit => "צאת הכוכבים",
            Zman::Tzeit72 => "ר\"ת",
            Zman::ChatzotNight => "חצות הלילה",
        }
    }

    pub fn instant(self, times: &DailyAstronomicalTimes) -> Option<DateTime<FixedOffset>> {
        match self {
            Zman::Dawn => times.alot_ha_shachar,
            Zman::Misheyakir => times.misheyakir,
            Zman::Sunrise => times.sunrise,
            Zman::SofZmanShmaMga => times.sof_zman_shma_mga,
            Zman::SofZmanShmaGra => times.sof_zman_shma,
            Zman::SofZmanTfillaMga => times.sof_zman_tfilla_mga,
            Zman::SofZmanTfillaGra => times.sof_zman_tfilla,
            Zman::Chatzot => times.chatzot,
            Zman::MinchaGedola => times.mincha_gedola,
            Zman::MinchaKetana => times.mincha_ketana,
            Zman::PlagHaMincha => times.plag_ha_mincha,
            Zman::Sunset => times.sunset,
            Zman::Tzeit => times.tzeit_7083deg,
            Zman::Tzeit72 => times.tzeit_72min,
            Zman::ChatzotNight => times.chatzot_night,
        }
    }
}

/// All fifteen daily times. Missing values, or a missing `astro`, show the
/// placeholder; the panel always has the same shape.
pub fn daily_times_panel(
    astro: Option<&DailyAstronomicalTimes>,
    options: &ResolveOptions,
) -> Vec<ResolvedScheduleLine> {
    panel(&Zman::ALL, astro, options)
}

pub fn weekday_summary(
    astro: Option<&DailyAstronomicalTimes>,
    options: &ResolveOptions,
) -> Vec<ResolvedScheduleLine> {
    panel(&Zman::WEEKDAY_SUMMARY, astro, options)
}

fn panel(
    zmanim: &[Zman],
    astro: Option<&DailyAstronomicalTimes>,
    options: &ResolveOptions,
) -> Vec<ResolvedScheduleLine> {
    zmanim
        .iter()
        .map(|&zman| ResolvedScheduleLine {
            description: zman.label().to_string(),
            clock_time: astro
                .and_then(|t| zman.instant(t))
                .map(|dt| format_clock_time(local_time(&dt, &options.timezone)))
                .unwrap_or_else(|| options.placeholder.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::parse_instant;

    #[test]
    fn test_panel_shape_without_astro() {
        let lines = daily_times_panel(None, &ResolveOptions::default());
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.clock_time == "--:--"));
        assert_eq!(lines[0].description, "עלות השחר");
        assert_eq!(lines[14].description, "חצות הלילה");
    }

    #[test]
    fn test_panel_formats_in_reference_zone() {
        let astro = DailyAstronomicalTimes {
            sunrise: parse_instant("2026-01-15T04:38:30Z"),
            sunset: parse_instant("2026-01-15T17:03:00+02:00"),
            ..Default::default()
        };
        let lines = daily_times_panel(Some(&astro), &ResolveOptions::default());
        let sunrise = lines.iter().find(|l| l.description == "הנץ החמה").unwrap();
        let sunset = lines.iter().find(|l| l.description == "שקיעה").unwrap();
        let dawn = lines.iter().find(|l| l.description == "עלות השחר").unwrap();
        assert_eq!(sunrise.clock_time, "06:38");
        assert_eq!(sunset.clock_time, "17:03");
        assert_eq!(dawn.clock_time, "--:--");
    }

    #[test]
    fn test_weekday_summary_subset() {
        let lines = weekday_summary(None, &ResolveOptions::default());
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[8].description, Zman::Sunset.label());
    }

    #[test]
    fn test_every_zman_reads_its_own_field() {
        let t = parse_instant("2026-01-15T10:00:00+02:00");
        let astro = DailyAstronomicalTimes {
            date: None,
            alot_ha_shachar: t,
            misheyakir: t,
            sunrise: t,
            sof_zman_shma_mga: t,
            sof_zman_shma: t,
            sof_zman_tfilla_mga: t,
            sof_zman_tfilla: t,
            chatzot: t,
            mincha_gedola: t,
            mincha_ketana: t,
            plag_ha_mincha: t,
            sunset: t,
            tzeit_7083deg: t,
            tzeit_72min: t,
            chatzot_night: t,
        };
        for zman in Zman::ALL {
            assert_eq!(zman.instant(&astro), t, "{zman:?}");
        }
    }
}
