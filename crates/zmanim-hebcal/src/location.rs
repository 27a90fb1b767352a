//! Locations served by the display, keyed by a small numeric code.

use chrono_tz::Tz;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub code: u32,
    /// GeoNames identifier passed to the provider.
    pub geonameid: u32,
    pub name: &'static str,
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
}

pub const DEFAULT_CODE: u32 = 1;

pub static LOCATIONS: [Location; 3] = [
    Location {
        code: 1,
        geonameid: 294068,
        name: "נתיבות",
        timezone: chrono_tz::Asia::Jerusalem,
    },
    Location {
        code: 2,
        geonameid: 294421,
        name: "גדרה",
        timezone: chrono_tz::Asia::Jerusalem,
    },
    Location {
        code: 3,
        geonameid: 294751,
        name: "קרית עקרון",
        timezone: chrono_tz::Asia::Jerusalem,
    },
];

impl Location {
    /// Location for `code`, or the default location for an unknown code.
    pub fn by_code(code: u32) -> &'static Location {
        LOCATIONS
            .iter()
            .find(|l| l.code == code)
            .unwrap_or_else(|| {
                tracing::debug!(code, "unknown location code, using default");
                Location::default_location()
            })
    }

    /// Exact match on the city name as stored on synagogue records.
    pub fn by_name(name: &str) -> Option<&'static Location> {
        let name = name.trim();
        LOCATIONS.iter().find(|l| l.name == name)
    }

    pub fn default_location() -> &'static Location {
        &LOCATIONS[0]
    }
}

fn serialize_tz<S: serde::Serializer>(tz: &Tz, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(tz.name())
}
