//! Hebcal HTTP client.

use chrono::{Datelike, NaiveDate};
use serde_json::Value;

use zmanim_engine::{CandleLightingOffset, DailyAstronomicalTimes, SabbathTimes};

use crate::config::HebcalConfig;
use crate::error::{ProviderError, Result};
use crate::location::Location;
use crate::provider::AstroProvider;
use crate::wire::{parse_hebrew_date, parse_shabbat, parse_zmanim, HebrewDate};

pub struct HebcalClient {
    client: reqwest::Client,
    config: HebcalConfig,
}

impl HebcalClient {
    pub fn new(config: HebcalConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HebcalConfig {
        &self.config
    }

    fn zmanim_url(&self, location: &Location, date: NaiveDate) -> String {
        format!(
            "{}/zmanim?cfg=json&geonameid={}&date={}",
            self.config.base(),
            location.geonameid,
            date.format("%Y-%m-%d")
        )
    }

    fn shabbat_url(&self, location: &Location, date: NaiveDate, offset: CandleLightingOffset) -> String {
        format!(
            "{}/shabbat?cfg=json&geonameid={}&M=on&lg=he&b={}&gy={}&gm={}&gd={}",
            self.config.base(),
            location.geonameid,
            offset.minutes(),
            date.year(),
            date.month(),
            date.day()
        )
    }

    fn converter_url(&self, date: NaiveDate) -> String {
        format!(
            "{}/converter?cfg=json&date={}&g2h=1&strict=1",
            self.config.base(),
            date.format("%Y-%m-%d")
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!(url, "hebcal request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }
        Ok(response.json::<Value>().await?)
    }
}

#[async_trait::async_trait]
impl AstroProvider for HebcalClient {
    async fn daily_times(&self, location: &Location, date: NaiveDate) -> Result<DailyAstronomicalTimes> {
        let body = self.get_json(&self.zmanim_url(location, date)).await?;
        parse_zmanim(&body)
    }

    async fn sabbath_times(
        &self,
        location: &Location,
        date: NaiveDate,
        offset: CandleLightingOffset,
    ) -> Result<SabbathTimes> {
        let body = self.get_json(&self.shabbat_url(location, date, offset)).await?;
        parse_shabbat(&body)
    }

    async fn hebrew_date(&self, date: NaiveDate) -> Result<HebrewDate> {
        let body = self.get_json(&self.converter_url(date)).await?;
        parse_hebrew_date(&body)
    }

    fn name(&self) -> &str {
        "hebcal"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HebcalClient {
        HebcalClient::new(HebcalConfig::default().with_base_url("http://hebcal.test/")).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn test_zmanim_url() {
        let url = client().zmanim_url(Location::by_code(1), date());
        assert_eq!(url, "http://hebcal.test/zmanim?cfg=json&geonameid=294068&date=2026-01-05");
    }

    #[test]
    fn test_shabbat_url_carries_offset_and_date() {
        let offset = CandleLightingOffset::new(22).unwrap();
        let url = client().shabbat_url(Location::by_code(2), date(), offset);
        assert_eq!(
            url,
            "http://hebcal.test/shabbat?cfg=json&geonameid=294421&M=on&lg=he&b=22&gy=2026&gm=1&gd=5"
        );
    }

    #[test]
    fn test_converter_url() {
        let url = client().converter_url(date());
        assert_eq!(url, "http://hebcal.test/converter?cfg=json&date=2026-01-05&g2h=1&strict=1");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_error_not_panic() {
        // Port 9 on loopback is the discard port and is not listening in test environments.
        let client = HebcalClient::new(
            HebcalConfig::default()
                .with_base_url("http://127.0.0.1:9")
                .with_timeout_seconds(2),
        )
        .unwrap();
        let result = client.daily_times(Location::default_location(), date()).await;
        assert!(result.is_err());
    }
}
