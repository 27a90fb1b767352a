//! The astronomical-times provider seam.
//!
//! Implementors fetch from anywhere: the Hebcal HTTP API, a fixture file, or
//! a test double. Callers that must never block indefinitely go through
//! [`crate::cache::AstroCache`], which bounds every call with a timeout.

use chrono::NaiveDate;

use zmanim_engine::{CandleLightingOffset, DailyAstronomicalTimes, SabbathTimes};

use crate::error::Result;
use crate::location::Location;
use crate::wire::HebrewDate;

#[async_trait::async_trait]
pub trait AstroProvider: Send + Sync {
    /// Daily times for `location` on the civil `date`.
    async fn daily_times(&self, location: &Location, date: NaiveDate) -> Result<DailyAstronomicalTimes>;

    /// Times for the Sabbath on or after `date`.
    async fn sabbath_times(
        &self,
        location: &Location,
        date: NaiveDate,
        offset: CandleLightingOffset,
    ) -> Result<SabbathTimes>;

    async fn hebrew_date(&self, date: NaiveDate) -> Result<HebrewDate>;

    /// Returns a name for this provider (used in logging).
    fn name(&self) -> &str {
        "AstroProvider"
    }
}

#[async_trait::async_trait]
impl<P: AstroProvider + ?Sized> AstroProvider for std::sync::Arc<P> {
    async fn daily_times(&self, location: &Location, date: NaiveDate) -> Result<DailyAstronomicalTimes> {
        (**self).daily_times(location, date).await
    }

    async fn sabbath_times(
        &self,
        location: &Location,
        date: NaiveDate,
        offset: CandleLightingOffset,
    ) -> Result<SabbathTimes> {
        (**self).sabbath_times(location, date, offset).await
    }

    async fn hebrew_date(&self, date: NaiveDate) -> Result<HebrewDate> {
        (**self).hebrew_date(date).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
