//! Day-keyed cache in front of an [`AstroProvider`].
//!
//! Each kind of data has a single slot keyed by the civil date in the
//! location's timezone (plus whatever else changes the answer). A lookup hits
//! only on an exact key match; there is no other expiry. Failed or timed-out
//! fetches return `None` and leave the slot as it was, so the next call
//! retries.

use std::future::Future;
use std::sync::RwLock;
use std::time::Duration;

use chrono::NaiveDate;

use zmanim_engine::clock::local_date;
use zmanim_engine::{CandleLightingOffset, DailyAstronomicalTimes, SabbathTimes};

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::location::Location;
use crate::provider::AstroProvider;
use crate::wire::HebrewDate;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DailyKey {
    date: NaiveDate,
    location: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SabbathKey {
    date: NaiveDate,
    location: u32,
    offset: CandleLightingOffset,
}

/// One keyed value. Guards are released before any `.await`.
#[derive(Debug)]
struct Slot<K, V> {
    entry: RwLock<Option<(K, V)>>,
}

impl<K: PartialEq, V: Clone> Slot<K, V> {
    fn new() -> Self {
        Self {
            entry: RwLock::new(None),
        }
    }

    fn lookup(&self, key: &K) -> Option<V> {
        let guard = self.entry.read().ok()?;
        match &*guard {
            Some((k, v)) if k == key => Some(v.clone()),
            _ => None,
        }
    }

    fn store(&self, key: K, value: V) {
        if let Ok(mut guard) = self.entry.write() {
            *guard = Some((key, value));
        }
    }
}

pub struct AstroCache<P, C = SystemClock> {
    provider: P,
    clock: C,
    fetch_timeout: Duration,
    daily: Slot<DailyKey, DailyAstronomicalTimes>,
    sabbath: Slot<SabbathKey, SabbathTimes>,
    hebrew: Slot<NaiveDate, HebrewDate>,
}

impl<P: AstroProvider> AstroCache<P, SystemClock> {
    pub fn new(provider: P) -> Self {
        Self::with_clock(provider, SystemClock)
    }
}

impl<P: AstroProvider, C: Clock> AstroCache<P, C> {
    pub fn with_clock(provider: P, clock: C) -> Self {
        Self {
            provider,
            clock,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            daily: Slot::new(),
            sabbath: Slot::new(),
            hebrew: Slot::new(),
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Today's civil date at `location`, from the injected clock.
    pub fn today(&self, location: &Location) -> NaiveDate {
        local_date(self.clock.now(), &location.timezone)
    }

    /// Daily times for today at `location`.
    pub async fn get_times(&self, location: &Location) -> Option<DailyAstronomicalTimes> {
        let date = self.today(location);
        self.get_times_on(location, date).await
    }

    pub async fn get_times_on(&self, location: &Location, date: NaiveDate) -> Option<DailyAstronomicalTimes> {
        let key = DailyKey {
            date,
            location: location.code,
        };
        if let Some(hit) = self.daily.lookup(&key) {
            return Some(hit);
        }

        let fetched = self
            .bounded("daily times", self.provider.daily_times(location, date))
            .await?;
        tracing::debug!(%date, location = location.code, "cached daily times");
        self.daily.store(key, fetched.clone());
        Some(fetched)
    }

    /// Sabbath times for the week containing today at `location`.
    pub async fn get_sabbath_times(
        &self,
        location: &Location,
        offset: CandleLightingOffset,
    ) -> Option<SabbathTimes> {
        let date = self.today(location);
        self.get_sabbath_times_on(location, date, offset).await
    }

    pub async fn get_sabbath_times_on(
        &self,
        location: &Location,
        date: NaiveDate,
        offset: CandleLightingOffset,
    ) -> Option<SabbathTimes> {
        let key = SabbathKey {
            date,
            location: location.code,
            offset,
        };
        if let Some(hit) = self.sabbath.lookup(&key) {
            return Some(hit);
        }

        let fetched = self
            .bounded("sabbath times", self.provider.sabbath_times(location, date, offset))
            .await?;
        self.sabbath.store(key, fetched.clone());
        Some(fetched)
    }

    /// Hebrew date for today at `location`.
    pub async fn get_hebrew_date(&self, location: &Location) -> Option<HebrewDate> {
        let date = self.today(location);
        self.get_hebrew_date_on(date).await
    }

    pub async fn get_hebrew_date_on(&self, date: NaiveDate) -> Option<HebrewDate> {
        if let Some(hit) = self.hebrew.lookup(&date) {
            return Some(hit);
        }

        let fetched = self
            .bounded("hebrew date", self.provider.hebrew_date(date))
            .await?;
        self.hebrew.store(date, fetched.clone());
        Some(fetched)
    }

    async fn bounded<T>(&self, what: &'static str, fetch: impl Future<Output = Result<T>>) -> Option<T> {
        match tokio::time::timeout(self.fetch_timeout, fetch).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::warn!(provider = self.provider.name(), what, error = %e, "fetch failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    what,
                    timeout_ms = self.fetch_timeout.as_millis() as u64,
                    "fetch timed out"
                );
                None
            }
        }
    }
}
