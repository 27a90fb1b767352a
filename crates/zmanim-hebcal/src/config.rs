//! Network configuration for the Hebcal client.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.hebcal.com";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HebcalConfig {
    /// Scheme and host, without a trailing path (e.g. `https://www.hebcal.com`).
    pub base_url: String,
    /// Upper bound on a single request, connect included.
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HebcalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("zmanim-hebcal/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HebcalConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Base URL with any trailing slash removed.
    pub(crate) fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HebcalConfig::default();
        assert_eq!(config.base_url, "https://www.hebcal.com");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("zmanim-hebcal/"));
    }

    #[test]
    fn test_builder_and_trailing_slash() {
        let config = HebcalConfig::default()
            .with_base_url("http://localhost:8080/")
            .with_timeout_seconds(3);
        assert_eq!(config.base(), "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_secs(3));
    }
}
