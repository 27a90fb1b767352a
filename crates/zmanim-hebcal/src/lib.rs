//! # zmanim-hebcal
//!
//! Fetches daily astronomical times, Sabbath times and the Hebrew date from
//! the Hebcal API, and caches them per civil day.
//!
//! ## Modules
//!
//! - [`provider`] — the async `AstroProvider` trait
//! - [`client`] — the Hebcal HTTP implementation
//! - [`cache`] — day-keyed cache with bounded fetches
//! - [`location`] — supported locations
//! - [`wire`] — response parsing
//! - [`clock`] — injectable time source
//! - [`config`] — client configuration
//! - [`error`] — Error types

pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod location;
pub mod provider;
pub mod wire;

pub use cache::{AstroCache, DEFAULT_FETCH_TIMEOUT};
pub use client::HebcalClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::HebcalConfig;
pub use error::ProviderError;
pub use location::Location;
pub use provider::AstroProvider;
pub use wire::HebrewDate;
