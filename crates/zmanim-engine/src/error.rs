//! Error types for zmanim-engine operations.
//!
//! Only write-time operations (validation and schedule editing) fail. Schedule
//! resolution never returns an error; it degrades to the placeholder instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZmanimError {
    #[error("Invalid clock time: {0}")]
    InvalidClockTime(String),

    #[error("Negative minutes offset: {0}")]
    NegativeMinutes(i64),

    #[error("Unrecognized time specification: {0}")]
    UnrecognizedTimeSpec(String),

    #[error("Invalid candle-lighting offset: {0} (expected 18-40 minutes)")]
    InvalidCandleOffset(i64),

    #[error("Unknown entry: {0}")]
    UnknownEntry(String),

    #[error("Position out of range: {position} (group has {len} entries)")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

pub type Result<T> = std::result::Result<T, ZmanimError>;
