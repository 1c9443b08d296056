//! Error types for boundary computation.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{IntervalUnit, ProductCategory, SessionShape};

/// Errors that abort a boundary computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    #[error("{unit} interval length {length} is not supported (daily/weekly require 1, others > 0)")]
    InvalidIntervalLength { unit: IntervalUnit, length: u32 },

    #[error("open offset of {seconds}s is outside one day")]
    InvalidOpenOffset { seconds: i64 },

    #[error("no hour table for {category} products with {length}H bars and session shape {shape:?}")]
    UnmappedSessionShape {
        category: ProductCategory,
        length: u32,
        shape: Option<SessionShape>,
    },

    #[error("trading-day calendar was not provided before building the engine")]
    CalendarUnavailable,

    #[error("{0} bars are not supported by this engine")]
    UnsupportedInterval(IntervalUnit),
}

/// Trading-day roll-forward gave up: no trading day within the safety window.
///
/// Recoverable. `fallback` is the best-effort date the engines continue with;
/// the calendar almost certainly needs updating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no trading day within {max_days} days after {start}; calendar is stale (falling back to {fallback})")]
pub struct CalendarStale {
    pub start: NaiveDate,
    pub fallback: NaiveDate,
    pub max_days: u32,
}
