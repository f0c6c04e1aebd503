//! Error types for `caffeine-core`.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("intake event has no consumption time")]
  MissingConsumedAt,

  #[error("intake consumed at {consumed_at} does not belong to day {day}")]
  DayMismatch {
    day:         NaiveDate,
    consumed_at: NaiveDateTime,
  },

  #[error("intake event has an empty drink name")]
  EmptyName,

  #[error("invalid volume {0:?}: expected a positive decimal in millilitres")]
  InvalidVolume(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
