//! Error type for `caffeine-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The event failed validation before it was written.
  #[error("invalid intake event: {0}")]
  Core(#[from] caffeine_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("column {column} holds a {found} value")]
  ColumnType {
    column: &'static str,
    found:  rusqlite::types::Type,
  },

  #[error("column {column} holds out-of-range value {value}")]
  OutOfRange { column: &'static str, value: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
