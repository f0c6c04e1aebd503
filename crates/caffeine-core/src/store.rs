//! The `IntakeStore` trait — durable storage of intake events keyed by
//! calendar day.
//!
//! The trait is implemented by storage backends (e.g.
//! `caffeine-store-sqlite`). The [`Tracker`](crate::tracker::Tracker) and the
//! CLI depend on this abstraction, not on any concrete backend.

use std::future::Future;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::intake::IntakeEvent;

/// Default length of the "recent drinks" list.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

// ─── Stored row ──────────────────────────────────────────────────────────────

/// An event as read back from the store, with its surrogate key and the day
/// it is filed under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredIntake {
  pub entry_id: Uuid,
  pub day:      NaiveDate,
  pub event:    IntakeEvent,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an intake event store backend.
///
/// Every operation is individually atomic. Implementations may block on disk
/// I/O, so they are async and expected to keep that work off the caller's
/// runtime threads.
pub trait IntakeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Validate and persist `event` under `day`, returning the new entry's id.
  ///
  /// `day` must equal the calendar day of `event.consumed_at`.
  fn insert(
    &self,
    day: NaiveDate,
    event: IntakeEvent,
  ) -> impl Future<Output = Result<Uuid, Self::Error>> + Send + '_;

  /// Every stored event, in no particular order.
  fn read_all(
    &self,
  ) -> impl Future<Output = Result<Vec<StoredIntake>, Self::Error>> + Send + '_;

  /// Events filed under exactly `day`.
  fn read_day(
    &self,
    day: NaiveDate,
  ) -> impl Future<Output = Result<Vec<IntakeEvent>, Self::Error>> + Send + '_;

  /// Remove every row matching `(consumed_at, event.name, event.caffeine_mg)`
  /// and return how many were removed. Removing nothing is not an error.
  ///
  /// Identical drinks logged in the same second are indistinguishable here;
  /// prefer [`IntakeStore::delete_entry`].
  fn delete<'a>(
    &'a self,
    consumed_at: NaiveDateTime,
    event: &'a IntakeEvent,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Remove the single row with `entry_id`. Returns `false` if it did not
  /// exist.
  fn delete_entry(
    &self,
    entry_id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Up to `limit` distinct drink names logged on `today`, most recently
  /// consumed first. Rows without a usable consumption time are skipped.
  fn recent_names(
    &self,
    today: NaiveDate,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
