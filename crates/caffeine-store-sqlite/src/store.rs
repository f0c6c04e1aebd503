//! [`SqliteStore`] — the SQLite implementation of [`IntakeStore`].

use std::path::Path;

use caffeine_core::{
  intake::IntakeEvent,
  store::{IntakeStore, StoredIntake},
};
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::{
  encode::{
    RawIntake, decode_rows, encode_day, encode_time, encode_timestamp,
    encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An intake store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Each call
/// runs as one statement on the connection thread, so readers see either the
/// state before or after a concurrent insert or delete.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT` of [`RawIntake::COLUMNS`] with an optional day filter.
  async fn select_rows(&self, day: Option<NaiveDate>) -> Result<Vec<StoredIntake>> {
    let day_str = day.map(encode_day);

    let raws: Vec<RawIntake> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(d) = day_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM history WHERE date = ?1",
            RawIntake::COLUMNS
          ))?;
          stmt
            .query_map(rusqlite::params![d], RawIntake::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt =
            conn.prepare(&format!("SELECT {} FROM history", RawIntake::COLUMNS))?;
          stmt
            .query_map([], RawIntake::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    Ok(decode_rows(raws))
  }
}

// ─── IntakeStore impl ────────────────────────────────────────────────────────

impl IntakeStore for SqliteStore {
  type Error = Error;

  async fn insert(&self, day: NaiveDate, event: IntakeEvent) -> Result<Uuid> {
    let consumed_at = event.validate_for(day)?;

    let entry_id          = Uuid::new_v4();
    let entry_id_str      = encode_uuid(entry_id);
    let day_str           = encode_day(day);
    let time_str          = encode_time(consumed_at);
    let time_consumed_str = encode_timestamp(consumed_at);
    let caffeine_mg       = i64::from(event.caffeine_mg);
    let calories          = i64::from(event.calories);
    let category          = event.category.as_str().to_owned();
    let IntakeEvent { volume_ml, name, .. } = event;

    debug!(%entry_id, %day, drink = %name, caffeine_mg, "inserting intake");

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO history (
             entry_id, date, time, entry, calories, volume, name, type,
             time_consumed
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            entry_id_str,
            day_str,
            time_str,
            caffeine_mg,
            calories,
            volume_ml,
            name,
            category,
            time_consumed_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(entry_id)
  }

  async fn read_all(&self) -> Result<Vec<StoredIntake>> {
    self.select_rows(None).await
  }

  async fn read_day(&self, day: NaiveDate) -> Result<Vec<IntakeEvent>> {
    let rows = self.select_rows(Some(day)).await?;
    Ok(rows.into_iter().map(|r| r.event).collect())
  }

  async fn delete(
    &self,
    consumed_at: NaiveDateTime,
    event:       &IntakeEvent,
  ) -> Result<usize> {
    let time_consumed_str = encode_timestamp(consumed_at);
    let name              = event.name.clone();
    let caffeine_mg       = i64::from(event.caffeine_mg);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM history
           WHERE time_consumed = ?1 AND name = ?2 AND entry = ?3",
          rusqlite::params![time_consumed_str, name, caffeine_mg],
        )?)
      })
      .await?;

    debug!(%consumed_at, drink = %event.name, removed, "deleted matching intake");
    Ok(removed)
  }

  async fn delete_entry(&self, entry_id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(entry_id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM history WHERE entry_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    debug!(%entry_id, removed, "deleted intake entry");
    Ok(removed > 0)
  }

  async fn recent_names(&self, today: NaiveDate, limit: usize) -> Result<Vec<String>> {
    let mut timed: Vec<(NaiveDateTime, String)> = self
      .select_rows(Some(today))
      .await?
      .into_iter()
      .filter_map(|r| Some((r.event.consumed_at?, r.event.name)))
      .collect();
    timed.sort_by(|a, b| b.0.cmp(&a.0));

    let mut names: Vec<String> = Vec::with_capacity(limit);
    for (_, name) in timed {
      if names.len() == limit {
        break;
      }
      if !names.contains(&name) {
        names.push(name);
      }
    }
    Ok(names)
  }
}
