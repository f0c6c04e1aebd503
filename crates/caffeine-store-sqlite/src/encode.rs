//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Days are stored as `yyyy-MM-dd`, consumption times as
//! `yyyy-MM-dd HH:mm:ss`. Older rows may hold a bare date in `time_consumed`;
//! that is read as midnight. UUIDs are stored as hyphenated lowercase strings.

use caffeine_core::{
  intake::{Category, IntakeEvent},
  store::StoredIntake,
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use tracing::warn;
use uuid::Uuid;

use crate::{Error, Result};

pub const DAY_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const TIME_FORMAT: &str = "%H:%M:%S";

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Day ──────────────────────────────────────────────────────────────────────

pub fn encode_day(day: NaiveDate) -> String { day.format(DAY_FORMAT).to_string() }

pub fn decode_day(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DAY_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Timestamp ────────────────────────────────────────────────────────────────

pub fn encode_timestamp(at: NaiveDateTime) -> String {
  at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn encode_time(at: NaiveDateTime) -> String { at.format(TIME_FORMAT).to_string() }

/// Lenient: anything that is neither a full timestamp nor a bare date decodes
/// to `None`.
pub fn decode_timestamp(s: &str) -> Option<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).ok().or_else(|| {
    NaiveDate::parse_from_str(s, DAY_FORMAT)
      .ok()
      .and_then(|d| d.and_hms_opt(0, 0, 0))
  })
}

// ─── Columns ──────────────────────────────────────────────────────────────────

fn type_mismatch(column: &'static str, value: &Value) -> Error {
  Error::ColumnType { column, found: value.data_type() }
}

fn decode_text(column: &'static str, value: Value) -> Result<String> {
  match value {
    Value::Text(s) => Ok(s),
    other => Err(type_mismatch(column, &other)),
  }
}

fn decode_u32(column: &'static str, value: Value) -> Result<u32> {
  match value {
    Value::Integer(i) => u32::try_from(i).map_err(|_| Error::OutOfRange { column, value: i }),
    other => Err(type_mismatch(column, &other)),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `history` row.
///
/// Columns are held untyped so a row with the wrong storage class is rejected
/// by [`RawIntake::into_stored`] rather than failing the whole query.
pub struct RawIntake {
  pub entry_id:      Value,
  pub date:          Value,
  pub entry:         Value,
  pub calories:      Value,
  pub volume:        Value,
  pub name:          Value,
  pub kind:          Value,
  pub time_consumed: Value,
}

impl RawIntake {
  pub const COLUMNS: &'static str =
    "entry_id, date, entry, calories, volume, name, type, time_consumed";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      entry_id:      row.get(0)?,
      date:          row.get(1)?,
      entry:         row.get(2)?,
      calories:      row.get(3)?,
      volume:        row.get(4)?,
      name:          row.get(5)?,
      kind:          row.get(6)?,
      time_consumed: row.get(7)?,
    })
  }

  pub fn into_stored(self) -> Result<StoredIntake> {
    let entry_id = decode_uuid(&decode_text("entry_id", self.entry_id)?)?;
    let day = decode_day(&decode_text("date", self.date)?)?;

    let consumed_at = match self.time_consumed {
      Value::Null => None,
      Value::Text(raw) => {
        let parsed = decode_timestamp(&raw);
        if parsed.is_none() {
          warn!(%entry_id, time_consumed = raw, "unparsable consumption time");
        }
        parsed
      }
      other => {
        warn!(%entry_id, found = %other.data_type(), "consumption time is not text");
        None
      }
    };

    let event = IntakeEvent {
      caffeine_mg: decode_u32("entry", self.entry)?,
      calories: decode_u32("calories", self.calories)?,
      volume_ml: decode_text("volume", self.volume)?,
      name: decode_text("name", self.name)?,
      category: Category::parse(&decode_text("type", self.kind)?),
      consumed_at,
    };

    Ok(StoredIntake { entry_id, day, event })
  }
}

/// Decode every row, skipping (and logging) any that cannot be decoded so one
/// bad row never hides the rest.
pub fn decode_rows(raws: Vec<RawIntake>) -> Vec<StoredIntake> {
  raws
    .into_iter()
    .filter_map(|raw| {
      let entry_id = raw.entry_id.clone();
      raw
        .into_stored()
        .inspect_err(|e| warn!(entry_id = ?entry_id, error = %e, "skipping malformed history row"))
        .ok()
    })
    .collect()
}
