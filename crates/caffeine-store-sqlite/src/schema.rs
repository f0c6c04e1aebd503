//! SQL schema for the Caffeinated SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per logged drink. Rows are never updated, only deleted.
CREATE TABLE IF NOT EXISTS history (
    entry_id      TEXT PRIMARY KEY,  -- UUID assigned at insert
    date          TEXT NOT NULL,     -- calendar-day key, yyyy-MM-dd
    time          TEXT,              -- wall-clock logging time, free-form
    entry         INTEGER NOT NULL,  -- caffeine, mg
    calories      INTEGER NOT NULL,
    volume        TEXT NOT NULL,     -- millilitres, decimal string
    name          TEXT NOT NULL,
    type          TEXT NOT NULL,     -- category label
    time_consumed TEXT               -- yyyy-MM-dd HH:mm:ss (or bare yyyy-MM-dd)
);

CREATE INDEX IF NOT EXISTS history_date_idx ON history(date);
CREATE INDEX IF NOT EXISTS history_match_idx
    ON history(time_consumed, name, entry);

PRAGMA user_version = 1;
";
