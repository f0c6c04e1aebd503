//! Intake types — the records the rest of the crate reasons about.
//!
//! An [`IntakeEvent`] is immutable once logged. The same type doubles as a
//! catalog entry before it is logged, in which case `consumed_at` is `None`.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Millilitres to US fluid ounces.
pub const ML_TO_FL_OZ: f64 = 0.033814;

// ─── Category ────────────────────────────────────────────────────────────────

/// The kind of drink. Unknown labels are preserved verbatim in
/// [`Category::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
  Coffee,
  Tea,
  EnergyDrinks,
  EnergyShots,
  SoftDrinks,
  Other(String),
}

impl Category {
  /// Case-insensitive parse; never fails.
  pub fn parse(s: &str) -> Self {
    match s.trim().to_lowercase().as_str() {
      "coffee" => Self::Coffee,
      "tea" => Self::Tea,
      "energy drinks" => Self::EnergyDrinks,
      "energy shots" => Self::EnergyShots,
      "soft drinks" => Self::SoftDrinks,
      _ => Self::Other(s.to_owned()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Coffee => "Coffee",
      Self::Tea => "Tea",
      Self::EnergyDrinks => "Energy Drinks",
      Self::EnergyShots => "Energy Shots",
      Self::SoftDrinks => "Soft Drinks",
      Self::Other(s) => s,
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl From<String> for Category {
  fn from(s: String) -> Self { Self::parse(&s) }
}

impl From<Category> for String {
  fn from(c: Category) -> Self { c.as_str().to_owned() }
}

// ─── IntakeEvent ─────────────────────────────────────────────────────────────

/// One consumed (or about-to-be consumed) drink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeEvent {
  pub caffeine_mg: u32,
  pub calories:    u32,
  /// Decimal string exactly as supplied by the catalog.
  pub volume_ml:   String,
  pub name:        String,
  pub category:    Category,
  /// Wall-clock consumption time, second precision. `None` until logged.
  pub consumed_at: Option<NaiveDateTime>,
}

impl IntakeEvent {
  /// An unlogged drink, as it appears in the catalog.
  pub fn new(
    name: impl Into<String>,
    category: Category,
    caffeine_mg: u32,
    calories: u32,
    volume_ml: impl Into<String>,
  ) -> Self {
    Self {
      caffeine_mg,
      calories,
      volume_ml: volume_ml.into(),
      name: name.into(),
      category,
      consumed_at: None,
    }
  }

  /// A copy of this drink marked as consumed at `at`, truncated to whole
  /// seconds so it survives the storage round trip unchanged.
  pub fn consumed(&self, at: NaiveDateTime) -> Self {
    Self {
      consumed_at: Some(at.with_nanosecond(0).unwrap_or(at)),
      ..self.clone()
    }
  }

  /// Calendar day the drink belongs to, if it has been logged.
  pub fn day(&self) -> Option<NaiveDate> {
    self.consumed_at.map(|at| at.date())
  }

  /// The volume parsed as a number; `None` if the stored text is not a
  /// decimal.
  pub fn parsed_volume_ml(&self) -> Option<f64> {
    self.volume_ml.trim().parse::<f64>().ok().filter(|v| v.is_finite())
  }

  pub fn volume_fl_oz(&self) -> Option<f64> {
    self.parsed_volume_ml().map(|ml| ml * ML_TO_FL_OZ)
  }

  /// Check the invariants every persisted event must satisfy before it is
  /// written under `day`, returning the checked consumption time.
  pub fn validate_for(&self, day: NaiveDate) -> Result<NaiveDateTime> {
    let consumed_at = self.consumed_at.ok_or(Error::MissingConsumedAt)?;
    if consumed_at.date() != day {
      return Err(Error::DayMismatch { day, consumed_at });
    }
    if self.name.trim().is_empty() {
      return Err(Error::EmptyName);
    }
    match self.parsed_volume_ml() {
      Some(v) if v > 0.0 => Ok(consumed_at),
      _ => Err(Error::InvalidVolume(self.volume_ml.clone())),
    }
  }
}

// ─── CaffeinePoint ───────────────────────────────────────────────────────────

/// One sample of the decay curve. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaffeinePoint {
  pub time:     NaiveTime,
  pub level_mg: f64,
}
