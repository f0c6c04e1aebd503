//! The tracker — compares today's caffeine level against the daily limit and
//! decides which warnings to raise.
//!
//! The tracker holds no intake data of its own. Each evaluation re-reads the
//! current day from an [`IntakeStore`], runs it through the decay engine and
//! hands any resulting [`Signal`]s to its [`Notifier`]. Nothing is debounced:
//! evaluating twice inside the same window raises the same signal twice.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{Duration, Local, NaiveDateTime};
use tracing::info;

use crate::{decay, intake::IntakeEvent, store::IntakeStore};

/// Daily limit used when none is configured, in mg.
pub const DEFAULT_DAILY_LIMIT_MG: u32 = 200;

/// Fraction of the limit at which the limit warning fires.
pub const LIMIT_WARNING_RATIO: f64 = 0.8;

/// Hours after the last drink at which a crash is expected.
pub const CRASH_ONSET_HOURS: i64 = 6;

/// How long after the expected crash the warning keeps firing.
pub const CRASH_WINDOW_MINUTES: i64 = 30;

// ─── Signals ─────────────────────────────────────────────────────────────────

/// Fixed advice attached to every crash warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrashAdvisory {
  pub title:       &'static str,
  pub summary:     &'static str,
  pub suggestions: &'static [&'static str],
}

pub const CRASH_ADVISORY: CrashAdvisory = CrashAdvisory {
  title:       "Caffeine Crash Warning",
  summary:     "You might experience a caffeine crash soon. Consider taking a \
                break or having a light snack.",
  suggestions: &[
    "Taking a short break",
    "Having a light snack",
    "Drinking water",
    "Getting some fresh air",
  ],
};

/// A decision produced by [`Tracker::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
  /// The current level is at or above [`LIMIT_WARNING_RATIO`] of the limit.
  LimitWarning { current_level: u32, limit: u32 },
  /// The last drink was long enough ago that a crash is likely now.
  CrashWarning(CrashAdvisory),
}

impl Signal {
  /// Current level as a whole percentage of the limit; `None` for crash
  /// warnings or a zero limit.
  pub fn percent_of_limit(&self) -> Option<u32> {
    match *self {
      Self::LimitWarning { current_level, limit } if limit > 0 => {
        Some((f64::from(current_level) / f64::from(limit) * 100.0) as u32)
      }
      _ => None,
    }
  }

  /// Milligrams left before the limit; negative once it is exceeded.
  pub fn remaining_mg(&self) -> Option<i64> {
    match *self {
      Self::LimitWarning { current_level, limit } => {
        Some(i64::from(limit) - i64::from(current_level))
      }
      Self::CrashWarning(_) => None,
    }
  }
}

/// Receives the tracker's decisions. Rendering is entirely up to the
/// implementation.
pub trait Notifier: Send + Sync {
  fn notify(&self, signal: &Signal);
}

// ─── Pure checks ─────────────────────────────────────────────────────────────

/// Whether `current_level` has reached the warning threshold for `limit`.
pub fn limit_reached(current_level: u32, limit: u32) -> bool {
  f64::from(current_level) >= f64::from(limit) * LIMIT_WARNING_RATIO
}

/// Whether `now` falls in `[crash, crash + 30min]`, where `crash` is six hours
/// after the most recently consumed drink. Unlogged drinks are ignored.
pub fn crash_due(events: &[IntakeEvent], now: NaiveDateTime) -> bool {
  let Some(last) = events.iter().filter_map(|e| e.consumed_at).max() else {
    return false;
  };
  let crash = last + Duration::hours(CRASH_ONSET_HOURS);
  crash <= now && now <= crash + Duration::minutes(CRASH_WINDOW_MINUTES)
}

// ─── Tracker ─────────────────────────────────────────────────────────────────

/// Owns the daily limit and the notifier. Share it by reference or `Arc`; the
/// limit may be changed concurrently with evaluations.
pub struct Tracker<N> {
  limit:    AtomicU32,
  notifier: N,
}

impl<N: Notifier> Tracker<N> {
  pub fn new(notifier: N, daily_limit_mg: u32) -> Self {
    Self { limit: AtomicU32::new(daily_limit_mg), notifier }
  }

  pub fn limit(&self) -> u32 { self.limit.load(Ordering::Relaxed) }

  pub fn set_limit(&self, mg: u32) { self.limit.store(mg, Ordering::Relaxed) }

  pub fn notifier(&self) -> &N { &self.notifier }

  /// Today's caffeine level right now, truncated to whole mg.
  pub async fn current_level<S: IntakeStore>(
    &self,
    store: &S,
  ) -> Result<u32, S::Error> {
    self.current_level_at(store, now()).await
  }

  pub async fn current_level_at<S: IntakeStore>(
    &self,
    store: &S,
    now: NaiveDateTime,
  ) -> Result<u32, S::Error> {
    let events = store.read_day(now.date()).await?;
    Ok(decay::level_at(&events, now) as u32)
  }

  /// Run both checks against the store and notify for each that fires.
  pub async fn evaluate<S: IntakeStore>(
    &self,
    store: &S,
  ) -> Result<Vec<Signal>, S::Error> {
    self.evaluate_at(store, now()).await
  }

  pub async fn evaluate_at<S: IntakeStore>(
    &self,
    store: &S,
    now: NaiveDateTime,
  ) -> Result<Vec<Signal>, S::Error> {
    let events = store.read_day(now.date()).await?;
    let current_level = decay::level_at(&events, now) as u32;
    let limit = self.limit();

    let mut signals = Vec::new();
    if limit_reached(current_level, limit) {
      signals.push(Signal::LimitWarning { current_level, limit });
    }
    if crash_due(&events, now) {
      signals.push(Signal::CrashWarning(CRASH_ADVISORY));
    }

    for signal in &signals {
      info!(?signal, current_level, limit, "raising caffeine signal");
      self.notifier.notify(signal);
    }
    Ok(signals)
  }
}

fn now() -> NaiveDateTime { Local::now().naive_local() }
