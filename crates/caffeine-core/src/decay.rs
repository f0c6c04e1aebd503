//! The decay engine: first-order elimination with a fixed half-life.
//!
//! Everything here is pure. Elapsed time is measured on the clock face: hour
//! and minute components are subtracted directly, so a query only makes sense
//! against events from the same calendar day. Events that appear to lie in the
//! future contribute nothing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::intake::{CaffeinePoint, IntakeEvent};

/// Time for a dose's contribution to halve.
pub const HALF_LIFE_HOURS: f64 = 5.0;

/// Elimination constant `k`; level after `t` hours is `dose * e^(-k*t)`.
pub const DECAY_CONSTANT: f64 = std::f64::consts::LN_2 / HALF_LIFE_HOURS;

/// First and last sample of [`daily_series`], inclusive.
pub const SERIES_START: NaiveTime = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
pub const SERIES_END: NaiveTime = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
pub const SERIES_STEP_MINUTES: i64 = 30;

/// Hours between `consumed` and `at` using only the hour and minute fields.
fn clock_hours_between(consumed: NaiveDateTime, at: NaiveDateTime) -> f64 {
  let hours = f64::from(at.hour()) - f64::from(consumed.hour());
  let minutes = f64::from(at.minute()) - f64::from(consumed.minute());
  hours + minutes / 60.0
}

/// Remaining caffeine from a single dose after `hours`.
pub fn decayed(dose_mg: u32, hours: f64) -> f64 {
  f64::from(dose_mg) * (-DECAY_CONSTANT * hours).exp()
}

/// Total caffeine in the body at `at`, in mg. Unlogged events contribute 0.
pub fn level_at(events: &[IntakeEvent], at: NaiveDateTime) -> f64 {
  events
    .iter()
    .filter_map(|event| {
      let consumed = event.consumed_at?;
      let hours = clock_hours_between(consumed, at);
      (hours >= 0.0).then(|| decayed(event.caffeine_mg, hours))
    })
    .sum()
}

/// Sample [`level_at`] every half hour from 06:00 to 22:00 on `day`.
/// Always returns 33 points.
pub fn daily_series(events: &[IntakeEvent], day: NaiveDate) -> Vec<CaffeinePoint> {
  let step = chrono::Duration::minutes(SERIES_STEP_MINUTES);
  let mut points = Vec::new();
  let mut time = SERIES_START;
  while time <= SERIES_END {
    points.push(CaffeinePoint {
      time,
      level_mg: level_at(events, day.and_time(time)),
    });
    time += step;
  }
  points
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::intake::Category;

  fn day() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 5, 14).unwrap() }

  fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).unwrap()
  }

  fn drink(name: &str, mg: u32, h: u32, m: u32) -> IntakeEvent {
    IntakeEvent::new(name, Category::Coffee, mg, 5, "250").consumed(at(h, m))
  }

  fn close(a: f64, b: f64) -> bool { (a - b).abs() <= 1e-6 * b.abs().max(1.0) }

  #[test]
  fn no_events_means_no_caffeine() {
    assert_eq!(level_at(&[], at(12, 0)), 0.0);
  }

  #[test]
  fn no_decay_at_consumption_time() {
    let events = [drink("Espresso", 64, 9, 30)];
    assert_eq!(level_at(&events, at(9, 30)), 64.0);
  }

  #[test]
  fn half_life_halves_the_dose() {
    let events = [drink("Drip", 180, 7, 0)];
    assert!(close(level_at(&events, at(12, 0)), 90.0));
  }

  #[test]
  fn level_is_non_increasing_over_the_day() {
    let events = [drink("Drip", 180, 6, 0)];
    let mut previous = f64::INFINITY;
    for minutes in 0..(17 * 60) {
      let t = at(6 + minutes / 60, minutes % 60);
      let level = level_at(&events, t);
      assert!(level <= previous);
      previous = level;
    }
  }

  #[test]
  fn future_events_contribute_nothing() {
    let events = [drink("Cold Brew", 200, 15, 0), drink("Tea", 40, 8, 0)];
    assert!(close(level_at(&events, at(8, 0)), 40.0));
    assert_eq!(level_at(&events[..1], at(14, 59)), 0.0);
  }

  #[test]
  fn unlogged_events_contribute_nothing() {
    let pending = IntakeEvent::new("Mocha", Category::Coffee, 95, 290, "350");
    assert_eq!(level_at(&[pending], at(12, 0)), 0.0);
  }

  #[test]
  fn elapsed_time_ignores_the_date() {
    // Clock-face arithmetic: a drink from yesterday morning looks like it was
    // consumed this morning.
    let yesterday = day().pred_opt().unwrap().and_hms_opt(8, 0, 0).unwrap();
    let events =
      [IntakeEvent::new("Drip", Category::Coffee, 100, 5, "250").consumed(yesterday)];
    assert!(close(level_at(&events, at(13, 0)), 50.0));
  }

  #[test]
  fn two_drinks_at_once_both_halve() {
    let events = [drink("Coffee", 100, 8, 0), drink("Tea", 50, 8, 0)];
    assert!(close(level_at(&events, at(13, 0)), 75.0));
  }

  #[test]
  fn series_has_thirty_three_half_hour_samples() {
    for events in [vec![], vec![drink("Drip", 100, 8, 0)], vec![
      drink("Drip", 100, 8, 0),
      drink("Tea", 40, 14, 30),
      drink("Cola", 34, 21, 0),
    ]] {
      let series = daily_series(&events, day());
      assert_eq!(series.len(), 33);
      assert_eq!(series[0].time, SERIES_START);
      assert_eq!(series[32].time, SERIES_END);
      assert_eq!(
        series[1].time,
        NaiveTime::from_hms_opt(6, 30, 0).unwrap()
      );
    }
  }

  #[test]
  fn series_tracks_level_at() {
    let events = [drink("Drip", 100, 8, 0)];
    let series = daily_series(&events, day());
    assert_eq!(series[0].level_mg, 0.0);
    assert_eq!(series[4].level_mg, 100.0);
    assert!(close(series[14].level_mg, 50.0));
  }
}
