//! Grouping stored intake into per-day history sections.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::StoredIntake;

/// One calendar day of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHistory {
  pub day:      NaiveDate,
  /// Newest first; entries without a consumption time sort last.
  pub entries:  Vec<StoredIntake>,
  /// Sum of raw doses, without decay.
  pub total_mg: u64,
}

/// Group `entries` by day, newest day first.
pub fn group_by_day(entries: Vec<StoredIntake>) -> Vec<DayHistory> {
  let mut days: BTreeMap<NaiveDate, Vec<StoredIntake>> = BTreeMap::new();
  for entry in entries {
    days.entry(entry.day).or_default().push(entry);
  }

  days
    .into_iter()
    .rev()
    .map(|(day, mut entries)| {
      // `None` orders below `Some`, so reversing puts timeless rows last.
      entries.sort_by(|a, b| b.event.consumed_at.cmp(&a.event.consumed_at));
      let total_mg = entries.iter().map(|e| u64::from(e.event.caffeine_mg)).sum();
      DayHistory { day, entries, total_mg }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use uuid::Uuid;

  use super::*;
  use crate::intake::{Category, IntakeEvent};

  fn entry(day: NaiveDate, hour: Option<u32>, mg: u32) -> StoredIntake {
    let mut event = IntakeEvent::new("Drip", Category::Coffee, mg, 5, "250");
    event.consumed_at = hour.map(|h| day.and_hms_opt(h, 0, 0).unwrap());
    StoredIntake { entry_id: Uuid::new_v4(), day, event }
  }

  #[test]
  fn groups_newest_day_first_with_totals() {
    let mon = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
    let tue = mon.succ_opt().unwrap();

    let history = group_by_day(vec![
      entry(mon, Some(8), 100),
      entry(tue, Some(7), 60),
      entry(mon, Some(15), 40),
      entry(tue, None, 20),
      entry(tue, Some(12), 30),
    ]);

    assert_eq!(history.len(), 2);
    assert_eq!(history[0].day, tue);
    assert_eq!(history[0].total_mg, 110);
    assert_eq!(history[1].total_mg, 140);

    let tue_order: Vec<u32> =
      history[0].entries.iter().map(|e| e.event.caffeine_mg).collect();
    assert_eq!(tue_order, vec![30, 60, 20]);
  }

  #[test]
  fn empty_input_gives_empty_history() {
    assert!(group_by_day(Vec::new()).is_empty());
  }
}
