//! Console rendering of tracker signals.

use caffeine_core::tracker::{Notifier, Signal};

/// Writes every signal to stdout as it arrives.
pub struct ConsoleNotifier;

impl ConsoleNotifier {
  pub fn render(signal: &Signal) -> String {
    match signal {
      Signal::LimitWarning { .. } => format!(
        "Approaching Caffeine Limit\n  You're at {}% of your daily limit ({} mg remaining)",
        signal.percent_of_limit().unwrap_or_default(),
        signal.remaining_mg().unwrap_or_default(),
      ),
      Signal::CrashWarning(advisory) => {
        let mut out = format!("{}\n  {}", advisory.title, advisory.summary);
        for suggestion in advisory.suggestions {
          out.push_str("\n  • ");
          out.push_str(suggestion);
        }
        out
      }
    }
  }
}

impl Notifier for ConsoleNotifier {
  fn notify(&self, signal: &Signal) {
    println!("{}", Self::render(signal));
  }
}

#[cfg(test)]
mod tests {
  use caffeine_core::tracker::CRASH_ADVISORY;

  use super::*;

  #[test]
  fn limit_warning_text() {
    let text = ConsoleNotifier::render(&Signal::LimitWarning {
      current_level: 180,
      limit:         200,
    });
    assert!(text.contains("90% of your daily limit (20 mg remaining)"));
  }

  #[test]
  fn crash_warning_lists_suggestions() {
    let text = ConsoleNotifier::render(&Signal::CrashWarning(CRASH_ADVISORY));
    assert!(text.starts_with("Caffeine Crash Warning"));
    assert!(text.contains("• Drinking water"));
  }
}
