use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TEMPLATE: &str = "{msg:.yellow} {pos}/{len} completed";

/// Single-line "Checking records... n/total completed" display.
pub struct Progress {
  bar: ProgressBar,
}

impl Progress {
  /// Draws on stdout; indicatif stays silent when stdout is not a terminal.
  #[must_use]
  pub fn stdout(total: usize) -> Self {
    let bar = ProgressBar::with_draw_target(
      Some(total as u64),
      ProgressDrawTarget::stdout(),
    );
    bar.set_style(
      ProgressStyle::with_template(TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("Checking records...");
    Self { bar }
  }

  #[must_use]
  pub fn hidden(total: usize) -> Self {
    Self {
      bar: ProgressBar::with_draw_target(
        Some(total as u64),
        ProgressDrawTarget::hidden(),
      ),
    }
  }

  pub fn update(&self, completed: usize) {
    self.bar.set_position(completed as u64);
  }

  #[must_use]
  pub fn position(&self) -> u64 {
    self.bar.position()
  }

  /// Removes the line so the report starts on a clean screen.
  pub fn clear(&self) {
    self.bar.finish_and_clear();
  }

  /// Leaves the last state visible, e.g. before a cancellation notice.
  pub fn abandon(&self) {
    self.bar.abandon();
  }
}
