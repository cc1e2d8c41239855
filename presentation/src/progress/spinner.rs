//! Spinner shown on stderr while the pipeline works.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for `ask`. Hidden when disabled (e.g. with `--json`).
pub struct AnswerSpinner {
    bar: ProgressBar,
}

impl AnswerSpinner {
    pub fn start(message: &str, enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        bar.set_style(Self::style());
        bar.set_message(message.to_string());
        if enabled {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        Self { bar }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg:.bold.cyan} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn is_hidden(&self) -> bool {
        self.bar.is_hidden()
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_hidden() {
        let spinner = AnswerSpinner::start("Thinking...", false);
        assert!(spinner.is_hidden());
        spinner.finish();
    }
}
