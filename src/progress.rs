use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, IsTerminal};
use std::time::Duration;

/// Progress indicators on stderr. Stdout carries the JSON document only.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(quiet: bool) -> Self {
        // Only draw when a person is watching stderr
        let enabled = !quiet && io::stderr().is_terminal();

        Self { enabled }
    }

    /// Create a spinner for a running fetch
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Some(pb)
    }
}

/// Spinner bound to one API operation; a no-op when progress is disabled
pub struct FetchProgress {
    bar: Option<ProgressBar>,
}

impl FetchProgress {
    pub fn new(manager: &ProgressManager, message: &str) -> Self {
        Self {
            bar: manager.spinner(message),
        }
    }

    pub fn finish_and_clear(&self) {
        if let Some(pb) = &self.bar {
            pb.finish_and_clear();
        }
    }
}

impl Drop for FetchProgress {
    fn drop(&mut self) {
        if let Some(pb) = &self.bar {
            if !pb.is_finished() {
                pb.finish_and_clear();
            }
        }
    }
}
