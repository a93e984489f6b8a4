use std::{
    io::{self, Write},
    sync::Mutex,
    time::Duration,
};

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::migrate::Reporter;

/// Console implementation of the migration core's progress and
/// confirmation sink.
///
/// Status updates during open-ended phases (pagination) show up as a
/// spinner; counted phases (replay, wipe) get a position bar. Confirmation
/// prompts clear any active display first so the question is not swallowed
/// by a redraw.
pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} {msg}")
                .unwrap()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb
    }

    fn counter(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::with_template("{bar:40.blue} {pos}/{len} {msg}").unwrap(),
        );
        pb
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn status(&self, message: &str) {
        let mut bar = self.bar.lock().unwrap();
        let pb = bar.get_or_insert_with(Self::spinner);
        pb.set_message(message.to_string());
    }

    fn progress(&self, done: usize, total: usize) {
        let mut bar = self.bar.lock().unwrap();

        let needs_new = bar
            .as_ref()
            .map(|pb| pb.length() != Some(total as u64))
            .unwrap_or(true);
        if needs_new {
            if let Some(pb) = bar.take() {
                pb.finish_and_clear();
            }
            *bar = Some(Self::counter(total as u64));
        }

        if let Some(pb) = bar.as_ref() {
            pb.set_position(done as u64);
        }
    }

    fn finish(&self) {
        if let Some(pb) = self.bar.lock().unwrap().take() {
            pb.finish_and_clear();
        }
    }

    fn confirm(&self, message: &str) -> bool {
        self.finish();

        print!("[{}] {} (y/n): ", "?".yellow().bold(), message);
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim().eq_ignore_ascii_case("y")
    }
}
