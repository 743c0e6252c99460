//! Progress bar fed by the audit engine.

use doomsday::{FirmwareRecord, Progress, ProgressObserver};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Renders audit progress on stderr.
pub struct ProgressReporter {
    bar: ProgressBar,
    verbose: bool,
}

impl ProgressReporter {
    /// Create a reporter for `total` records; hidden when `enabled` is false.
    pub fn new(total: usize, enabled: bool, verbose: bool) -> Self {
        let bar = if enabled {
            let bar = ProgressBar::with_draw_target(
                Some(total as u64),
                ProgressDrawTarget::stderr(),
            );
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.cyan} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>5}/{len:5} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        } else {
            ProgressBar::hidden()
        };

        Self { bar, verbose }
    }

    /// Clear the bar once the run ends.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for ProgressReporter {
    fn on_progress(&mut self, progress: &Progress, record: &FirmwareRecord) {
        self.bar.set_position(progress.index as u64);
        self.bar
            .set_message(format!("({:04} failed so far)", progress.failed));

        if self.verbose && progress.result.is_dead() {
            self.bar
                .println(format!("dead: {record} {}", record.download_url));
        }
    }
}
