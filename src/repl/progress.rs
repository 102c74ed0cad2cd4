use std::path::Path;
use std::time::{Duration, Instant};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::utils::formatting::format_elapsed;

/// Spinner shown while thumbnails are fetched and the report is drawn.
pub struct ExportProgress {
    bar: ProgressBar,
    start_time: Instant,
}

impl ExportProgress {
    pub fn start(items: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(spinner) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
            bar.set_style(spinner);
        }
        bar.set_message(format!("Rendering report for {} items...", items));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    pub fn finish(self, path: &Path) {
        let elapsed = format_elapsed(self.start_time.elapsed().as_millis() as u64);
        self.bar.finish_with_message(format!(
            "{} Report saved to {} ({})",
            style("✓").green(),
            style(path.display()).white().bold(),
            elapsed,
        ));
    }

    pub fn fail(self) {
        self.bar.finish_and_clear();
    }
}
