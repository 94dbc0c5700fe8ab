//! Console progress: status lines and a fragment bar on stdout.

use std::io::{self, Write};
use tsgrab_core::progress::{ProgressStats, Reporter};

const BAR_WIDTH: usize = 100;

/// Prints status lines as-is and redraws a single bar line per fragment.
pub struct ConsoleReporter {
    width: usize,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { width: BAR_WIDTH }
    }

    fn draw(&self, stats: &ProgressStats) {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\r{}", render_bar(stats, self.width));
        let _ = stdout.flush();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for ConsoleReporter {
    fn status(&mut self, message: &str) {
        println!("{}", message);
    }

    fn download_started(&mut self, fragment_count: usize) {
        self.draw(&ProgressStats::new(fragment_count));
    }

    fn fragment_done(&mut self, stats: &ProgressStats) {
        self.draw(stats);
    }

    fn download_finished(&mut self, _stats: &ProgressStats) {
        println!();
    }
}

/// `Downloading |#####     | 3/10 (1.25 MiB/s, ETA 14s)`
pub fn render_bar(stats: &ProgressStats, width: usize) -> String {
    let filled = ((stats.fraction() * width as f64).round() as usize).min(width);
    let eta = stats
        .eta_secs()
        .map(|s| format!("{:.0}s", s))
        .unwrap_or_else(|| "?".to_string());
    format!(
        "Downloading |{}{}| {}/{} ({:.2} MiB/s, ETA {})",
        "#".repeat(filled),
        " ".repeat(width - filled),
        stats.fragments_done,
        stats.fragment_count,
        stats.bytes_per_sec() / 1_048_576.0,
        eta
    )
}
