//! Progress reporting for a run (stage messages, fragments done, rate).
//!
//! The pipeline never prints: it hands messages and snapshots to a `Reporter`
//! owned by the caller for the duration of one run.

/// Snapshot of download progress after a fragment completes.
#[derive(Debug, Clone, Default)]
pub struct ProgressStats {
    /// Fragments fully written so far.
    pub fragments_done: usize,
    /// Total fragments listed in the manifest.
    pub fragment_count: usize,
    /// Bytes written so far.
    pub bytes_done: u64,
    /// Elapsed time since the download stage started (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    pub fn new(fragment_count: usize) -> Self {
        Self {
            fragment_count,
            ..Self::default()
        }
    }

    /// Download rate in bytes per second (0 if elapsed is 0).
    pub fn bytes_per_sec(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.bytes_done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining from the average time per fragment.
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.fragment_count.saturating_sub(self.fragments_done);
        if remaining == 0 {
            return Some(0.0);
        }
        if self.fragments_done == 0 || self.elapsed_secs <= 0.0 {
            return None;
        }
        Some(self.elapsed_secs / self.fragments_done as f64 * remaining as f64)
    }

    /// Fraction of fragments complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.fragment_count == 0 {
            return 1.0;
        }
        (self.fragments_done as f64 / self.fragment_count as f64).min(1.0)
    }
}

/// Receives stage messages and per-fragment progress for one run.
pub trait Reporter {
    /// A plain status line ("Fetching page...", "Found vid: 123", ...).
    fn status(&mut self, message: &str);

    /// Called once before the first fragment request.
    fn download_started(&mut self, _fragment_count: usize) {}

    /// Called after each fragment has been fully written.
    fn fragment_done(&mut self, stats: &ProgressStats);

    /// Called once after the last fragment, only on success.
    fn download_finished(&mut self, _stats: &ProgressStats) {}
}

/// Reporter that discards everything.
#[derive(Debug, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn status(&mut self, _message: &str) {}
    fn fragment_done(&mut self, _stats: &ProgressStats) {}
}
