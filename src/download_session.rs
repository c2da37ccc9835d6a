use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// State of one transfer. Lives only for the duration of a single download.
pub struct DownloadSession {
    url: String,
    path: PathBuf,
    expected_total_bytes: Option<u64>,
    bytes_transferred: u64,
    started: Instant,
}

impl DownloadSession {
    pub fn new(url: &str, path: &Path) -> DownloadSession {
        DownloadSession {
            url: url.to_string(),
            path: path.to_path_buf(),
            expected_total_bytes: None,
            bytes_transferred: 0,
            started: Instant::now(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_expected_total_bytes(&mut self, total: Option<u64>) {
        self.expected_total_bytes = total;
    }

    pub fn expected_total_bytes(&self) -> Option<u64> {
        self.expected_total_bytes
    }

    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred
    }

    pub fn record(&mut self, length: usize) {
        self.bytes_transferred += length as u64;
    }

    /// Restarts the clock used for throughput.
    pub fn start_timer(&mut self) {
        self.started = Instant::now();
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// `None` in unknown-length mode.
    pub fn percentage(&self) -> Option<f64> {
        match self.expected_total_bytes {
            Some(total) if total > 0 => Some(self.bytes_transferred as f64 / total as f64 * 100f64),
            _ => None,
        }
    }
}
