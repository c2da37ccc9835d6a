use std::io::{self, Write};
use std::time::Duration;
use crate::download_session::DownloadSession;

pub const BAR_WIDTH: u64 = 50;

/// Number of `#` cells for the bar: `floor(50 * transferred / total)`.
pub fn filled_cells(transferred: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    ((BAR_WIDTH as u128 * transferred as u128 / total as u128) as u64).min(BAR_WIDTH)
}

pub fn average_kb_per_second(transferred: u64, elapsed: Duration) -> f64 {
    // the first chunk can land inside the timer resolution
    let seconds = elapsed.as_secs_f64().max(0.001);
    (transferred as f64 / 1024f64) / seconds
}

pub fn format_throughput(kb_per_second: f64) -> String {
    if kb_per_second > 1024f64 {
        format!("{:.2} MB/s", kb_per_second / 1024f64)
    } else {
        format!("{:.2} KB/s", kb_per_second)
    }
}

/// One redraw of the progress line, starting with a carriage return.
pub fn progress_line(transferred: u64, total: u64, elapsed: Duration) -> String {
    let done = filled_cells(transferred, total);
    let percentage = if total == 0 { 0f64 } else { transferred as f64 / total as f64 * 100f64 };
    let speed = format_throughput(average_kb_per_second(transferred, elapsed));
    format!(
        "\r[{}{}] {:.2}% ({})     ",
        "#".repeat(done as usize),
        ".".repeat((BAR_WIDTH - done) as usize),
        percentage,
        speed
    )
}

/// Draws progress for a known-length transfer onto a console writer.
pub struct ProgressReporter<W: Write> {
    console: W,
    updates: usize,
}

impl<W: Write> ProgressReporter<W> {
    pub fn new(console: W) -> Self {
        Self {
            console,
            updates: 0,
        }
    }

    pub fn report(&mut self, session: &DownloadSession) -> io::Result<()> {
        let total = match session.expected_total_bytes() {
            Some(total) => total,
            None => return Ok(()),
        };
        let line = progress_line(session.bytes_transferred(), total, session.elapsed());
        self.updates += 1;
        self.console.write_all(line.as_bytes())?;
        self.console.flush()
    }

    /// Leaves the cursor on a fresh line.
    pub fn finish(&mut self) -> io::Result<()> {
        self.console.write_all(b"\n")?;
        self.console.flush()
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn into_inner(self) -> W {
        self.console
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;
    use std::time::Duration;
    use crate::download_progress::*;
    use crate::download_session::DownloadSession;

    #[test]
    fn test_filled_cells() {
        assert_eq!(filled_cells(0, 1000), 0);
        assert_eq!(filled_cells(500, 1000), 25);
        assert_eq!(filled_cells(999, 1000), 49);
        assert_eq!(filled_cells(1000, 1000), 50);
        assert_eq!(filled_cells(1, 3), 16);
        // a server sending more than announced does not overflow the bar
        assert_eq!(filled_cells(2000, 1000), 50);
    }

    #[test]
    fn test_throughput_unit_switch() {
        assert_eq!(format_throughput(1023f64), "1023.00 KB/s");
        assert_eq!(format_throughput(1024f64), "1024.00 KB/s");
        assert_eq!(format_throughput(1025f64), "1.00 MB/s");
        assert_eq!(format_throughput(3072f64), "3.00 MB/s");
    }

    #[test]
    fn test_average_kb_per_second() {
        let speed = average_kb_per_second(1023 * 1024, Duration::from_secs(1));
        assert_eq!(format_throughput(speed), "1023.00 KB/s");
        let speed = average_kb_per_second(1025 * 1024 * 2, Duration::from_secs(2));
        assert_eq!(format_throughput(speed), "1.00 MB/s");
    }

    #[test]
    fn test_progress_line_half() {
        let line = progress_line(512, 1024, Duration::from_secs(1));
        assert!(line.starts_with('\r'));
        assert!(line.contains(&format!("[{}{}]", "#".repeat(25), ".".repeat(25))));
        assert!(line.contains(" 50.00% (0.50 KB/s)"));
    }

    #[test]
    fn test_reporter_skips_unknown_length() {
        let mut session = DownloadSession::new("http://localhost/a", Path::new("a"));
        session.record(10);
        let mut reporter = ProgressReporter::new(Vec::new());
        reporter.report(&session).unwrap();
        reporter.finish().unwrap();
        assert_eq!(reporter.updates(), 0);
        assert_eq!(reporter.into_inner(), b"\n");
    }

    #[test]
    fn test_reporter_redraws_same_line() {
        let mut session = DownloadSession::new("http://localhost/a", Path::new("a"));
        session.set_expected_total_bytes(Some(100));
        let mut reporter = ProgressReporter::new(Vec::new());
        session.record(40);
        reporter.report(&session).unwrap();
        session.record(60);
        reporter.report(&session).unwrap();
        reporter.finish().unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(output.matches('\r').count(), 2);
        assert_eq!(output.matches('\n').count(), 1);
        assert!(output.ends_with("\n"));
        assert!(output.contains("100.00%"));
    }
}
