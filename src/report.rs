//! Console presentation of search events.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::engine::{rate, MatchRecord, Progress, SearchOutcome};
use crate::sink::SinkError;

const HIGHLIGHT: &str = "\x1b[47m\x1b[30m";
const ERROR: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Something worth telling the user about.
#[derive(Debug)]
pub enum SearchEvent<'a> {
    Started {
        prefixes: &'a [String],
        workers: usize,
        interval: u64,
    },
    Progress(&'a Progress),
    Matched(&'a MatchRecord),
    Saved {
        address: &'a str,
        path: &'a Path,
    },
    SaveFailed {
        address: &'a str,
        error: &'a SinkError,
    },
    Finished(&'a SearchOutcome),
}

/// Renders search events.
pub trait ProgressReporter {
    fn render(&mut self, event: &SearchEvent<'_>);
}

/// Layout used by [`ConsoleReporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// One status line rewritten in place
    Inline,
    /// A new line per status, highlighted matches
    Lines,
}

/// Human-readable output on a terminal or any other writer.
pub struct ConsoleReporter<W: Write> {
    out: W,
    style: ReportStyle,
    color: bool,
    /// An inline status line is on screen without a trailing newline
    open_line: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, style: ReportStyle) -> Self {
        Self {
            out,
            style,
            color: false,
            open_line: false,
        }
    }

    /// Enables ANSI colors.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_owned()
        }
    }

    fn close_line(&mut self) -> io::Result<()> {
        if self.open_line {
            self.open_line = false;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn write_event(&mut self, event: &SearchEvent<'_>) -> io::Result<()> {
        match (event, self.style) {
            (SearchEvent::Started { prefixes, interval, .. }, ReportStyle::Inline) => {
                let first = prefixes.first().map(String::as_str).unwrap_or_default();
                writeln!(
                    self.out,
                    "Searching for an address starting with '1{}' (status every {} tries)...",
                    first,
                    format_number(*interval)
                )?;
            }
            (SearchEvent::Started { prefixes, workers, interval }, ReportStyle::Lines) => {
                writeln!(
                    self.out,
                    "Searching for addresses for: [{}] (status every {} tries, {} workers)...",
                    prefixes.join(", "),
                    format_number(*interval),
                    workers
                )?;
            }
            (SearchEvent::Progress(p), ReportStyle::Inline) => {
                write!(
                    self.out,
                    "\r[STATUS] {} tries | {:.1}s | ~{} addr/s",
                    format_number(p.attempts),
                    p.elapsed.as_secs_f64(),
                    format_number(p.rate as u64)
                )?;
                self.open_line = true;
            }
            (SearchEvent::Progress(p), ReportStyle::Lines) => {
                writeln!(self.out)?;
                writeln!(
                    self.out,
                    "[STATUS] {} tries | {} | ~{} addr/s | found: {}/{}",
                    format_number(p.attempts),
                    format_duration(p.elapsed),
                    format_number(p.rate as u64),
                    p.found,
                    p.total
                )?;
            }
            (SearchEvent::Matched(_), ReportStyle::Inline) => self.close_line()?,
            (SearchEvent::Matched(m), ReportStyle::Lines) => {
                let line = format!(
                    "✔ Prefix {} → address {} after {} tries ({})",
                    m.prefix,
                    m.address,
                    format_number(m.attempts),
                    format_duration(m.elapsed)
                );
                let line = self.paint(HIGHLIGHT, &line);
                writeln!(self.out)?;
                writeln!(self.out, "{}", line)?;
            }
            (SearchEvent::Saved { path, .. }, _) => {
                self.close_line()?;
                writeln!(self.out, "Saved to: {}", path.display())?;
            }
            (SearchEvent::SaveFailed { address, error }, _) => {
                self.close_line()?;
                let line = self.paint(
                    ERROR,
                    &format!("Failed to save wallet for {}: {}", address, error),
                );
                writeln!(self.out, "{}", line)?;
            }
            (SearchEvent::Finished(outcome), style) => {
                self.close_line()?;
                let summary = outcome.summary();
                match outcome {
                    SearchOutcome::Completed(_) if style == ReportStyle::Lines => {
                        writeln!(self.out)?;
                        writeln!(
                            self.out,
                            "All prefixes found in {}.",
                            format_duration(summary.elapsed)
                        )?;
                    }
                    SearchOutcome::Completed(_) => {}
                    SearchOutcome::Cancelled(_) => {
                        writeln!(
                            self.out,
                            "Search stopped after {} tries ({}); found {}/{}.",
                            format_number(summary.attempts),
                            format_duration(summary.elapsed),
                            summary.found,
                            summary.total
                        )?;
                    }
                }
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ProgressReporter for ConsoleReporter<W> {
    fn render(&mut self, event: &SearchEvent<'_>) {
        if let Err(e) = self.write_event(event) {
            debug!(error = %e, "failed to write to console");
        }
    }
}

/// Clears the terminal and moves the cursor home.
pub fn clear_screen<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[2J\x1b[H")?;
    out.flush()
}

/// Result printed as JSON when a single prefix was requested.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleResult {
    pub key_wif: String,
    pub new_address: String,
    pub tries: u64,
    /// Rounded to two decimals
    pub elapsed_sec: f64,
    pub rate_addr_per_sec: u64,
}

impl SingleResult {
    pub fn new(record: &MatchRecord) -> Self {
        let secs = record.elapsed.as_secs_f64();
        Self {
            key_wif: record.private_key.to_wif(),
            new_address: record.address.to_string(),
            tries: record.attempts,
            elapsed_sec: (secs * 100.0).round() / 100.0,
            rate_addr_per_sec: rate(record.attempts, record.elapsed) as u64,
        }
    }
}

/// Formats whole seconds as `1y 2d 3h 4m 5s`, skipping zero units except seconds.
pub fn format_duration(elapsed: Duration) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;
    const YEAR: u64 = 365 * DAY;

    let mut secs = elapsed.as_secs();
    let mut parts = Vec::new();
    for (unit, suffix) in [(YEAR, "y"), (DAY, "d"), (HOUR, "h"), (MINUTE, "m")] {
        let count = secs / unit;
        secs %= unit;
        if count > 0 {
            parts.push(format!("{}{}", count, suffix));
        }
    }
    parts.push(format!("{}s", secs));
    parts.join(" ")
}

/// Format a number with comma separators.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{Address, PrivateKey};
    use crate::engine::SearchSummary;

    fn record() -> MatchRecord {
        MatchRecord {
            prefix: "ZUKU".into(),
            address: Address::from_encoded("1ZUKUxyz"),
            private_key: PrivateKey::from_bytes([9u8; 32]),
            attempts: 415_123,
            elapsed: Duration::from_secs(75),
            worker_id: 1,
        }
    }

    fn rendered(style: ReportStyle, events: &[SearchEvent<'_>]) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new(), style);
        for event in events {
            reporter.render(event);
        }
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_secs(59)), "59s");
        assert_eq!(format_duration(Duration::from_secs(3_600)), "1h 0s");
        assert_eq!(
            format_duration(Duration::from_secs(365 * 86_400 + 2 * 86_400 + 3 * 3_600 + 4 * 60 + 5)),
            "1y 2d 3h 4m 5s"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(300_000), "300,000");
        assert_eq!(format_number(1_234_567_890), "1,234,567,890");
    }

    #[test]
    fn test_inline_status_rewrites_line() {
        let p1 = Progress::new(100_000, Duration::from_secs(4), 0, 1);
        let p2 = Progress::new(200_000, Duration::from_secs(8), 0, 1);
        let m = record();
        let out = rendered(
            ReportStyle::Inline,
            &[SearchEvent::Progress(&p1), SearchEvent::Progress(&p2), SearchEvent::Matched(&m)],
        );
        assert_eq!(
            out,
            "\r[STATUS] 100,000 tries | 4.0s | ~25,000 addr/s\
             \r[STATUS] 200,000 tries | 8.0s | ~25,000 addr/s\n"
        );
    }

    #[test]
    fn test_lines_status_and_match() {
        let p = Progress::new(300_000, Duration::from_secs(12), 1, 3);
        let m = record();
        let out = rendered(ReportStyle::Lines, &[SearchEvent::Progress(&p), SearchEvent::Matched(&m)]);
        assert!(out.contains("[STATUS] 300,000 tries | 12s | ~25,000 addr/s | found: 1/3"));
        assert!(out.contains("✔ Prefix ZUKU → address 1ZUKUxyz after 415,123 tries (1m 15s)"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_color_highlights_match() {
        let m = record();
        let mut reporter = ConsoleReporter::new(Vec::new(), ReportStyle::Lines).with_color(true);
        reporter.render(&SearchEvent::Matched(&m));
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("\x1b[47m\x1b[30m✔ Prefix ZUKU"));
        assert!(out.trim_end().ends_with(RESET));
    }

    #[test]
    fn test_finished_messages() {
        let summary = SearchSummary {
            attempts: 2_000,
            elapsed: Duration::from_secs(3),
            found: 1,
            total: 2,
        };
        let done = SearchOutcome::Completed(summary);
        let stopped = SearchOutcome::Cancelled(summary);

        let out = rendered(ReportStyle::Lines, &[SearchEvent::Finished(&done)]);
        assert!(out.contains("All prefixes found in 3s."));

        let out = rendered(ReportStyle::Inline, &[SearchEvent::Finished(&done)]);
        assert!(out.is_empty());

        let out = rendered(ReportStyle::Inline, &[SearchEvent::Finished(&stopped)]);
        assert_eq!(out, "Search stopped after 2,000 tries (3s); found 1/2.\n");
    }

    #[test]
    fn test_single_result_json() {
        let result = SingleResult::new(&record());
        assert_eq!(result.tries, 415_123);
        assert_eq!(result.elapsed_sec, 75.0);
        assert_eq!(result.rate_addr_per_sec, 5_534);

        let json: serde_json::Value = serde_json::to_value(&result).unwrap();
        assert_eq!(json["new_address"], "1ZUKUxyz");
        assert!(json["key_wif"].as_str().unwrap().starts_with('K'));
    }
}
