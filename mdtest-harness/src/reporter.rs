//! Result presentation.
//!
//! Reporters receive events in the order they happen and render them; they
//! never decide pass/fail. The console format is kept stable so runs can be
//! compared line by line:
//!
//! ```text
//! 001 Amps and angle encoding                                OK
//! 002 Auto links                                             Mismatch
//!
//! Tests    : 2
//! Passed   : 1
//! Mismatch : 1
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::benchmark::BenchmarkResult;
use crate::logger::Verbosity;
use crate::types::{CaseStatus, FixtureOutcome, RunSummary};

/// Width of the case-name column in case lines.
pub const NAME_COLUMN_WIDTH: usize = 55;

/// Sink for run results.
pub trait Reporter {
    /// A fixture folder is about to be evaluated.
    fn folder_started(&self, dir: &Path);

    /// One case finished. Called once per case, in evaluation order.
    fn case(&self, outcome: &FixtureOutcome);

    /// A folder run completed.
    fn summary(&self, summary: &RunSummary);

    /// Remediation guidance for a human.
    fn hint(&self, message: &str);

    /// The benchmark suite is about to run.
    fn benchmark_started(&self);

    /// One benchmark tier completed.
    fn benchmark(&self, result: &BenchmarkResult);
}

/// Format the fixed-width case line: zero-padded index, padded name, status.
pub fn format_case_line(index: usize, name: &str, status: CaseStatus) -> String {
    format!(
        "{:03} {:<width$}{}",
        index,
        name,
        status,
        width = NAME_COLUMN_WIDTH
    )
}

/// Plain-text reporter over any writer (stdout in the CLI).
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: Mutex<W>,
    verbosity: Verbosity,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            verbosity: Verbosity::Normal,
        }
    }

    /// At `Verbose` and above, mismatches also show where they diverge.
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Recover the writer (tests read back what was rendered).
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_lines(&self, lines: &[String]) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        for line in lines {
            let _ = writeln!(out, "{}", line);
        }
        let _ = out.flush();
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn folder_started(&self, dir: &Path) {
        self.write_lines(&[
            String::new(),
            format!("Markdown test run on {}", dir.display()),
            String::new(),
        ]);
    }

    fn case(&self, outcome: &FixtureOutcome) {
        let mut lines = vec![format_case_line(
            outcome.index,
            &outcome.case.name,
            outcome.status,
        )];

        if self.verbosity >= Verbosity::Verbose && outcome.status.is_failure() {
            if outcome.expected_missing {
                lines.push(format!(
                    "    expected file missing: {}",
                    outcome.case.expected_path.display()
                ));
            } else if let Some(diff) = &outcome.diff {
                match diff.first_diff_line {
                    Some(line) => {
                        lines.push(format!("    first difference at line {}", line));
                        lines.push(format!(
                            "      expected: {:?}",
                            diff.expected_excerpt.as_deref().unwrap_or("<end of file>")
                        ));
                        lines.push(format!(
                            "      actual:   {:?}",
                            diff.actual_excerpt.as_deref().unwrap_or("<end of file>")
                        ));
                    }
                    None => lines.push(format!(
                        "    line terminators differ ({} vs {} bytes)",
                        diff.expected_len, diff.actual_len
                    )),
                }
            }
        }

        self.write_lines(&lines);
    }

    fn summary(&self, summary: &RunSummary) {
        self.write_lines(&[
            String::new(),
            format!("Tests    : {}", summary.total()),
            format!("Passed   : {}", summary.passed()),
            format!("Mismatch : {}", summary.failed()),
        ]);
    }

    fn hint(&self, message: &str) {
        let mut lines = vec![String::new()];
        lines.extend(message.lines().map(str::to_string));
        self.write_lines(&lines);
    }

    fn benchmark_started(&self) {
        self.write_lines(&[
            String::new(),
            "running standard benchmark, please wait..".to_string(),
            String::new(),
        ]);
    }

    fn benchmark(&self, result: &BenchmarkResult) {
        self.write_lines(&[
            format!(
                "[{}] input string length: {}",
                result.label, result.input_len
            ),
            format!(
                "[{}] performed {} iterations in {:.4} ms ({:.4} ms per iteration)",
                result.label,
                result.iterations,
                result.total_elapsed_millis(),
                result.per_iteration_millis()
            ),
        ]);
    }
}

/// An event captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    FolderStarted(PathBuf),
    Case {
        index: usize,
        name: String,
        status: CaseStatus,
    },
    Summary(RunSummary),
    Hint(String),
    BenchmarkStarted,
    Benchmark(BenchmarkResult),
}

/// Reporter for tests that records every event.
/// Cloning creates a new handle to the same event log.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    events: Arc<RwLock<Vec<ReportEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.read().unwrap().clone()
    }

    /// `(index, name, status)` of every reported case, in order.
    pub fn cases(&self) -> Vec<(usize, String, CaseStatus)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Case {
                    index,
                    name,
                    status,
                } => Some((index, name, status)),
                _ => None,
            })
            .collect()
    }

    pub fn summaries(&self) -> Vec<RunSummary> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Summary(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn hints(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Hint(h) => Some(h),
                _ => None,
            })
            .collect()
    }

    pub fn benchmarks(&self) -> Vec<BenchmarkResult> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Benchmark(b) => Some(b),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: ReportEvent) {
        self.events.write().unwrap().push(event);
    }
}

impl Reporter for RecordingReporter {
    fn folder_started(&self, dir: &Path) {
        self.push(ReportEvent::FolderStarted(dir.to_path_buf()));
    }

    fn case(&self, outcome: &FixtureOutcome) {
        self.push(ReportEvent::Case {
            index: outcome.index,
            name: outcome.case.name.clone(),
            status: outcome.status,
        });
    }

    fn summary(&self, summary: &RunSummary) {
        self.push(ReportEvent::Summary(*summary));
    }

    fn hint(&self, message: &str) {
        self.push(ReportEvent::Hint(message.to_string()));
    }

    fn benchmark_started(&self) {
        self.push(ReportEvent::BenchmarkStarted);
    }

    fn benchmark(&self, result: &BenchmarkResult) {
        self.push(ReportEvent::Benchmark(result.clone()));
    }
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn folder_started(&self, _dir: &Path) {}
    fn case(&self, _outcome: &FixtureOutcome) {}
    fn summary(&self, _summary: &RunSummary) {}
    fn hint(&self, _message: &str) {}
    fn benchmark_started(&self) {}
    fn benchmark(&self, _result: &BenchmarkResult) {}
}
