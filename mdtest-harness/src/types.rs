//! Fixture and result types.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File-name convention tying a fixture's input, expected and actual files together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FixtureNaming {
    /// Suffix of input files (raw Markdown).
    pub input_ext: String,
    /// Suffix of expected output files (accepted HTML).
    pub expected_ext: String,
    /// Suffix of the actual output artifact written on mismatch.
    pub actual_ext: String,
}

impl Default for FixtureNaming {
    fn default() -> Self {
        Self {
            input_ext: ".text".to_string(),
            expected_ext: ".html".to_string(),
            actual_ext: ".actual.html".to_string(),
        }
    }
}

/// A naming convention under which the runner would delete or overwrite
/// inputs or expected files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamingError {
    #[error("naming.{0} must not be empty")]
    Empty(&'static str),

    #[error("naming.{first} {first_ext:?} clashes with naming.{second} {second_ext:?}")]
    Clash {
        first: &'static str,
        first_ext: String,
        second: &'static str,
        second_ext: String,
    },
}

impl FixtureNaming {
    /// Check that the three suffixes can never name the same file.
    ///
    /// All suffixes must be non-empty and pairwise distinct. The input
    /// suffix must also not be a suffix of either output suffix (or the
    /// reverse), otherwise artifacts are discovered as inputs or the
    /// artifact of one case is the input of another.
    pub fn validate(&self) -> Result<(), NamingError> {
        let fields = [
            ("input_ext", &self.input_ext),
            ("expected_ext", &self.expected_ext),
            ("actual_ext", &self.actual_ext),
        ];
        for (field, ext) in fields {
            if ext.is_empty() {
                return Err(NamingError::Empty(field));
            }
        }

        let clash = |(first, a): (&'static str, &String), (second, b): (&'static str, &String)| {
            NamingError::Clash {
                first,
                first_ext: a.clone(),
                second,
                second_ext: b.clone(),
            }
        };

        let [input, expected, actual] = fields;
        for other in [expected, actual] {
            if input.1.ends_with(other.1.as_str()) || other.1.ends_with(input.1.as_str()) {
                return Err(clash(input, other));
            }
        }
        if expected.1 == actual.1 {
            return Err(clash(expected, actual));
        }

        Ok(())
    }

    /// Derive a case from an input path, or `None` if the file name does not
    /// carry the input suffix (or is nothing but the suffix).
    pub fn case_for(&self, input_path: &Path) -> Option<FixtureCase> {
        let file_name = input_path.file_name()?.to_str()?;
        let name = file_name.strip_suffix(self.input_ext.as_str())?;
        if name.is_empty() {
            return None;
        }

        let dir = input_path.parent().unwrap_or_else(|| Path::new(""));
        Some(FixtureCase {
            name: name.to_string(),
            input_path: input_path.to_path_buf(),
            expected_path: dir.join(format!("{}{}", name, self.expected_ext)),
            actual_path: dir.join(format!("{}{}", name, self.actual_ext)),
        })
    }
}

/// One regression test unit, derived from a `<name>.text` input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCase {
    pub name: String,
    pub input_path: PathBuf,
    pub expected_path: PathBuf,
    pub actual_path: PathBuf,
}

/// Outcome classification of a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    Match,
    Mismatch,
}

impl CaseStatus {
    pub fn is_failure(self) -> bool {
        self == CaseStatus::Mismatch
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseStatus::Match => f.write_str("OK"),
            CaseStatus::Mismatch => f.write_str("Mismatch"),
        }
    }
}

/// Result of evaluating one case.
#[derive(Debug, Clone)]
pub struct FixtureOutcome {
    /// 1-based position of the case within its folder run.
    pub index: usize,
    pub case: FixtureCase,
    pub status: CaseStatus,
    /// Transformer output, kept only long enough to report and persist.
    pub actual_output: String,
    /// The expected file could not be read; the case counts as failed.
    pub expected_missing: bool,
    /// First differing line, for mismatches against an existing expected file.
    pub diff: Option<FileDiff>,
}

/// Aggregate over one folder run.
///
/// Counters only move through [`RunSummary::record`], so
/// `total == passed + failed` holds for every value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    total: usize,
    passed: usize,
    failed: usize,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one evaluated case.
    pub fn record(&mut self, status: CaseStatus) {
        self.total += 1;
        match status {
            CaseStatus::Match => self.passed += 1,
            CaseStatus::Mismatch => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Sum of several folder summaries.
    pub fn merge(&self, other: &RunSummary) -> RunSummary {
        RunSummary {
            total: self.total + other.total,
            passed: self.passed + other.passed,
            failed: self.failed + other.failed,
        }
    }
}

/// Location of the first difference between expected and actual content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub expected_len: usize,
    pub actual_len: usize,
    pub first_diff_line: Option<usize>,
    pub expected_excerpt: Option<String>,
    pub actual_excerpt: Option<String>,
}

impl FileDiff {
    /// Compare two texts; `None` when they are identical.
    ///
    /// `first_diff_line` is `None` only when every line matches and the
    /// difference is confined to line terminators (e.g. a trailing newline).
    pub fn new(expected: &str, actual: &str) -> Option<Self> {
        if expected == actual {
            return None;
        }

        let expected_lines: Vec<&str> = expected.lines().collect();
        let actual_lines: Vec<&str> = actual.lines().collect();

        let mut first_diff_line = None;
        let mut expected_excerpt = None;
        let mut actual_excerpt = None;

        for (i, (e, a)) in expected_lines.iter().zip(actual_lines.iter()).enumerate() {
            if e != a {
                first_diff_line = Some(i + 1);
                expected_excerpt = Some(e.to_string());
                actual_excerpt = Some(a.to_string());
                break;
            }
        }

        // One side has extra lines
        if first_diff_line.is_none() && expected_lines.len() != actual_lines.len() {
            let line = expected_lines.len().min(actual_lines.len()) + 1;
            first_diff_line = Some(line);
            expected_excerpt = expected_lines.get(line - 1).map(|s| s.to_string());
            actual_excerpt = actual_lines.get(line - 1).map(|s| s.to_string());
        }

        Some(Self {
            expected_len: expected.len(),
            actual_len: actual.len(),
            first_diff_line,
            expected_excerpt,
            actual_excerpt,
        })
    }
}
