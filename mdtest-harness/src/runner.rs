//! Golden comparison runner.
//!
//! For every `<name>.text` input in a fixture folder the engine output is
//! compared byte-for-byte against `<name>.html`. On mismatch the actual
//! output is written to `<name>.actual.html` so it can be diffed by hand.
//! A stale artifact from an earlier run is always removed before the case
//! is evaluated, so its presence after a run means the case failed in that
//! run.

use std::path::Path;

use mdtest_fs::{Filesystem, FsError};
use thiserror::Error;

use crate::loader::{CaseOrder, FixtureLoader, LoadError};
use crate::logger::{Logger, Verbosity};
use crate::reporter::Reporter;
use crate::transform::{TransformFault, Transformer};
use crate::types::{
    CaseStatus, FileDiff, FixtureCase, FixtureNaming, FixtureOutcome, NamingError, RunSummary,
};

/// Errors that abort a folder run. Mismatches are not errors.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("case {case}: {source}")]
    Transform {
        case: String,
        #[source]
        source: TransformFault,
    },

    #[error("failed to update artifact {}: {source}", .path.display())]
    Artifact {
        path: std::path::PathBuf,
        #[source]
        source: FsError,
    },
}

/// Options for a comparison run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerOptions {
    pub naming: FixtureNaming,
    pub order: CaseOrder,
}

/// Compares engine output against the expected files of fixture folders.
pub struct GoldenRunner<'a, F, R, L>
where
    F: Filesystem,
    R: Reporter,
    L: Logger,
{
    fs: &'a F,
    reporter: &'a R,
    logger: &'a L,
    options: RunnerOptions,
}

impl<'a, F, R, L> GoldenRunner<'a, F, R, L>
where
    F: Filesystem,
    R: Reporter,
    L: Logger,
{
    pub fn new(fs: &'a F, reporter: &'a R, logger: &'a L) -> Self {
        Self {
            fs,
            reporter,
            logger,
            options: RunnerOptions::default(),
        }
    }

    /// Replace the options. Fails if the naming convention could make a run
    /// delete or overwrite inputs or expected files.
    pub fn with_options(mut self, options: RunnerOptions) -> Result<Self, NamingError> {
        options.naming.validate()?;
        self.options = options;
        Ok(self)
    }

    pub fn options(&self) -> &RunnerOptions {
        &self.options
    }

    /// Evaluate every case of one fixture folder.
    ///
    /// Cases are reported as they complete. The summary is reported (and
    /// returned) only if the whole folder ran; a load failure of an input
    /// file, a transformer fault or an artifact write failure aborts the
    /// folder without one.
    pub fn run<T>(&self, dir: &Path, transformer: &T) -> Result<RunSummary, RunError>
    where
        T: Transformer + ?Sized,
    {
        self.reporter.folder_started(dir);

        let loader = FixtureLoader::new(self.fs);
        let cases = loader.discover_cases(dir, &self.options.naming, self.options.order)?;
        if self.logger.enabled(Verbosity::Verbose) {
            self.logger.verbose(&format!(
                "{} case(s) in {}",
                cases.len(),
                dir.display()
            ));
        }

        let mut summary = RunSummary::new();
        for (i, case) in cases.into_iter().enumerate() {
            let outcome = self.evaluate(i + 1, case, &loader, transformer)?;
            summary.record(outcome.status);
            self.reporter.case(&outcome);
        }

        self.reporter.summary(&summary);
        if !summary.all_passed() {
            self.reporter.hint(&self.mismatch_hint(dir));
        }

        Ok(summary)
    }

    /// Run several folders in order, stopping at the first fatal error.
    /// Summaries of folders completed before the error have already been
    /// reported.
    pub fn run_folders<T, P>(
        &self,
        dirs: &[P],
        transformer: &T,
    ) -> Result<Vec<RunSummary>, RunError>
    where
        T: Transformer + ?Sized,
        P: AsRef<Path>,
    {
        dirs.iter()
            .map(|dir| self.run(dir.as_ref(), transformer))
            .collect()
    }

    fn evaluate<T>(
        &self,
        index: usize,
        case: FixtureCase,
        loader: &FixtureLoader<'_, F>,
        transformer: &T,
    ) -> Result<FixtureOutcome, RunError>
    where
        T: Transformer + ?Sized,
    {
        let removed = self
            .fs
            .remove_if_exists(&case.actual_path)
            .map_err(|source| RunError::Artifact {
                path: case.actual_path.clone(),
                source,
            })?;
        if removed && self.logger.enabled(Verbosity::Debug) {
            self.logger.debug(&format!(
                "removed stale artifact {}",
                case.actual_path.display()
            ));
        }

        if self.logger.enabled(Verbosity::Verbose) {
            self.logger.verbose(&format!(
                "case {}: {}",
                case.name,
                case.input_path.display()
            ));
        }
        let input = loader.load(&case.input_path)?;
        let expected = match loader.load(&case.expected_path) {
            Ok(expected) => Some(expected),
            Err(err) => {
                self.logger.info(&format!("{}: counted as failed", err));
                None
            }
        };

        let actual = transformer
            .transform(&input)
            .map_err(|source| RunError::Transform {
                case: case.name.clone(),
                source,
            })?;

        let status = match &expected {
            Some(expected) if *expected == actual => CaseStatus::Match,
            _ => CaseStatus::Mismatch,
        };

        let mut diff = None;
        if status == CaseStatus::Mismatch {
            self.fs
                .write_atomic(&case.actual_path, actual.as_bytes())
                .map_err(|source| RunError::Artifact {
                    path: case.actual_path.clone(),
                    source,
                })?;
            if self.logger.enabled(Verbosity::Debug) {
                self.logger.debug(&format!(
                    "wrote artifact {}",
                    case.actual_path.display()
                ));
            }
            diff = expected.as_deref().and_then(|e| FileDiff::new(e, &actual));
        }

        Ok(FixtureOutcome {
            index,
            case,
            status,
            actual_output: actual,
            expected_missing: expected.is_none(),
            diff,
        })
    }

    fn mismatch_hint(&self, dir: &Path) -> String {
        let naming = &self.options.naming;
        format!(
            "for each mismatch, a *{actual} file was generated in\n{dir}\n\
             to troubleshoot mismatches, use a diff tool on *{expected} and *{actual}",
            actual = naming.actual_ext,
            expected = naming.expected_ext,
            dir = dir.display(),
        )
    }
}
