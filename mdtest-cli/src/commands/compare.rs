//! Compare command orchestration.
//!
//! Runs the golden comparison over each fixture folder in turn.

use std::path::PathBuf;

use mdtest_fs::Filesystem;
use mdtest_harness::{CaseOrder, GoldenRunner, Logger, Reporter, RunSummary, Transformer};

use crate::cli::CompareArgs;

use super::{CommandError, CommandResult, Session};

/// Result of compare command execution.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareResult {
    /// Per-folder summaries, in run order.
    pub folders: Vec<(PathBuf, RunSummary)>,
}

impl CompareResult {
    /// Sum over all folders.
    pub fn total(&self) -> RunSummary {
        self.folders
            .iter()
            .fold(RunSummary::new(), |acc, (_, summary)| acc.merge(summary))
    }

    pub fn all_passed(&self) -> bool {
        self.total().all_passed()
    }
}

/// Execute the compare command.
///
/// Folders given on the command line replace the configured ones. The first
/// fatal error stops the command; folders already run keep their reported
/// summaries.
pub fn execute_compare<F, R, L, T>(
    args: &CompareArgs,
    session: &Session,
    fs: &F,
    reporter: &R,
    logger: &L,
    transformer: &T,
) -> CommandResult<CompareResult>
where
    F: Filesystem,
    R: Reporter,
    L: Logger,
    T: Transformer + ?Sized,
{
    let folders = resolve_folders(args, session)?;

    let mut options = session.config.runner_options();
    if args.unsorted {
        options.order = CaseOrder::Enumeration;
    }
    let runner = GoldenRunner::new(fs, reporter, logger).with_options(options)?;

    let summaries = runner.run_folders(&folders, transformer)?;

    Ok(CompareResult {
        folders: folders.into_iter().zip(summaries).collect(),
    })
}

fn resolve_folders(args: &CompareArgs, session: &Session) -> CommandResult<Vec<PathBuf>> {
    let folders: Vec<PathBuf> = if args.folders.is_empty() {
        session.config.folders.iter().map(PathBuf::from).collect()
    } else {
        args.folders.clone()
    };

    if folders.is_empty() {
        return Err(CommandError::NoFolders);
    }

    Ok(folders
        .iter()
        .map(|folder| session.resolver.resolve(None, folder))
        .collect())
}
