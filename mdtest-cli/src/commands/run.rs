//! Run command orchestration.
//!
//! Compares the fixture folders, then runs the standard benchmark.

use mdtest_clock::Clock;
use mdtest_fs::Filesystem;
use mdtest_harness::{Logger, Reporter, Transformer};

use crate::cli::RunArgs;

use super::bench::{execute_bench, BenchResult};
use super::compare::{execute_compare, CompareResult};
use super::{CommandResult, Session};

/// Result of run command execution.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Result from the compare phase.
    pub compare: CompareResult,
    /// Result from the bench phase.
    pub bench: BenchResult,
}

/// Execute the run command.
///
/// The benchmark runs even when cases mismatch; a fatal compare error
/// skips it.
pub fn execute_run<F, C, R, L, T>(
    args: &RunArgs,
    session: &Session,
    fs: &F,
    clock: &C,
    reporter: &R,
    logger: &L,
    transformer: &T,
) -> CommandResult<RunResult>
where
    F: Filesystem,
    C: Clock,
    R: Reporter,
    L: Logger,
    T: Transformer + ?Sized,
{
    let compare = execute_compare(
        &args.to_compare_args(),
        session,
        fs,
        reporter,
        logger,
        transformer,
    )?;

    let bench = execute_bench(
        &args.to_bench_args(),
        session,
        fs,
        clock,
        reporter,
        logger,
        transformer,
    )?;

    Ok(RunResult { compare, bench })
}
