//! Bench command orchestration.

use mdtest_clock::Clock;
use mdtest_fs::Filesystem;
use mdtest_harness::{
    BenchmarkResult, BenchmarkRunner, BenchmarkTier, FixtureLoader, Logger, Reporter, Transformer,
    STANDARD_TIERS,
};

use crate::cli::BenchArgs;

use super::{CommandResult, Session};

/// Result of bench command execution.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchResult {
    pub results: Vec<BenchmarkResult>,
}

/// Execute the bench command.
///
/// Samples are resolved against the base directory. Without `--tier` the
/// three standard tiers run in order.
pub fn execute_bench<F, C, R, L, T>(
    args: &BenchArgs,
    session: &Session,
    fs: &F,
    clock: &C,
    reporter: &R,
    logger: &L,
    transformer: &T,
) -> CommandResult<BenchResult>
where
    F: Filesystem,
    C: Clock,
    R: Reporter,
    L: Logger,
    T: Transformer + ?Sized,
{
    let tiers: Vec<BenchmarkTier> = if args.tiers.is_empty() {
        STANDARD_TIERS.to_vec()
    } else {
        args.tiers.iter().map(|t| t.tier()).collect()
    };

    let loader = FixtureLoader::new(fs);
    let runner = BenchmarkRunner::new(clock, reporter, logger);
    let results = runner.run_tiers(&tiers, &session.resolver, None, &loader, transformer)?;

    Ok(BenchResult { results })
}
