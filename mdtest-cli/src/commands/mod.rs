//! Command orchestration for CLI subcommands.
//!
//! Provides execute functions for:
//! - `compare` - Golden comparison over fixture folders
//! - `bench` - Standard benchmark
//! - `run` - Compare then bench

pub mod bench;
pub mod compare;
pub mod run;

pub use bench::{execute_bench, BenchResult};
pub use compare::{execute_compare, CompareResult};
pub use run::{execute_run, RunResult};

use std::path::Path;

use mdtest_clock::Clock;
use mdtest_fs::Filesystem;
use mdtest_harness::{
    load_config, load_config_or_default, BenchError, ConfigError, HarnessConfig, Logger,
    NamingError, PathError, PathResolver, Reporter, RunError, CONFIG_FILE_NAME,
};
use thiserror::Error;

use crate::cli::{Cli, Command};

/// Errors from command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Path(#[from] PathError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid fixture naming: {0}")]
    Naming(#[from] NamingError),

    #[error("comparison aborted: {0}")]
    Run(#[from] RunError),

    #[error("benchmark aborted: {0}")]
    Bench(#[from] BenchError),

    #[error("no fixture folders given and none configured")]
    NoFolders,
}

/// Result of command execution.
pub type CommandResult<T> = Result<T, CommandError>;

/// Base directory and configuration shared by all commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub resolver: PathResolver,
    pub config: HarnessConfig,
}

impl Session {
    /// Resolve the base directory and load the config.
    ///
    /// An explicit config file must exist; the default `mdtest.json` under
    /// the base directory is optional.
    pub fn prepare<F: Filesystem, L: Logger>(
        fs: &F,
        logger: &L,
        root: Option<&Path>,
        config: Option<&Path>,
    ) -> CommandResult<Self> {
        let resolver = match root {
            Some(root) => PathResolver::with_base(root),
            None => PathResolver::from_current_exe()?,
        };
        logger.verbose(&format!("base directory {}", resolver.base().display()));

        let config = match config {
            Some(path) => {
                let path = resolver.resolve(None, path);
                logger.verbose(&format!("config {}", path.display()));
                load_config(fs, &path)?
            }
            None => load_config_or_default(fs, &resolver.resolve(None, CONFIG_FILE_NAME))?,
        };

        Ok(Self { resolver, config })
    }
}

/// What a completed command produced.
#[derive(Debug)]
pub enum CommandOutcome {
    Compare(CompareResult),
    Bench(BenchResult),
    Run(RunResult),
}

impl CommandOutcome {
    /// False if any compared case mismatched.
    pub fn all_passed(&self) -> bool {
        match self {
            CommandOutcome::Compare(result) => result.all_passed(),
            CommandOutcome::Bench(_) => true,
            CommandOutcome::Run(result) => result.compare.all_passed(),
        }
    }
}

/// Execute the parsed command line.
///
/// This is the main entry point shared by the binary and the tests.
pub fn execute<F, C, R, L>(
    cli: &Cli,
    fs: &F,
    clock: &C,
    reporter: &R,
    logger: &L,
) -> CommandResult<CommandOutcome>
where
    F: Filesystem,
    C: Clock,
    R: Reporter,
    L: Logger,
{
    let session = Session::prepare(fs, logger, cli.root.as_deref(), cli.config.as_deref())?;
    let engine = cli.engine.build();
    logger.verbose(&format!("engine {:?}", cli.engine));

    let outcome = match &cli.command {
        Command::Compare(args) => CommandOutcome::Compare(execute_compare(
            args, &session, fs, reporter, logger, &engine,
        )?),
        Command::Bench(args) => CommandOutcome::Bench(execute_bench(
            args, &session, fs, clock, reporter, logger, &engine,
        )?),
        Command::Run(args) => CommandOutcome::Run(execute_run(
            args, &session, fs, clock, reporter, logger, &engine,
        )?),
    };

    Ok(outcome)
}
