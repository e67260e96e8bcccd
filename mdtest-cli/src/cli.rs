//! CLI argument parsing for mdtest.
//!
//! Provides the `compare`, `bench` and `run` subcommands. Global options
//! (base directory, config file, verbosity, engine) may appear before or
//! after the subcommand.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use mdtest_harness::benchmark::{BenchmarkTier, LONG_TIER, MEDIUM_TIER, SHORT_TIER};

use crate::engine::EngineKind;

/// Golden-master regression runs and benchmarks for a Markdown engine.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "mdtest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base directory for fixture folders and benchmark samples.
    /// Defaults to the directory of the executable.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file. Defaults to `mdtest.json` in the base directory, if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output (-v, -vv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Engine under test.
    #[arg(long, value_enum, default_value_t = EngineKind::Cmark, global = true)]
    pub engine: EngineKind,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compare engine output against expected HTML.
    Compare(CompareArgs),
    /// Run the standard benchmark.
    Bench(BenchArgs),
    /// Compare, then benchmark.
    Run(RunArgs),
}

/// Arguments for the compare command.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareArgs {
    /// Fixture folders, relative to the base directory unless absolute.
    /// Defaults to the configured folders.
    pub folders: Vec<PathBuf>,

    /// Evaluate cases in directory enumeration order instead of by name.
    #[arg(long)]
    pub unsorted: bool,
}

/// Benchmark tier selectable with `--tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Short,
    Medium,
    Long,
}

impl TierArg {
    pub fn tier(self) -> BenchmarkTier {
        match self {
            TierArg::Short => SHORT_TIER,
            TierArg::Medium => MEDIUM_TIER,
            TierArg::Long => LONG_TIER,
        }
    }
}

/// Arguments for the bench command.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
pub struct BenchArgs {
    /// Run only the given tier (repeatable). All tiers by default.
    #[arg(long = "tier", value_enum)]
    pub tiers: Vec<TierArg>,
}

/// Arguments for the run command (compare then bench).
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Fixture folders, relative to the base directory unless absolute.
    pub folders: Vec<PathBuf>,

    /// Evaluate cases in directory enumeration order instead of by name.
    #[arg(long)]
    pub unsorted: bool,
}

impl RunArgs {
    /// Convert to CompareArgs for the compare phase.
    pub fn to_compare_args(&self) -> CompareArgs {
        CompareArgs {
            folders: self.folders.clone(),
            unsorted: self.unsorted,
        }
    }

    /// The bench phase always runs the full standard suite.
    pub fn to_bench_args(&self) -> BenchArgs {
        BenchArgs::default()
    }
}

/// Parse CLI arguments from an iterator of strings.
/// Useful for testing.
pub fn parse_from<I, T>(iter: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(iter)
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- compare ---

    #[test]
    fn test_compare_defaults() {
        let cli = parse_from(["mdtest", "compare"]).expect("parse");
        assert_eq!(cli.command, Command::Compare(CompareArgs::default()));
        assert_eq!(cli.root, None);
        assert_eq!(cli.config, None);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.engine, EngineKind::Cmark);
    }

    #[test]
    fn test_compare_with_folders() {
        let cli = parse_from(["mdtest", "compare", "mdtest-1.1", "/srv/extra", "--unsorted"])
            .expect("parse");
        match cli.command {
            Command::Compare(args) => {
                assert_eq!(
                    args.folders,
                    vec![PathBuf::from("mdtest-1.1"), PathBuf::from("/srv/extra")]
                );
                assert!(args.unsorted);
            }
            _ => panic!("expected Compare"),
        }
    }

    // --- bench ---

    #[test]
    fn test_bench_all_tiers_by_default() {
        let cli = parse_from(["mdtest", "bench"]).expect("parse");
        assert_eq!(cli.command, Command::Bench(BenchArgs::default()));
    }

    #[test]
    fn test_bench_selected_tiers() {
        let cli = parse_from(["mdtest", "bench", "--tier", "long", "--tier", "short"])
            .expect("parse");
        match cli.command {
            Command::Bench(args) => {
                assert_eq!(args.tiers, vec![TierArg::Long, TierArg::Short]);
                assert_eq!(args.tiers[0].tier().iterations, 100);
                assert_eq!(args.tiers[1].tier().iterations, 1000);
            }
            _ => panic!("expected Bench"),
        }
    }

    #[test]
    fn test_bench_unknown_tier() {
        let result = parse_from(["mdtest", "bench", "--tier", "huge"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_tier_arg_mapping() {
        assert_eq!(TierArg::Short.tier(), SHORT_TIER);
        assert_eq!(TierArg::Medium.tier().iterations, 500);
        assert_eq!(
            TierArg::Long.tier().sample_path,
            "benchmark/markdown-example-long-2.txt"
        );
    }

    // --- run ---

    #[test]
    fn test_run_conversions() {
        let cli = parse_from(["mdtest", "run", "test-input", "--unsorted"]).expect("parse");
        match cli.command {
            Command::Run(args) => {
                let compare = args.to_compare_args();
                assert_eq!(compare.folders, vec![PathBuf::from("test-input")]);
                assert!(compare.unsorted);
                assert!(args.to_bench_args().tiers.is_empty());
            }
            _ => panic!("expected Run"),
        }
    }

    // --- global options ---

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse_from([
            "mdtest", "compare", "--root", "/work", "-vv", "--engine", "identity",
        ])
        .expect("parse");
        assert_eq!(cli.root, Some(PathBuf::from("/work")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.engine, EngineKind::Identity);
    }

    #[test]
    fn test_global_options_before_subcommand() {
        let cli = parse_from(["mdtest", "--config", "ci.json", "-v", "bench"]).expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("ci.json")));
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn test_unknown_engine() {
        assert!(parse_from(["mdtest", "--engine", "markdig", "compare"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(parse_from(["mdtest"]).is_err());
    }
}
