//! mdtest CLI.
//!
//! This crate provides the command-line interface for the mdtest harness.
//! It handles argument parsing, engine selection and command orchestration.

pub mod cli;
pub mod commands;
pub mod engine;
pub mod exit;

pub use cli::{parse_from, BenchArgs, Cli, Command, CompareArgs, RunArgs, TierArg};
pub use commands::{
    execute, execute_bench, execute_compare, execute_run, BenchResult, CommandError,
    CommandOutcome, CommandResult, CompareResult, RunResult, Session,
};
pub use engine::{CmarkEngine, EngineKind};
