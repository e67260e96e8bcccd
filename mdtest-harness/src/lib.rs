//! mdtest Harness
//!
//! Golden-master regression harness and micro-benchmark driver for a
//! Markdown-to-HTML engine.
//!
//! # Overview
//!
//! The harness treats the engine as an opaque [`Transformer`] and:
//!
//! 1. Discovers `<name>.text` inputs in each fixture folder
//! 2. Transforms them and compares the output to `<name>.html` (byte-for-byte)
//! 3. Writes `<name>.actual.html` next to every mismatching case
//! 4. Times the engine over three fixed benchmark samples
//!
//! # Fixtures
//!
//! Fixture folders are resolved against a base directory, by default the
//! directory of the running executable with cargo's `target/<profile>`
//! components removed:
//!
//! - `mdtest-1.1/` - the classic Markdown test suite
//! - `test-input/` - project-specific cases
//! - `benchmark/` - benchmark samples (`markdown-example-*.txt`)

pub mod benchmark;
pub mod config;
pub mod loader;
pub mod logger;
pub mod paths;
pub mod reporter;
pub mod runner;
pub mod transform;
pub mod types;

pub use benchmark::{
    tier_by_label, BenchError, BenchmarkResult, BenchmarkRunner, BenchmarkSample, BenchmarkTier,
    STANDARD_TIERS,
};
pub use config::{load_config, load_config_or_default, ConfigError, HarnessConfig, CONFIG_FILE_NAME};
pub use loader::{CaseOrder, FixtureLoader, LoadError};
pub use logger::{Logger, MockLogger, NullLogger, StderrLogger, Verbosity};
pub use paths::{PathError, PathResolver};
pub use reporter::{ConsoleReporter, NullReporter, RecordingReporter, ReportEvent, Reporter};
pub use runner::{GoldenRunner, RunError, RunnerOptions};
pub use transform::{from_fn, FnTransformer, Identity, TransformFault, Transformer};
pub use types::{
    CaseStatus, FileDiff, FixtureCase, FixtureNaming, FixtureOutcome, NamingError, RunSummary,
};
