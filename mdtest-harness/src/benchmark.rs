//! Fixed-methodology throughput benchmark.
//!
//! Each tier runs the engine a fixed number of times over a fixed sample and
//! reports total and per-iteration time. There is no warm-up, no outlier
//! rejection and no adaptive iteration count. Results are only comparable
//! with earlier runs as long as the samples, the iteration counts and this
//! loop stay exactly as they are: do not change them.

use std::hint::black_box;
use std::path::Path;
use std::time::Duration;

use mdtest_clock::{as_millis_f64, Clock};
use mdtest_fs::Filesystem;
use thiserror::Error;

use crate::loader::{FixtureLoader, LoadError};
use crate::logger::{Logger, Verbosity};
use crate::paths::PathResolver;
use crate::reporter::Reporter;
use crate::transform::{TransformFault, Transformer};

/// A named benchmark scenario: sample file plus iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchmarkTier {
    pub label: &'static str,
    /// Sample path, relative to the harness base directory.
    pub sample_path: &'static str,
    pub iterations: u32,
}

/// Short sample, 1000 iterations.
pub const SHORT_TIER: BenchmarkTier = BenchmarkTier {
    label: "short",
    sample_path: "benchmark/markdown-example-short-1.txt",
    iterations: 1000,
};

/// Medium sample, 500 iterations.
pub const MEDIUM_TIER: BenchmarkTier = BenchmarkTier {
    label: "medium",
    sample_path: "benchmark/markdown-example-medium-1.txt",
    iterations: 500,
};

/// Long sample, 100 iterations.
pub const LONG_TIER: BenchmarkTier = BenchmarkTier {
    label: "long",
    sample_path: "benchmark/markdown-example-long-2.txt",
    iterations: 100,
};

/// The standard suite, in run order.
pub const STANDARD_TIERS: [BenchmarkTier; 3] = [SHORT_TIER, MEDIUM_TIER, LONG_TIER];

/// Look up a standard tier by label.
pub fn tier_by_label(label: &str) -> Option<BenchmarkTier> {
    STANDARD_TIERS.iter().copied().find(|t| t.label == label)
}

/// Errors from a benchmark run. Each aborts the remaining tiers.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("failed to load benchmark sample: {0}")]
    Load(#[from] LoadError),

    #[error("benchmark tier {label}: {source}")]
    Transform {
        label: String,
        #[source]
        source: TransformFault,
    },

    #[error("benchmark tier {0}: iterations must be at least 1")]
    InvalidIterations(String),
}

/// One timing scenario with its content loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkSample {
    label: String,
    content: String,
    iterations: u32,
}

impl BenchmarkSample {
    pub fn new(
        label: impl Into<String>,
        content: impl Into<String>,
        iterations: u32,
    ) -> Result<Self, BenchError> {
        let label = label.into();
        if iterations == 0 {
            return Err(BenchError::InvalidIterations(label));
        }
        Ok(Self {
            label,
            content: content.into(),
            iterations,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Timing of one tier.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub label: String,
    /// Sample length in characters.
    pub input_len: usize,
    pub iterations: u32,
    pub total_elapsed: Duration,
}

impl BenchmarkResult {
    pub fn total_elapsed_millis(&self) -> f64 {
        as_millis_f64(self.total_elapsed)
    }

    pub fn per_iteration_millis(&self) -> f64 {
        self.total_elapsed_millis() / f64::from(self.iterations)
    }
}

/// Runs benchmark tiers against a clock and reports each result.
pub struct BenchmarkRunner<'a, C, R, L>
where
    C: Clock,
    R: Reporter,
    L: Logger,
{
    clock: &'a C,
    reporter: &'a R,
    logger: &'a L,
}

impl<'a, C, R, L> BenchmarkRunner<'a, C, R, L>
where
    C: Clock,
    R: Reporter,
    L: Logger,
{
    pub fn new(clock: &'a C, reporter: &'a R, logger: &'a L) -> Self {
        Self {
            clock,
            reporter,
            logger,
        }
    }

    /// Time `sample.iterations()` sequential transforms, discarding the output.
    pub fn measure<T>(
        &self,
        sample: &BenchmarkSample,
        transformer: &T,
    ) -> Result<BenchmarkResult, TransformFault>
    where
        T: Transformer + ?Sized,
    {
        let start = self.clock.now();
        for _ in 0..sample.iterations {
            black_box(transformer.transform(black_box(&sample.content))?);
        }
        let end = self.clock.now();

        Ok(BenchmarkResult {
            label: sample.label.clone(),
            input_len: sample.content.chars().count(),
            iterations: sample.iterations,
            total_elapsed: end.saturating_sub(start),
        })
    }

    /// Load, measure and report each tier in order.
    ///
    /// Each sample is read once per run. The first failure stops the run;
    /// tiers already reported stay reported.
    pub fn run_tiers<F, T>(
        &self,
        tiers: &[BenchmarkTier],
        resolver: &PathResolver,
        base_hint: Option<&Path>,
        loader: &FixtureLoader<'_, F>,
        transformer: &T,
    ) -> Result<Vec<BenchmarkResult>, BenchError>
    where
        F: Filesystem,
        T: Transformer + ?Sized,
    {
        self.reporter.benchmark_started();

        let mut results = Vec::with_capacity(tiers.len());
        for tier in tiers {
            let path = resolver.resolve(base_hint, tier.sample_path);
            if self.logger.enabled(Verbosity::Verbose) {
                self.logger.verbose(&format!(
                    "benchmark {}: {} x {}",
                    tier.label,
                    path.display(),
                    tier.iterations
                ));
            }

            let content = loader.load(&path)?;
            let sample = BenchmarkSample::new(tier.label, content, tier.iterations)?;
            let result =
                self.measure(&sample, transformer)
                    .map_err(|source| BenchError::Transform {
                        label: tier.label.to_string(),
                        source,
                    })?;

            self.reporter.benchmark(&result);
            results.push(result);
        }

        Ok(results)
    }

    /// Run the three standard tiers.
    pub fn run_standard_suite<F, T>(
        &self,
        resolver: &PathResolver,
        base_hint: Option<&Path>,
        loader: &FixtureLoader<'_, F>,
        transformer: &T,
    ) -> Result<Vec<BenchmarkResult>, BenchError>
    where
        F: Filesystem,
        T: Transformer + ?Sized,
    {
        self.run_tiers(&STANDARD_TIERS, resolver, base_hint, loader, transformer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::NullLogger;
    use crate::reporter::RecordingReporter;
    use crate::transform::Identity;
    use mdtest_clock::{AdvancingClock, MockClock};
    use mdtest_fs::MockFilesystem;
    use std::cell::Cell;

    /// Counts calls and otherwise behaves like `Identity`.
    #[derive(Default)]
    struct CountingTransformer {
        calls: Cell<usize>,
    }

    impl Transformer for CountingTransformer {
        fn transform(&self, input: &str) -> Result<String, TransformFault> {
            self.calls.set(self.calls.get() + 1);
            Ok(input.to_string())
        }
    }

    /// Simulates work by reading (and thereby advancing) a shared clock.
    struct ClockBurner<'a> {
        clock: &'a AdvancingClock,
    }

    impl Transformer for ClockBurner<'_> {
        fn transform(&self, input: &str) -> Result<String, TransformFault> {
            self.clock.now();
            Ok(input.to_string())
        }
    }

    struct FailsOnThirdCall {
        calls: Cell<usize>,
    }

    impl Transformer for FailsOnThirdCall {
        fn transform(&self, input: &str) -> Result<String, TransformFault> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() == 3 {
                return Err(TransformFault::new("unbalanced emphasis"));
            }
            Ok(input.to_string())
        }
    }

    fn sample_fs() -> MockFilesystem {
        let fs = MockFilesystem::new();
        for tier in STANDARD_TIERS {
            fs.add_file(
                format!("/base/{}", tier.sample_path),
                format!("# {}\n\nsome *markdown*\n", tier.label),
            );
        }
        fs
    }

    #[test]
    fn test_standard_tier_constants() {
        assert_eq!(STANDARD_TIERS.len(), 3);
        assert_eq!(
            STANDARD_TIERS.map(|t| (t.label, t.iterations)),
            [("short", 1000), ("medium", 500), ("long", 100)]
        );
        assert_eq!(
            LONG_TIER.sample_path,
            "benchmark/markdown-example-long-2.txt"
        );
        assert_eq!(tier_by_label("medium"), Some(MEDIUM_TIER));
        assert_eq!(tier_by_label("huge"), None);
    }

    #[test]
    fn test_sample_rejects_zero_iterations() {
        let result = BenchmarkSample::new("empty", "x", 0);
        assert!(matches!(result, Err(BenchError::InvalidIterations(label)) if label == "empty"));
    }

    #[test]
    fn test_measure_invokes_transformer_exactly_iterations_times() {
        let clock = MockClock::from_millis(10);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
        let counter = CountingTransformer::default();
        let sample = BenchmarkSample::new("short", "a".repeat(100), 1000).unwrap();

        let result = runner.measure(&sample, &counter).unwrap();

        assert_eq!(counter.calls.get(), 1000);
        assert_eq!(result.iterations, 1000);
        assert_eq!(result.input_len, 100);
        assert_eq!(result.total_elapsed, Duration::ZERO);
        assert_eq!(result.per_iteration_millis(), 0.0);
    }

    #[test]
    fn test_measure_identity_with_real_clock_is_near_zero() {
        let clock = mdtest_clock::SystemClock::new();
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
        let sample = BenchmarkSample::new("short", "a".repeat(100), 1000).unwrap();

        let result = runner.measure(&sample, &Identity).unwrap();

        assert!(result.per_iteration_millis() >= 0.0);
        assert!(result.per_iteration_millis() < 1.0);
    }

    #[test]
    fn test_measure_reads_clock_around_loop() {
        let clock = AdvancingClock::new(0, 250);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
        let sample = BenchmarkSample::new("s", "abc", 4).unwrap();

        let result = runner.measure(&sample, &Identity).unwrap();

        assert_eq!(result.total_elapsed, Duration::from_micros(250));
        assert_eq!(result.total_elapsed_millis(), 0.25);
        assert_eq!(result.per_iteration_millis(), 0.0625);
    }

    #[test]
    fn test_elapsed_non_decreasing_in_iterations() {
        let mut previous = Duration::ZERO;
        for iterations in [1, 10, 100, 1000] {
            let clock = AdvancingClock::new(0, 3);
            let reporter = RecordingReporter::new();
            let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
            let burner = ClockBurner { clock: &clock };
            let sample = BenchmarkSample::new("s", "same content", iterations).unwrap();

            let result = runner.measure(&sample, &burner).unwrap();

            assert!(result.per_iteration_millis() >= 0.0);
            assert!(result.total_elapsed >= previous);
            previous = result.total_elapsed;
        }
    }

    #[test]
    fn test_measure_counts_characters_not_bytes() {
        let clock = MockClock::from_millis(0);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
        let sample = BenchmarkSample::new("s", "héllo", 1).unwrap();

        assert_eq!(runner.measure(&sample, &Identity).unwrap().input_len, 5);
    }

    #[test]
    fn test_measure_propagates_fault() {
        let clock = MockClock::from_millis(0);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
        let failing = FailsOnThirdCall {
            calls: Cell::new(0),
        };
        let sample = BenchmarkSample::new("s", "*x", 10).unwrap();

        let err = runner.measure(&sample, &failing).unwrap_err();
        assert_eq!(err.message, "unbalanced emphasis");
        assert_eq!(failing.calls.get(), 3);
    }

    #[test]
    fn test_run_standard_suite_reports_each_tier() {
        let fs = sample_fs();
        let clock = MockClock::from_millis(5);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
        let counter = CountingTransformer::default();

        let results = runner
            .run_standard_suite(
                &PathResolver::with_base("/base"),
                None,
                &FixtureLoader::new(&fs),
                &counter,
            )
            .unwrap();

        assert_eq!(counter.calls.get(), 1000 + 500 + 100);
        assert_eq!(
            results.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
            vec!["short", "medium", "long"]
        );
        assert_eq!(reporter.benchmarks(), results);
        assert_eq!(
            reporter.events().first(),
            Some(&crate::reporter::ReportEvent::BenchmarkStarted)
        );
    }

    #[test]
    fn test_run_tiers_subset_with_hint() {
        let fs = MockFilesystem::new();
        fs.add_file(format!("/corpus/{}", LONG_TIER.sample_path), "long sample");
        let clock = MockClock::from_millis(0);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);

        let results = runner
            .run_tiers(
                &[LONG_TIER],
                &PathResolver::with_base("/base"),
                Some(Path::new("/corpus")),
                &FixtureLoader::new(&fs),
                &Identity,
            )
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].input_len, "long sample".len());
    }

    #[test]
    fn test_run_tiers_missing_sample_aborts_after_reported_tiers() {
        let fs = MockFilesystem::new();
        fs.add_file(format!("/base/{}", SHORT_TIER.sample_path), "short");
        let clock = MockClock::from_millis(0);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);

        let err = runner
            .run_standard_suite(
                &PathResolver::with_base("/base"),
                None,
                &FixtureLoader::new(&fs),
                &Identity,
            )
            .unwrap_err();

        assert!(matches!(err, BenchError::Load(LoadError::Read { .. })));
        // short completed before medium failed to load
        assert_eq!(reporter.benchmarks().len(), 1);
    }

    #[test]
    fn test_run_tiers_transform_fault_names_tier() {
        let fs = sample_fs();
        let clock = MockClock::from_millis(0);
        let reporter = RecordingReporter::new();
        let runner = BenchmarkRunner::new(&clock, &reporter, &NullLogger);
        let failing = FailsOnThirdCall {
            calls: Cell::new(0),
        };

        let err = runner
            .run_standard_suite(
                &PathResolver::with_base("/base"),
                None,
                &FixtureLoader::new(&fs),
                &failing,
            )
            .unwrap_err();

        assert!(err.to_string().contains("benchmark tier short"));
        assert!(reporter.benchmarks().is_empty());
    }
}
