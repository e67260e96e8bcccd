//! Exit codes for the mdtest CLI.
//!
//! A run that completes with mismatches exits with [`codes::MISMATCH`] so CI
//! fails; anything that aborts a run gets its own code.

use mdtest_harness::{BenchError, RunError};

use crate::commands::{CommandError, CommandOutcome};

/// Exit code constants.
pub mod codes {
    /// All cases matched (or only benchmarks ran).
    pub const SUCCESS: i32 = 0;
    /// At least one case mismatched.
    pub const MISMATCH: i32 = 1;
    /// Invalid arguments (reported by clap).
    pub const INVALID_ARGS: i32 = 2;
    /// Base directory could not be determined.
    pub const PATH_ERROR: i32 = 3;
    /// Config file unreadable or invalid, unsafe fixture naming, or no
    /// folders to compare.
    pub const CONFIG_ERROR: i32 = 4;
    /// Fixture folder, input file or benchmark sample unreadable.
    pub const FIXTURE_ERROR: i32 = 5;
    /// The engine failed on an input.
    pub const TRANSFORM_ERROR: i32 = 6;
    /// An artifact could not be removed or written.
    pub const ARTIFACT_ERROR: i32 = 7;
}

/// Map a CommandError to an exit code.
pub fn exit_code(error: &CommandError) -> i32 {
    match error {
        CommandError::Path(_) => codes::PATH_ERROR,
        CommandError::Config(_) | CommandError::Naming(_) | CommandError::NoFolders => {
            codes::CONFIG_ERROR
        }
        CommandError::Run(RunError::Load(_)) => codes::FIXTURE_ERROR,
        CommandError::Run(RunError::Transform { .. }) => codes::TRANSFORM_ERROR,
        CommandError::Run(RunError::Artifact { .. }) => codes::ARTIFACT_ERROR,
        CommandError::Bench(BenchError::Load(_)) => codes::FIXTURE_ERROR,
        CommandError::Bench(BenchError::Transform { .. }) => codes::TRANSFORM_ERROR,
        CommandError::Bench(BenchError::InvalidIterations(_)) => codes::CONFIG_ERROR,
    }
}

/// Map a completed command to an exit code.
pub fn outcome_code(outcome: &CommandOutcome) -> i32 {
    if outcome.all_passed() {
        codes::SUCCESS
    } else {
        codes::MISMATCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{BenchResult, CompareResult};
    use mdtest_fs::FsError;
    use mdtest_harness::{
        CaseStatus, ConfigError, LoadError, NamingError, PathError, RunSummary, TransformFault,
    };
    use std::path::PathBuf;

    fn summary(statuses: &[CaseStatus]) -> RunSummary {
        let mut summary = RunSummary::new();
        for status in statuses {
            summary.record(*status);
        }
        summary
    }

    #[test]
    fn test_exit_code_path() {
        let error = CommandError::Path(PathError::NoParent(PathBuf::from("mdtest")));
        assert_eq!(exit_code(&error), codes::PATH_ERROR);
    }

    #[test]
    fn test_exit_code_no_folders() {
        assert_eq!(exit_code(&CommandError::NoFolders), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_exit_code_bad_naming() {
        let clash = NamingError::Clash {
            first: "expected_ext",
            first_ext: ".html".to_string(),
            second: "actual_ext",
            second_ext: ".html".to_string(),
        };
        assert_eq!(
            exit_code(&CommandError::Naming(clash.clone())),
            codes::CONFIG_ERROR
        );

        let error = CommandError::Config(ConfigError::Naming {
            path: PathBuf::from("/work/mdtest.json"),
            source: clash,
        });
        assert_eq!(exit_code(&error), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_exit_code_missing_folder() {
        let error = CommandError::Run(RunError::Load(LoadError::FolderNotFound(PathBuf::from(
            "/work/test-input",
        ))));
        assert_eq!(exit_code(&error), codes::FIXTURE_ERROR);
    }

    #[test]
    fn test_exit_code_transform_fault() {
        let error = CommandError::Run(RunError::Transform {
            case: "Tabs".to_string(),
            source: TransformFault::new("boom"),
        });
        assert_eq!(exit_code(&error), codes::TRANSFORM_ERROR);

        let error = CommandError::Bench(BenchError::Transform {
            label: "short".to_string(),
            source: TransformFault::new("boom"),
        });
        assert_eq!(exit_code(&error), codes::TRANSFORM_ERROR);
    }

    #[test]
    fn test_exit_code_artifact() {
        let error = CommandError::Run(RunError::Artifact {
            path: PathBuf::from("/work/test-input/Tabs.actual.html"),
            source: FsError::Path("read-only".to_string()),
        });
        assert_eq!(exit_code(&error), codes::ARTIFACT_ERROR);
    }

    #[test]
    fn test_outcome_code() {
        let clean = CommandOutcome::Compare(CompareResult {
            folders: vec![(PathBuf::from("a"), summary(&[CaseStatus::Match]))],
        });
        assert_eq!(outcome_code(&clean), codes::SUCCESS);

        let dirty = CommandOutcome::Compare(CompareResult {
            folders: vec![
                (PathBuf::from("a"), summary(&[CaseStatus::Match])),
                (PathBuf::from("b"), summary(&[CaseStatus::Mismatch])),
            ],
        });
        assert_eq!(outcome_code(&dirty), codes::MISMATCH);

        let bench = CommandOutcome::Bench(BenchResult { results: vec![] });
        assert_eq!(outcome_code(&bench), codes::SUCCESS);
    }

    #[test]
    fn test_exit_codes_constants() {
        assert_eq!(codes::SUCCESS, 0);
        assert_eq!(codes::MISMATCH, 1);
        assert_eq!(codes::INVALID_ARGS, 2);
        assert_eq!(codes::PATH_ERROR, 3);
        assert_eq!(codes::CONFIG_ERROR, 4);
        assert_eq!(codes::FIXTURE_ERROR, 5);
        assert_eq!(codes::TRANSFORM_ERROR, 6);
        assert_eq!(codes::ARTIFACT_ERROR, 7);
    }
}
