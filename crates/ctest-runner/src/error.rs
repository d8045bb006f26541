//! Error types for the runner
//!
//! Store failures (load, navigation, save) come from `ctest_config` and
//! propagate unchanged. Errors here cover the parts this crate owns.

use std::path::PathBuf;

/// Runner error type
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Config file name was an absolute path
    #[error("config file must be relative to {}: got {}", config_dir.display(), name.display())]
    AbsoluteConfigPath { config_dir: PathBuf, name: PathBuf },

    /// Test runner process could not be started
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Test runner exited with a non-zero status
    #[error("exit status {0}")]
    ExitCode(i32),

    /// Test runner was terminated without an exit code
    #[error("terminated by signal {0}")]
    Signal(i32),

    /// Test runner ended without exit code or signal
    #[error("terminated abnormally")]
    Terminated,
}

impl RunnerError {
    /// Create launch error for program
    pub fn launch(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Launch {
            program: program.into(),
            source,
        }
    }
}

/// Result type alias for runner operations
pub type RunnerResult<T> = Result<T, RunnerError>;
