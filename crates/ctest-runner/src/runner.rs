//! External test runner invocation
//!
//! Starts `<launcher> <runner> <test-file>` in the foreground, waits for it,
//! and turns the exit status into a [`RunOutcome`]. The child inherits the
//! console; nothing is captured, retried or timed out.

use std::fmt::{self, Display, Formatter};
use std::io::Write;
use std::process::{Command, ExitStatus};

use crate::config::RunnerConfig;
use crate::error::RunnerError;

/// Result of one test run
#[derive(Debug)]
pub enum RunOutcome {
    /// Runner exited with status 0
    Pass,
    /// Runner failed to start or exited unsuccessfully
    Fail(RunnerError),
}

impl RunOutcome {
    /// Check if the run passed
    #[inline]
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Single report line: `CTest PASS` or `CTest FAIL: <detail>`
    #[must_use]
    pub fn report_line(&self) -> String {
        self.to_string()
    }
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "CTest PASS"),
            Self::Fail(err) => write!(f, "CTest FAIL: {err}"),
        }
    }
}

/// Launches the test runner for a single test file
#[derive(Debug, Clone)]
pub struct TestRunner {
    launcher: String,
    runner: String,
}

impl TestRunner {
    /// Create runner from configuration
    #[inline]
    #[must_use]
    pub fn new(config: &RunnerConfig) -> Self {
        Self {
            launcher: config.launcher.clone(),
            runner: config.runner.clone(),
        }
    }

    /// Line announcing the run
    #[must_use]
    pub fn announcement(&self) -> String {
        format!("Running the {} {} command", self.launcher, self.runner)
    }

    /// Run the test file and wait for completion
    ///
    /// The announcement is written to `out` and flushed before the child
    /// starts, so it precedes the child's own output.
    pub fn run(&self, test_path: &str, out: &mut dyn Write) -> RunOutcome {
        if let Err(err) = writeln!(out, "{}", self.announcement()).and_then(|()| out.flush()) {
            tracing::warn!(error = %err, "failed to write run announcement");
        }

        tracing::info!(
            launcher = %self.launcher,
            runner = %self.runner,
            test = %test_path,
            "starting test runner"
        );

        let status = Command::new(&self.launcher)
            .arg(&self.runner)
            .arg(test_path)
            .status();

        let outcome = match status {
            Ok(status) => outcome_from_status(status),
            Err(err) => RunOutcome::Fail(RunnerError::launch(&self.launcher, err)),
        };

        match &outcome {
            RunOutcome::Pass => tracing::info!(test = %test_path, "test runner passed"),
            RunOutcome::Fail(err) => tracing::warn!(test = %test_path, error = %err, "test runner failed"),
        }
        outcome
    }
}

fn outcome_from_status(status: ExitStatus) -> RunOutcome {
    if status.success() {
        return RunOutcome::Pass;
    }
    let err = match (status.code(), signal_of(status)) {
        (Some(code), _) => RunnerError::ExitCode(code),
        (None, Some(signal)) => RunnerError::Signal(signal),
        (None, None) => RunnerError::Terminated,
    };
    RunOutcome::Fail(err)
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> Option<i32> {
    None
}
