//! CTest runner
//!
//! Sets one value in a YAML config file, then runs one jest test file
//! against it and reports `CTest PASS` or `CTest FAIL`.
//!
//! # Architecture
//!
//! ```text
//! CliArgs → resolve config file → coerce value → load/set/save → TestRunner → RunOutcome
//! ```
//!
//! Store failures (missing file, bad YAML, unreachable path) abort the run
//! and propagate as errors. A failing or unlaunchable test runner does not;
//! it is reported through [`RunOutcome::Fail`].

use std::io::Write;

use anyhow::Context;
use ctest_config::{update_file, KeyPath, ScalarValue};

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod runner;

pub use cli::{build_cli, CliArgs};
pub use config::RunnerConfig;
pub use error::{RunnerError, RunnerResult};
pub use runner::{RunOutcome, TestRunner};

/// Update the config file, then run the test file
///
/// The run announcement is written to `out`.
///
/// # Errors
/// Returns error if the config file cannot be resolved, loaded, navigated
/// or saved. Test runner failures are returned as `Ok(RunOutcome::Fail(_))`.
pub fn run(config: &RunnerConfig, args: &CliArgs, out: &mut dyn Write) -> anyhow::Result<RunOutcome> {
    if !args.extra.is_empty() {
        tracing::warn!(extra = ?args.extra, "ignoring arguments past the test file");
    }
    let file = config.resolve_config_file(&args.config_file)?;
    let key_path: KeyPath = args
        .key_path
        .parse()
        .with_context(|| format!("invalid key path '{}'", args.key_path))?;

    let value = ScalarValue::coerce(&args.value);
    tracing::debug!(raw = %args.value, kind = value.kind(), coerced = %value, "coerced value");

    let previous = update_file(&file, &key_path, value.into_yaml())
        .with_context(|| format!("failed to update {} at '{key_path}'", file.display()))?;
    tracing::info!(
        file = %file.display(),
        path = %key_path,
        created = previous.is_none(),
        "config updated"
    );

    Ok(TestRunner::new(config).run(&args.test_file, out))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use ctest_config::{Document, StoreError, Value};
    use std::fs;
    use tempfile::TempDir;

    fn setup(yaml: &str) -> (TempDir, RunnerConfig) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("settings.yaml"), yaml).unwrap();
        let config = RunnerConfig::new().with_config_dir(dir.path()).with_launcher("true");
        (dir, config)
    }

    fn args(path: &str, value: &str) -> CliArgs {
        CliArgs {
            config_file: "settings.yaml".into(),
            key_path: path.into(),
            value: value.into(),
            test_file: "feature.test.js".into(),
            extra: Vec::new(),
        }
    }

    #[test]
    fn run_updates_then_passes() {
        let (dir, config) = setup("feature:\n  enabled: false\n  limit: 10\n");

        let outcome = run(&config, &args("feature.limit", "42"), &mut Vec::new()).unwrap();

        assert!(outcome.is_pass());
        let doc = Document::load(dir.path().join("settings.yaml")).unwrap();
        assert_eq!(
            doc.get(&"feature.limit".parse().unwrap()),
            Some(&Value::Number(42.into()))
        );
    }

    #[test]
    fn runner_failure_is_an_outcome() {
        let (_dir, config) = setup("a: 1\n");
        let config = config.with_launcher("false");

        let outcome = run(&config, &args("a", "2"), &mut Vec::new()).unwrap();

        assert_eq!(outcome.report_line(), "CTest FAIL: exit status 1");
    }

    #[test]
    fn path_error_propagates_before_running() {
        let (dir, config) = setup("a: 1\n");
        let mut out = Vec::new();

        let err = run(&config, &args("a.b", "2"), &mut out).unwrap_err();

        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::Path(_))));
        assert!(out.is_empty());
        assert_eq!(fs::read_to_string(dir.path().join("settings.yaml")).unwrap(), "a: 1\n");
    }

    #[test]
    fn missing_config_file_propagates() {
        let (_dir, config) = setup("a: 1\n");
        let mut a = args("a", "2");
        a.config_file = "absent.yaml".into();

        let err = run(&config, &a, &mut Vec::new()).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound { .. })));
    }

    #[test]
    fn invalid_key_path_propagates() {
        let (_dir, config) = setup("a: 1\n");
        let err = run(&config, &args("a..b", "2"), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("invalid key path"));
    }
}
