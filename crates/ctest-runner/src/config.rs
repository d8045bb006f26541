//! Runner configuration

use std::path::{Path, PathBuf};

use crate::error::{RunnerError, RunnerResult};

/// Directory config file names are resolved against
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Package-manager launcher used to start the test runner
pub const DEFAULT_LAUNCHER: &str = "npx";

/// Test runner started through the launcher
pub const DEFAULT_RUNNER: &str = "jest";

/// Runner configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Directory holding the YAML config files
    pub config_dir: PathBuf,
    /// Launcher executable
    pub launcher: String,
    /// Test runner passed to the launcher
    pub runner: String,
}

impl RunnerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With config directory
    #[inline]
    #[must_use]
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    /// With launcher executable
    #[inline]
    #[must_use]
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    /// With test runner name
    #[inline]
    #[must_use]
    pub fn with_runner(mut self, runner: impl Into<String>) -> Self {
        self.runner = runner.into();
        self
    }

    /// Resolve a config file name inside the config directory
    ///
    /// # Errors
    /// Returns `RunnerError::AbsoluteConfigPath` if `name` is absolute
    pub fn resolve_config_file(&self, name: impl AsRef<Path>) -> RunnerResult<PathBuf> {
        let name = name.as_ref();
        if name.has_root() {
            return Err(RunnerError::AbsoluteConfigPath {
                config_dir: self.config_dir.clone(),
                name: name.to_path_buf(),
            });
        }
        Ok(self.config_dir.join(name))
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            launcher: DEFAULT_LAUNCHER.to_string(),
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}
