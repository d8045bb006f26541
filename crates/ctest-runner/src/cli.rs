//! Command-line surface
//!
//! ```text
//! ctest-runner <config-file-name> <dot.separated.path> <new-value> <test-file-path>
//! ```
//!
//! All four positionals are required. Missing ones produce a usage error
//! and a non-zero exit before any file is touched. Anything after the
//! fourth is accepted and ignored.

use clap::{Arg, ArgMatches, Command};

/// Parsed command-line arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Config file name, relative to the config directory
    pub config_file: String,
    /// Dotted key path
    pub key_path: String,
    /// New value as given, before coercion
    pub value: String,
    /// Test file handed to the test runner unchanged
    pub test_file: String,
    /// Trailing arguments past the fourth, ignored
    pub extra: Vec<String>,
}

impl CliArgs {
    /// Extract arguments from matches produced by [`build_cli`]
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
        Self {
            config_file: get("config-file-name"),
            key_path: get("path"),
            value: get("new-value"),
            test_file: get("test-file-path"),
            extra: matches
                .get_many::<String>("extra")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// Parse from an argument iterator (first item is the program name)
    ///
    /// # Errors
    /// Returns clap's usage error on missing or unexpected arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = build_cli().try_get_matches_from(args)?;
        Ok(Self::from_matches(&matches))
    }
}

/// Build the clap command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("ctest-runner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Set one value in a YAML config file, then run a jest test file")
        .arg(
            Arg::new("config-file-name")
                .required(true)
                .help("YAML file name inside the config directory"),
        )
        .arg(
            Arg::new("path")
                .required(true)
                .value_name("dot.separated.path")
                .help("Key path; all but the last segment must be existing mappings"),
        )
        .arg(
            Arg::new("new-value")
                .required(true)
                .allow_hyphen_values(true)
                .help("New value; stored as integer, else float, else string"),
        )
        .arg(
            Arg::new("test-file-path")
                .required(true)
                .allow_hyphen_values(true)
                .help("Test file passed to the test runner"),
        )
        .arg(
            Arg::new("extra")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .hide(true),
        )
}
