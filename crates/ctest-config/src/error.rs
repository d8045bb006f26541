//! Error types for the document store
//!
//! Provides error handling for:
//! - Key path parsing and navigation
//! - Document load (file → Document)
//! - Document save (Document → file)

use std::path::PathBuf;

/// Errors related to key paths
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// No segments at all
    #[error("key path is empty")]
    EmptyPath,

    /// Empty segment in path (`a..b`, `.a`, `a.`)
    #[error("key path contains empty segment")]
    EmptySegment,

    /// Intermediate key does not exist
    #[error("key '{segment}' not found under '{path}'")]
    MissingKey { path: String, segment: String },

    /// Value reached while descending is not a mapping
    #[error("'{path}' is a {found}, not a mapping")]
    NotAMapping { path: String, found: &'static str },
}

impl PathError {
    /// Create missing key error
    pub fn missing_key(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self::MissingKey {
            path: path.into(),
            segment: segment.into(),
        }
    }
}

/// Errors during document load and save
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document file does not exist
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// IO error other than a missing file
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not well-formed YAML
    #[error("invalid YAML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Document could not be rendered back to YAML
    #[error("failed to serialize {}: {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Key path could not be navigated
    #[error("path error: {0}")]
    Path(#[from] PathError),
}

impl StoreError {
    /// Create IO error for path, mapping `NotFound` to its own variant
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Create parse error for path
    pub fn parse_error(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
