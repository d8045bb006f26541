//! Key paths for addressing values inside a document
//!
//! Provides [`KeyPath`] for dotted addressing of nested mapping keys.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::PathError;

/// Dotted path to a key inside nested mappings
///
/// Every segment but the last names an intermediate mapping; the last
/// segment names the key being read or written.
///
/// # Examples
/// - `feature.enabled` → `["feature", "enabled"]`
/// - `database.pool.max` → `["database", "pool", "max"]`
///
/// Segments are plain mapping keys. `items.0` addresses the key `"0"`,
/// not the first element of a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath(Vec<String>);

impl KeyPath {
    /// Create path from segments
    ///
    /// # Errors
    /// Returns error if there are no segments or any segment is empty
    pub fn new(segments: Vec<String>) -> Result<Self, PathError> {
        if segments.is_empty() {
            return Err(PathError::EmptyPath);
        }
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment);
        }
        Ok(Self(segments))
    }

    /// Get path segments
    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Get number of segments (always at least one)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed path
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments naming the intermediate mappings
    #[inline]
    #[must_use]
    pub fn parent_segments(&self) -> &[String] {
        &self.0[..self.0.len() - 1]
    }

    /// Final segment, the key being set
    #[inline]
    #[must_use]
    pub fn leaf(&self) -> &str {
        &self.0[self.0.len() - 1]
    }

    /// Dotted form of the first `n` segments
    #[must_use]
    pub fn prefix(&self, n: usize) -> String {
        self.0[..n.min(self.0.len())].join(".")
    }

    /// Iterator over segments from root to leaf
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Display for KeyPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PathError::EmptyPath);
        }
        Self::new(s.split('.').map(str::to_string).collect())
    }
}
