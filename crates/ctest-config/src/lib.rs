//! CTest config store
//!
//! Order-preserving YAML documents with dotted-path updates.
//!
//! # Core Operations
//!
//! - **Load**: parse a YAML file into a [`Document`]
//! - **Set**: replace or add one value addressed by a [`KeyPath`]
//! - **Save**: write the document back with its original key order
//!
//! # Example
//!
//! ```rust,no_run
//! use ctest_config::{update_file, KeyPath, ScalarValue};
//!
//! # fn example() -> Result<(), ctest_config::StoreError> {
//! let path: KeyPath = "feature.limit".parse()?;
//! update_file("config/settings.yaml", &path, ScalarValue::coerce("20").into_yaml())?;
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod path;
pub mod value;

pub use document::{kind_of, load, save, set_by_path, update_file, Document};
pub use error::{PathError, StoreError, StoreResult};
pub use path::KeyPath;
pub use value::ScalarValue;

/// Re-exported YAML node type
pub use serde_yaml::Value;
