//! Ordered YAML document
//!
//! Loads a YAML file into a tree whose mappings remember insertion order,
//! updates one key by [`KeyPath`], and writes it back in that same order.
//!
//! `serde_yaml::Mapping` is backed by an insertion-ordered map, and its
//! serializer walks entries in that order. Replacing an existing key keeps
//! its position; a new key is appended after the existing ones.
//!
//! # Example
//!
//! ```
//! use ctest_config::{Document, KeyPath, ScalarValue};
//!
//! let mut doc = Document::from_yaml_str("feature:\n  enabled: false\n  limit: 10\n").unwrap();
//! let path: KeyPath = "feature.limit".parse().unwrap();
//! doc.set(&path, ScalarValue::coerce("20").into_yaml()).unwrap();
//! assert_eq!(doc.to_yaml_string().unwrap(), "feature:\n  enabled: false\n  limit: 20\n");
//! ```

use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::error::{PathError, StoreError, StoreResult};
use crate::path::KeyPath;

const MERGE_KEY: &str = "<<";

/// In-memory YAML document with key order preserved
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    /// Create from an existing YAML tree
    #[inline]
    #[must_use]
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// Parse from YAML text
    ///
    /// Empty text yields a null root. Streams with more than one document
    /// are rejected. Merge keys (`<<: *anchor`) are flattened into the
    /// mapping that holds them: inherited keys come first, own keys
    /// override their values, and nothing else moves.
    ///
    /// # Errors
    /// Returns error if the text is not well-formed YAML, or a `<<` value is
    /// not a mapping or a sequence of mappings
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::new(Value::Null));
        }
        let mut root: Value = serde_yaml::from_str(text)?;
        flatten_merges(&mut root)?;
        Ok(Self::new(root))
    }

    /// Load from a file
    ///
    /// # Errors
    /// - `StoreError::NotFound` if the file does not exist
    /// - `StoreError::Io` if the file cannot be read
    /// - `StoreError::Parse` if the content is not well-formed YAML
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| StoreError::io_error(path, e))?;
        let doc = Self::from_yaml_str(&text).map_err(|e| StoreError::parse_error(path, e))?;
        tracing::info!(path = %path.display(), bytes = text.len(), "loaded config document");
        Ok(doc)
    }

    /// Root node
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Get value at key path
    ///
    /// Returns `None` if any segment is missing or crosses a non-mapping.
    #[must_use]
    pub fn get(&self, path: &KeyPath) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.iter() {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    /// Set value at key path
    ///
    /// Every segment but the last must already resolve to a mapping; missing
    /// levels are never created. The last key is replaced in place if present,
    /// otherwise appended.
    ///
    /// Returns the previous value under the last key, if any.
    ///
    /// # Errors
    /// - `PathError::MissingKey` if an intermediate key is absent
    /// - `PathError::NotAMapping` if the root or an intermediate value is a
    ///   scalar, sequence or null
    pub fn set(&mut self, path: &KeyPath, value: Value) -> Result<Option<Value>, PathError> {
        let mut current = &mut self.root;
        for (depth, segment) in path.parent_segments().iter().enumerate() {
            let map = expect_mapping(current, path, depth)?;
            current = map
                .get_mut(segment.as_str())
                .ok_or_else(|| PathError::missing_key(location(path, depth), segment))?;
        }

        let map = expect_mapping(current, path, path.len() - 1)?;
        let previous = map.insert(Value::String(path.leaf().to_string()), value);
        tracing::debug!(%path, replaced = previous.is_some(), "set config value");
        Ok(previous)
    }

    /// Render as block-style YAML, mappings in insertion order
    ///
    /// # Errors
    /// Returns error if the tree cannot be serialized
    pub fn to_yaml_string(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.root)
    }

    /// Write to a file, replacing its content
    ///
    /// # Errors
    /// - `StoreError::Serialize` if rendering fails
    /// - `StoreError::Io` if the file cannot be written
    pub fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let text = self.to_yaml_string().map_err(|source| StoreError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, &text).map_err(|e| StoreError::io_error(path, e))?;
        tracing::info!(path = %path.display(), bytes = text.len(), "saved config document");
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Value::Mapping(Mapping::new()))
    }
}

/// Load a document from `path`
///
/// # Errors
/// See [`Document::load`]
pub fn load(path: impl AsRef<Path>) -> StoreResult<Document> {
    Document::load(path)
}

/// Set `value` at `path` inside `doc`
///
/// # Errors
/// See [`Document::set`]
pub fn set_by_path(doc: &mut Document, path: &KeyPath, value: Value) -> Result<Option<Value>, PathError> {
    doc.set(path, value)
}

/// Save `doc` to `path`
///
/// # Errors
/// See [`Document::save`]
pub fn save(doc: &Document, path: impl AsRef<Path>) -> StoreResult<()> {
    doc.save(path)
}

/// Load, set one value, save
///
/// The file is only written once the path has been navigated successfully,
/// so a `PathError` leaves it untouched.
///
/// # Errors
/// Any load, path or save error
pub fn update_file(file: impl AsRef<Path>, path: &KeyPath, value: Value) -> StoreResult<Option<Value>> {
    let file = file.as_ref();
    let mut doc = Document::load(file)?;
    let previous = doc.set(path, value)?;
    doc.save(file)?;
    Ok(previous)
}

/// YAML kind name, for diagnostics
#[must_use]
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Resolve `<<` merge keys in place, depth first
///
/// Inherited entries are placed ahead of the mapping's own entries. A key
/// present in both keeps its inherited position and takes the own value.
/// For `<<: [*a, *b]`, earlier sources win over later ones.
fn flatten_merges(value: &mut Value) -> Result<(), serde_yaml::Error> {
    match value {
        Value::Mapping(map) => {
            for child in map.values_mut() {
                flatten_merges(child)?;
            }
            let Some(merge) = map.shift_remove(MERGE_KEY) else {
                return Ok(());
            };
            let sources = match merge {
                Value::Mapping(source) => vec![source],
                Value::Sequence(items) => items
                    .into_iter()
                    .rev()
                    .map(|item| match item {
                        Value::Mapping(source) => Ok(source),
                        other => Err(merge_error(&other)),
                    })
                    .collect::<Result<Vec<_>, _>>()?,
                other => return Err(merge_error(&other)),
            };

            let mut flattened = Mapping::new();
            for (key, inherited) in sources.into_iter().flatten() {
                flattened.insert(key, inherited);
            }
            for (key, own) in std::mem::take(map) {
                flattened.insert(key, own);
            }
            *map = flattened;
        }
        Value::Sequence(items) => {
            for item in items {
                flatten_merges(item)?;
            }
        }
        Value::Tagged(tagged) => flatten_merges(&mut tagged.value)?,
        _ => {}
    }
    Ok(())
}

fn merge_error(found: &Value) -> serde_yaml::Error {
    <serde_yaml::Error as serde::de::Error>::custom(format!(
        "merge key expects a mapping or a sequence of mappings, found {}",
        kind_of(found)
    ))
}

fn expect_mapping<'a>(value: &'a mut Value, path: &KeyPath, depth: usize) -> Result<&'a mut Mapping, PathError> {
    match value {
        Value::Mapping(map) => Ok(map),
        other => Err(PathError::NotAMapping {
            path: location(path, depth),
            found: kind_of(other),
        }),
    }
}

fn location(path: &KeyPath, depth: usize) -> String {
    if depth == 0 {
        "<root>".to_string()
    } else {
        path.prefix(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: &str = "\
name: demo
feature:
  enabled: false
  limit: 10
tags:
- a
- b
zeta: last
";

    fn doc(text: &str) -> Document {
        Document::from_yaml_str(text).unwrap()
    }

    fn key(text: &str) -> KeyPath {
        text.parse().unwrap()
    }

    fn keys(value: &Value) -> Vec<String> {
        value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn round_trip_keeps_text() {
        let d = doc(SETTINGS);
        assert_eq!(d.to_yaml_string().unwrap(), SETTINGS);
    }

    #[test]
    fn round_trip_keeps_unsorted_order() {
        let text = "z: 1\nm: 2\na: 3\n";
        assert_eq!(doc(text).to_yaml_string().unwrap(), text);
    }

    #[test]
    fn get_nested() {
        let d = doc(SETTINGS);
        assert_eq!(d.get(&key("feature.limit")), Some(&Value::Number(10.into())));
        assert_eq!(d.get(&key("name")), Some(&Value::String("demo".into())));
        assert_eq!(d.get(&key("feature.missing")), None);
        assert_eq!(d.get(&key("name.inner")), None);
    }

    #[test]
    fn set_existing_keeps_position() {
        let mut d = doc(SETTINGS);
        let previous = d.set(&key("feature.enabled"), Value::String("true".into())).unwrap();

        assert_eq!(previous, Some(Value::Bool(false)));
        assert_eq!(keys(d.root()), ["name", "feature", "tags", "zeta"]);
        assert_eq!(keys(d.get(&key("feature")).unwrap()), ["enabled", "limit"]);
        assert_eq!(d.get(&key("feature.limit")), Some(&Value::Number(10.into())));
    }

    #[test]
    fn set_new_key_appends() {
        let mut d = doc(SETTINGS);
        let previous = d.set(&key("feature.mode"), Value::String("fast".into())).unwrap();

        assert_eq!(previous, None);
        assert_eq!(keys(d.get(&key("feature")).unwrap()), ["enabled", "limit", "mode"]);
        assert_eq!(keys(d.root()), ["name", "feature", "tags", "zeta"]);
    }

    #[test]
    fn set_top_level_key() {
        let mut d = doc(SETTINGS);
        d.set(&key("name"), Value::String("other".into())).unwrap();
        assert_eq!(d.get(&key("name")), Some(&Value::String("other".into())));
    }

    #[test]
    fn set_twice_is_idempotent() {
        let mut once = doc(SETTINGS);
        once.set(&key("feature.limit"), Value::Number(42.into())).unwrap();

        let mut twice = doc(SETTINGS);
        twice.set(&key("feature.limit"), Value::Number(42.into())).unwrap();
        twice.set(&key("feature.limit"), Value::Number(42.into())).unwrap();

        assert_eq!(once.to_yaml_string().unwrap(), twice.to_yaml_string().unwrap());
    }

    #[test]
    fn set_missing_intermediate_fails() {
        let mut d = doc(SETTINGS);
        let before = d.clone();
        let err = d.set(&key("database.host"), Value::Null).unwrap_err();

        assert_eq!(err, PathError::missing_key("<root>", "database"));
        assert_eq!(d, before);
    }

    #[test]
    fn set_missing_deep_intermediate_reports_prefix() {
        let mut d = doc("a:\n  b:\n    c: 1\n");
        let err = d.set(&key("a.x.y"), Value::Null).unwrap_err();
        assert_eq!(err, PathError::missing_key("a", "x"));
    }

    #[test]
    fn set_through_scalar_fails() {
        let mut d = doc(SETTINGS);
        let err = d.set(&key("feature.limit.max"), Value::Null).unwrap_err();
        assert_eq!(
            err,
            PathError::NotAMapping {
                path: "feature.limit".to_string(),
                found: "number",
            }
        );
    }

    #[test]
    fn set_through_sequence_fails() {
        let mut d = doc(SETTINGS);
        let err = d.set(&key("tags.0"), Value::Null).unwrap_err();
        assert!(matches!(err, PathError::NotAMapping { found: "sequence", .. }));
    }

    #[test]
    fn set_on_empty_document_fails() {
        let mut d = doc("");
        assert_eq!(d.root(), &Value::Null);
        let err = d.set(&key("a"), Value::Null).unwrap_err();
        assert!(matches!(err, PathError::NotAMapping { found: "null", .. }));
    }

    #[test]
    fn multi_document_rejected() {
        assert!(Document::from_yaml_str("a: 1\n---\nb: 2\n").is_err());
    }

    #[test]
    fn set_through_merged_key() {
        let mut d = doc("base: &base\n  db:\n    host: a\nprod:\n  <<: *base\n  name: p\n");
        d.set(&key("prod.db.host"), Value::String("b".into())).unwrap();

        assert_eq!(d.get(&key("prod.db.host")), Some(&Value::String("b".into())));
        assert_eq!(d.get(&key("base.db.host")), Some(&Value::String("a".into())));
        assert_eq!(keys(d.get(&key("prod")).unwrap()), ["db", "name"]);
        assert!(!d.to_yaml_string().unwrap().contains("<<"));
    }

    #[test]
    fn merge_keeps_own_key_order_and_overrides() {
        let d = doc("base: &base\n  a: 1\n  b: 2\nnode:\n  x: 0\n  <<: *base\n  b: 3\n  y: 4\n");
        let node = d.get(&key("node")).unwrap();

        assert_eq!(keys(node), ["a", "b", "x", "y"]);
        assert_eq!(d.get(&key("node.b")), Some(&Value::Number(3.into())));
    }

    #[test]
    fn merge_sequence_earlier_source_wins() {
        let d = doc("one: &one\n  k: 1\ntwo: &two\n  k: 2\n  m: 2\nboth:\n  <<: [*one, *two]\n");
        let both = d.get(&key("both")).unwrap();

        assert_eq!(keys(both), ["k", "m"]);
        assert_eq!(d.get(&key("both.k")), Some(&Value::Number(1.into())));
    }

    #[test]
    fn merge_of_scalar_rejected() {
        assert!(Document::from_yaml_str("a:\n  <<: 5\n").is_err());
    }

    #[test]
    fn duplicate_keys_rejected() {
        assert!(Document::from_yaml_str("a: 1\na: 2\n").is_err());
    }

    #[test]
    fn malformed_rejected() {
        assert!(Document::from_yaml_str("a: [1, 2\n").is_err());
    }

    #[test]
    fn set_by_path_matches_method() {
        let mut a = doc(SETTINGS);
        let mut b = doc(SETTINGS);
        set_by_path(&mut a, &key("zeta"), Value::Number(1.into())).unwrap();
        b.set(&key("zeta"), Value::Number(1.into())).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn default_is_empty_mapping() {
        let mut d = Document::default();
        d.set(&key("x"), Value::Bool(true)).unwrap();
        assert_eq!(d.to_yaml_string().unwrap(), "x: true\n");
    }
}
