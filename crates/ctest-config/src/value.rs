//! Scalar coercion for values supplied as text
//!
//! Command-line values arrive as strings. [`ScalarValue::coerce`] picks the
//! most natural scalar: integer, then float, then the text itself.
//! Booleans, null and dates are never inferred; `true` stays the string
//! `"true"`.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};

use serde_yaml::Value;

/// Scalar produced by [`ScalarValue::coerce`]
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Whole number fitting in `i64`
    Integer(i64),
    /// Any other numeric text, including `inf` and `nan`
    Float(f64),
    /// Text that is not numeric, kept verbatim
    Text(String),
}

impl ScalarValue {
    /// Coerce text to integer, float or text, in that order
    ///
    /// Surrounding whitespace is ignored for the numeric attempts, and `_`
    /// between digits is a separator (`1_000` is 1000). Text that falls
    /// through is kept exactly as given.
    ///
    /// # Examples
    /// ```
    /// # use ctest_config::ScalarValue;
    /// assert_eq!(ScalarValue::coerce("42"), ScalarValue::Integer(42));
    /// assert_eq!(ScalarValue::coerce("3.14"), ScalarValue::Float(3.14));
    /// assert_eq!(ScalarValue::coerce("abc"), ScalarValue::Text("abc".into()));
    /// ```
    #[must_use]
    pub fn coerce(text: &str) -> Self {
        let trimmed = text.trim();
        if let Some(int) = parse_integer(trimmed) {
            return Self::Integer(int);
        }
        if let Some(float) = parse_float(trimmed) {
            return Self::Float(float);
        }
        Self::Text(text.to_string())
    }

    /// Name of the variant, for diagnostics
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "string",
        }
    }

    /// Convert to a YAML node
    #[must_use]
    pub fn into_yaml(self) -> Value {
        match self {
            Self::Integer(int) => Value::Number(int.into()),
            Self::Float(float) => Value::Number(float.into()),
            Self::Text(text) => Value::String(text),
        }
    }
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(int) => write!(f, "{int}"),
            Self::Float(float) => write!(f, "{float}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

impl From<ScalarValue> for Value {
    fn from(scalar: ScalarValue) -> Self {
        scalar.into_yaml()
    }
}

fn parse_integer(text: &str) -> Option<i64> {
    strip_digit_separators(text)?.parse::<i64>().ok()
}

fn parse_float(text: &str) -> Option<f64> {
    if text.is_empty() {
        return None;
    }
    strip_digit_separators(text)?.parse::<f64>().ok()
}

/// Drop `_` separators between digits (`1_000` → `1000`)
///
/// Returns `None` when an underscore is not flanked by digits on both
/// sides, so `_1`, `1_` and `1__0` stay text.
fn strip_digit_separators(text: &str) -> Option<Cow<'_, str>> {
    if !text.contains('_') {
        return Some(Cow::Borrowed(text));
    }
    let bytes = text.as_bytes();
    let flanked = bytes.iter().enumerate().all(|(i, &b)| {
        b != b'_'
            || (i > 0
                && bytes[i - 1].is_ascii_digit()
                && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
    });
    flanked.then(|| Cow::Owned(text.replace('_', "")))
}
