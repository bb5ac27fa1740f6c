//! Raw record access for the upstream feeds.
//!
//! ## Observed shape
//!
//! Both feeds return a JSON array of flat objects. Field presence varies per
//! record and values are loosely typed:
//!
//! - Text fields (`nome`, `estilo`, `servicoN`) are strings, `null`, or absent.
//! - `volumeN` is usually a label like `"500ml"` but some stores send a bare
//!   number of millilitres.
//! - `precoN` is a number (`12.5`) or a string (`"12,50"`).
//! - `abv`/`ibu` follow the same number-or-string pattern. They are read as
//!   numbers only: text that does not parse as a finite number (`"5.5%"`,
//!   `"NaN"`) is dropped rather than passed through.
//! - `valorese` (menu feed) is a *string* holding a JSON-encoded array of
//!   `{"valor": <number>, ...}` objects.
//!
//! A value counts as populated when it is a non-empty string or a non-zero
//! number; `null`, `""`, `0`, booleans and absent keys are all "missing".

use serde_json::{Map, Value};

use taplist_core::FeedScalar;

/// One object from a feed's top-level array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedRecord(Map<String, Value>);

impl FeedRecord {
    /// Wraps `value` if it is a JSON object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Populated string value of `key`. Numbers are rendered as text.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) if is_nonzero(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Numeric value of `key`, reading numeric strings as well.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.scalar_any(key).and_then(|s| s.as_f64())
    }

    /// Populated scalar value of `key`, kept in its original type.
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<FeedScalar> {
        match self.0.get(key)? {
            Value::Number(n) if is_nonzero(n) => n.as_f64().map(FeedScalar::Number),
            Value::String(s) if !s.trim().is_empty() => Some(FeedScalar::Text(s.clone())),
            _ => None,
        }
    }

    /// Like [`Self::scalar`] but keeps zero.
    fn scalar_any(&self, key: &str) -> Option<FeedScalar> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64().map(FeedScalar::Number),
            Value::String(s) if !s.trim().is_empty() => Some(FeedScalar::Text(s.clone())),
            _ => None,
        }
    }
}

fn is_nonzero(n: &serde_json::Number) -> bool {
    n.as_f64().is_some_and(|v| v != 0.0)
}
