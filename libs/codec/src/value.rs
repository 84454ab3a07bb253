//! Component sets: raw (untyped input) and validated.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// An untyped mapping of component key to value, as supplied by callers,
/// table rows or JSON input. Nothing about it has been validated.
pub type RawComponents = BTreeMap<String, Value>;

/// Builds [`RawComponents`] from key/value pairs.
///
/// ```
/// use nomen_codec::raw_components;
///
/// let raw = raw_components([("document_id", "a"), ("tabletype", "b")]);
/// assert_eq!(raw.len(), 2);
/// ```
pub fn raw_components<I, K, V>(pairs: I) -> RawComponents
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The components of one structured name.
///
/// Values are strings or null. Sets built from a mapping are always
/// schema-valid; sets parsed from a name string hold whatever the grammar
/// produced and may be missing trailing keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Components {
    inner: BTreeMap<String, Option<String>>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of `key`, or `None` if it is absent or null.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner.get(key).and_then(|v| v.as_deref())
    }

    /// Returns the slot for `key`: `None` if absent, `Some(None)` if null.
    pub fn slot(&self, key: &str) -> Option<Option<&str>> {
        self.inner.get(key).map(|v| v.as_deref())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) -> Option<Option<String>> {
        self.inner.insert(key.into(), value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Values for `keys`, in that order; absent keys yield `None`.
    pub fn ordered<'a>(&'a self, keys: &'a [&'a str]) -> impl Iterator<Item = Option<&'a str>> + 'a {
        keys.iter().map(move |k| self.get(k))
    }

    /// Converts back to untyped form (strings and nulls).
    pub fn to_raw(&self) -> RawComponents {
        self.inner
            .iter()
            .map(|(k, v)| {
                let value = match v {
                    Some(s) => Value::String(s.clone()),
                    None => Value::Null,
                };
                (k.clone(), value)
            })
            .collect()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for Components
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        }
    }
}
