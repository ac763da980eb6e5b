//! Named parameter bag
//!
//! Clause parameters merge into one bag per resolution. Keys are kept in
//! insertion order and a later key overwrites an earlier one in place.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{TemplateError, TemplateResult};

/// Ordered collection of named values bound to a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: IndexMap<String, Value>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bag from any serializable struct or map
    ///
    /// Fails unless `value` serializes to a JSON object or null.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> TemplateResult<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(map.into()),
            Value::Null => Ok(Self::new()),
            other => Err(TemplateError::InvalidParameters {
                message: format!("expected an object of named values, got {}", other),
            }),
        }
    }

    /// Add or overwrite a single value
    pub fn bind<K: Into<String>, V: Into<Value>>(mut self, name: K, value: V) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<K: Into<String>, V: Into<Value>>(&mut self, name: K, value: V) {
        self.values.insert(name.into(), value.into());
    }

    /// Merge every value of `other`, overwriting colliding names
    pub fn merge(&mut self, other: &Parameters) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), value.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convert into a JSON object, e.g. for logging or a JSON-speaking driver
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl From<()> for Parameters {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            values: map.into_iter().collect(),
        }
    }
}

/// Objects become named values and `null` becomes an empty bag. Any other
/// value carries no names, so it is dropped with a warning.
impl From<Value> for Parameters {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => map.into(),
            Value::Null => Self::new(),
            other => {
                tracing::warn!("Ignoring parameter value without names: {}", other);
                Self::new()
            }
        }
    }
}

impl From<Option<Parameters>> for Parameters {
    fn from(value: Option<Parameters>) -> Self {
        value.unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
