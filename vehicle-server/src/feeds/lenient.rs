//! Tolerant deserialization helpers for loosely-typed upstream JSON.
//!
//! The transit feeds send the same field as a string in one record and a
//! number in the next, and occasionally include records that are not
//! objects at all. These helpers keep one odd value from rejecting a whole
//! response.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Read a scalar field as a trimmed, non-empty string.
///
/// Strings are taken as-is, numbers and booleans are rendered, and
/// anything else (null, arrays, objects, blank strings) becomes `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

/// The text of a scalar JSON value, by the rules of [`lenient_string`].
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim(),
        Value::Number(n) => return Some(n.to_string()),
        Value::Bool(b) => return Some(b.to_string()),
        _ => return None,
    };

    (!text.is_empty()).then(|| text.to_string())
}

/// A list that drops elements which fail to deserialize.
///
/// A missing or `null` list deserializes as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientVec<T>(pub Vec<T>);

impl<T> Default for LenientVec<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> LenientVec<T> {
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: DeserializeOwned> LenientVec<T> {
    /// Decode each element, dropping the ones that don't fit.
    pub(crate) fn from_values(values: Vec<Value>) -> Self {
        let items = values
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(item) => Some(item),
                Err(e) => {
                    debug!(error = %e, "dropping malformed feed record");
                    None
                }
            })
            .collect();

        Self(items)
    }

    /// Like [`LenientVec::from_values`], but anything other than an array
    /// is empty.
    pub(crate) fn from_any(value: Value) -> Self {
        match value {
            Value::Array(values) => Self::from_values(values),
            Value::Null => Self::default(),
            other => {
                debug!(found = %other, "expected a list, treating as empty");
                Self::default()
            }
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LenientVec<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(Self::from_values(values))
    }
}
