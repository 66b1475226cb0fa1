use crate::compat::{String, ToString, Vec};
use crate::error::{BindError, Result};
use serde_json::{Map, Value};

/// The state produced by schema evaluation: one entry per declared field,
/// in declaration order, each holding a value that satisfies its field.
///
/// Every evaluation builds a fresh state; mutating a copy never leaks back
/// into the query it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundState {
    entries: Vec<(String, Value)>,
}

impl BoundState {
    pub(crate) fn from_entries(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    /// Value for a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Text field accessor.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Number field accessor.
    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// Integer field accessor.
    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    /// Flag field accessor.
    pub fn flag(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    /// Number of fields in the state.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the state has no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The whole state as a JSON object.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// Deserialize the state into a caller-defined type.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Decode`] when the state's shape does not match
    /// `T`.
    pub fn decode<T>(&self) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_value(self.to_value())
            .map_err(|err| BindError::Decode {
                detail: err.to_string(),
            })
    }
}
