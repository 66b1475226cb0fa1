use crate::compat::{String, Vec};
use serde_json::Value;

/// A partial update to query state: an ordered set of assignments applied
/// on top of the current query.
///
/// [`set`](Self::set) writes a value, [`clear`](Self::clear) records a
/// null, and a null removes its key from the resulting query. Converting
/// a non-finite float into a [`Value`] yields null, so such a value also
/// clears its key rather than writing unparseable text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    entries: Vec<(String, Value)>,
}

impl Update {
    /// Create an empty update.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Assign a value to a key.
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Remove a key from the resulting query.
    #[must_use]
    pub fn clear(mut self, key: impl Into<String>) -> Self {
        self.entries.push((key.into(), Value::Null));
        self
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the update assigns nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over assignments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl FromIterator<(String, Value)> for Update {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
