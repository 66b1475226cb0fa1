use crate::compat::{String, ToString, Vec};
use crate::encoding::{decode_component, encode_component};

/// An ordered list of decoded query parameters.
///
/// Parsing decodes `application/x-www-form-urlencoded` text; serializing
/// re-encodes it. Duplicate keys are preserved in order, so both the
/// WHATWG first-match lookup ([`get`](Self::get)) and the
/// flatten-to-a-map lookup ([`last`](Self::last)) are available.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse a query string, with or without the leading `?`.
    /// Empty segments (`a=1&&b=2`) are skipped; a segment without `=`
    /// becomes a key with an empty value.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        if query.is_empty() {
            return Self::new();
        }
        let pairs = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (
                    decode_component(key).into_owned(),
                    decode_component(value).into_owned(),
                ),
                None => (decode_component(pair).into_owned(), String::new()),
            })
            .collect();
        Self { pairs }
    }

    /// Build from already-decoded pairs, e.g. ones handed over by a host
    /// router or server framework.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Append a pair without touching existing ones.
    pub fn append(&mut self, key: &str, value: &str) {
        self.pairs.push((key.to_string(), value.to_string()));
    }

    /// Get the first value for a key (WHATWG `URLSearchParams` order).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Get the last value for a key. Flattening pairs into a plain map
    /// keeps the final occurrence, and schema evaluation reads through
    /// this accessor.
    pub fn last(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Get all values for a key, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
            .collect()
    }

    /// Check whether a key is present.
    pub fn has(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Set a key to a single value. The first occurrence is replaced in
    /// place, later duplicates are dropped, and a missing key is appended
    /// at the end.
    pub fn set(&mut self, key: &str, value: &str) {
        let mut found_first = false;
        self.pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if found_first {
                return false;
            }
            found_first = true;
            *v = value.to_string();
            true
        });
        if !found_first {
            self.pairs.push((key.to_string(), value.to_string()));
        }
    }

    /// Remove every pair with the given key.
    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check whether the list has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate over keys in order (duplicates included).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(key, _)| key.as_str())
    }

    /// Iterate over values in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(_, value)| value.as_str())
    }

    /// Serialize with a leading `?`, or an empty string when there are no
    /// pairs. Suitable for appending directly to a pathname.
    pub fn serialize(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let mut out = String::from("?");
        out.push_str(&self.to_string());
        out
    }

    /// Serialize without the leading `?`.
    #[allow(clippy::inherent_to_string_shadow_display)]
    pub fn to_string(&self) -> String {
        let mut out = String::new();
        for (index, (key, value)) in self.pairs.iter().enumerate() {
            if index > 0 {
                out.push('&');
            }
            out.push_str(&encode_component(key));
            out.push('=');
            out.push_str(&encode_component(value));
        }
        out
    }
}

impl core::fmt::Display for QueryPairs {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_string())
    }
}

impl From<&str> for QueryPairs {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}

impl From<String> for QueryPairs {
    fn from(query: String) -> Self {
        Self::parse(&query)
    }
}

impl<K, V> FromIterator<(K, V)> for QueryPairs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}
