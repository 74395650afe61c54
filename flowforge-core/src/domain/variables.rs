//! Pipeline variable decoding
//!
//! Variables arrive as a single delimited string in the last CSV column.
//! Three formats have been used over time and all of them are still accepted:
//!
//! - `key1=value1:key2=value2` (current)
//! - `key1=value1,key2=value2` (legacy)
//! - `key=value` (single pair, no delimiter)
//!
//! The colon form wins whenever a colon is present, so a comma inside a value
//! survives as long as the string uses colons between pairs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const PRIMARY_DELIMITER: char = ':';
const LEGACY_DELIMITER: char = ',';

/// Variables injected into a triggered pipeline, keyed by name
///
/// Backed by a sorted map so iteration (and therefore every report) is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(BTreeMap<String, String>);

impl Variables {
    /// Creates an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw variable string
    ///
    /// Pairs without an `=` are dropped. Each pair is split on its first `=`
    /// only, and both sides are trimmed.
    pub fn parse(raw: &str) -> Self {
        let mut vars = Self::new();

        if raw.trim().is_empty() {
            return vars;
        }

        if raw.contains(PRIMARY_DELIMITER) {
            vars.extend_pairs(raw.split(PRIMARY_DELIMITER));
        } else if raw.contains(LEGACY_DELIMITER) {
            vars.extend_pairs(raw.split(LEGACY_DELIMITER));
        } else if raw.contains('=') {
            vars.extend_pairs(std::iter::once(raw));
        }

        vars
    }

    fn extend_pairs<'a>(&mut self, pairs: impl Iterator<Item = &'a str>) {
        for pair in pairs {
            if let Some((key, value)) = pair.split_once('=') {
                self.0.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    /// Re-encodes the variables in the current `key=value:key=value` format
    ///
    /// A single pair gets a trailing `:` so that decoding stays on the colon
    /// form even when the value holds a comma.
    pub fn encode(&self) -> String {
        let mut encoded = self
            .0
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(PRIMARY_DELIMITER.to_string().as_str());

        if self.0.len() == 1 {
            encoded.push(PRIMARY_DELIMITER);
        }
        encoded
    }

    /// Inserts or replaces a variable
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates variables in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for Variables {
    /// Human-readable form used by the text report: `a=1, b=2` or `None`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "None");
        }

        let joined = self
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}", joined)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
