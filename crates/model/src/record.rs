use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One card's values, keyed by field identifier.
///
/// Text fields map to their string; image fields map to a file path. Keys
/// with no matching field are tolerated and simply never read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardRecord {
    values: BTreeMap<String, String>,
}

impl CardRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// The value for `field_id`, or `""` when unset.
    pub fn get(&self, field_id: &str) -> &str {
        self.values.get(field_id).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.values.contains_key(field_id)
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(field_id.into(), value.into());
    }

    pub fn with(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field_id, value);
        self
    }

    pub fn remove(&mut self, field_id: &str) -> Option<String> {
        self.values.remove(field_id)
    }

    pub(crate) fn rename_key(&mut self, from: &str, to: &str) {
        if let Some(value) = self.values.remove(from) {
            self.values.insert(to.to_string(), value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CardRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
