// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Value;

mod access;
mod combine;

/// An ordered mapping from string keys to typed [`Value`]s.
///
/// Keys are always kept in ascending order, and every listing or combination
/// walks them in that order. Updating methods take `self` and hand back the
/// new storage; clone first to keep the old one around. Clones are cheap and
/// share their entries until one side is updated.
///
/// # Examples
/// ```
/// use cfg_storage::{Storage, Value};
///
/// let defaults = Storage::from_list([
///     ("server.port", Value::int(8080)),
///     ("server.host", Value::string("localhost")),
/// ]);
/// let overrides = Storage::singleton("server.port", Value::int(9090));
///
/// let settings = overrides.union(&defaults);
/// assert_eq!(settings.get_int("server.port"), Some(9090));
/// assert_eq!(settings.keys().collect::<Vec<_>>(), ["server.host", "server.port"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Storage {
    entries: Arc<IndexMap<String, Value>>,
}

impl Storage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn singleton(key: impl Into<String>, value: Value) -> Self {
        Self::empty().insert(key, value)
    }

    /// Build a storage from `(key, value)` pairs. When a key repeats, the
    /// last pair wins.
    pub fn from_list<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut entries = IndexMap::new();
        for (key, value) in pairs {
            entries.insert(key.into(), value);
        }
        entries.sort_unstable_keys();
        Self { entries: Arc::new(entries) }
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(mut self, key: impl Into<String>, value: Value) -> Self {
        Arc::make_mut(&mut self.entries).insert_sorted(key.into(), value);
        self
    }

    /// Remove `key`. Removing an absent key leaves the storage unchanged.
    pub fn remove(mut self, key: &str) -> Self {
        if self.entries.contains_key(key) {
            Arc::make_mut(&mut self.entries).shift_remove(key);
        }
        self
    }

    /// Recompute the value under `key`.
    ///
    /// `f` receives the current value, or `None` when the key is absent.
    /// Returning `None` removes the key, returning `Some` stores the value.
    pub fn update<F>(self, key: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(Option<Value>) -> Option<Value>,
    {
        let key = key.into();
        let current = self.entries.get(&key).cloned();
        match f(current) {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Storage {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::from_list(iter)
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Storage {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        let entries = Arc::make_mut(&mut self.entries);
        for (key, value) in iter {
            entries.insert_sorted(key.into(), value);
        }
    }
}

/// Iterator over the entries of a [`Storage`] in ascending key order.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: indexmap::map::Iter<'a, String, Value>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, v)| (k.as_str(), v))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Storage {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for Storage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for Storage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = IndexMap::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_list(entries))
    }
}

#[cfg(test)]
mod tests;
