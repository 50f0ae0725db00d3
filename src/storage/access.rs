// Author: Dustin Pilgrim
// License: MIT

use regex::Regex;

use super::*;
use crate::StorageError;
use crate::utils::split_key;

impl Storage {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// `None` when the key is absent or does not hold a `String`.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// `None` when the key is absent or does not hold a `Float`; an `Int`
    /// value does not count.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_float)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_int)
    }

    pub fn get_json(&self, key: &str) -> Option<&serde_json::Value> {
        self.get(key).and_then(Value::as_json)
    }

    /// Display text of whatever is stored under `key`, or `""` when the key
    /// is absent.
    ///
    /// This is the one lossy accessor: it accepts every variant and renders
    /// it with [`Value::to_display_string`], so a `Float(1.5)` reads back as
    /// `"1.5"` and a missing key is indistinguishable from an empty string.
    ///
    /// # Examples
    /// ```
    /// use cfg_storage::{Storage, Value};
    ///
    /// let storage = Storage::singleton("config.item.b", Value::float(1.5));
    /// assert_eq!(storage.get_string_lossy("config.item.b"), "1.5");
    /// assert_eq!(storage.get_string("config.item.b"), None);
    /// assert_eq!(storage.get_string_lossy("missing"), "");
    /// ```
    pub fn get_string_lossy(&self, key: &str) -> String {
        self.get(key).map(Value::to_display_string).unwrap_or_default()
    }

    /// Get a value converted to `T`, reporting why when it can't be.
    ///
    /// # Examples
    /// ```
    /// use cfg_storage::{Storage, StorageError, Value};
    ///
    /// let storage = Storage::singleton("port", Value::int(8080));
    /// let port: i64 = storage.get_as("port")?;
    /// assert_eq!(port, 8080);
    /// assert!(storage.get_as::<f64>("port").is_err());
    /// # Ok::<(), StorageError>(())
    /// ```
    ///
    /// # Errors
    /// `KeyNotFound` when the key is absent, `TypeError` when the stored
    /// variant does not convert to `T`.
    pub fn get_as<T>(&self, key: &str) -> Result<T, StorageError>
    where
        T: TryFrom<Value, Error = StorageError>,
    {
        let value = self.get(key).cloned().ok_or_else(|| StorageError::KeyNotFound {
            key: key.to_string(),
            hint: Some("Check that one of the combined sources sets this key".into()),
            code: Some(304),
        })?;
        T::try_from(value).map_err(|e| e.with_key(key))
    }

    /// Get a value converted to `T`, or `Ok(None)` when the key is absent.
    ///
    /// A key holding [`Value::empty`] also gives `Ok(None)`.
    ///
    /// # Examples
    /// ```
    /// use cfg_storage::{Storage, StorageError, Value};
    ///
    /// let storage = Storage::singleton("workers", Value::int(4));
    /// assert_eq!(storage.get_optional::<i64>("workers")?, Some(4));
    /// assert_eq!(storage.get_optional::<i64>("threads")?, None);
    /// # Ok::<(), StorageError>(())
    /// ```
    ///
    /// # Errors
    /// `TypeError` when the key is present but does not convert to `T`.
    pub fn get_optional<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        T: TryFrom<Value, Error = StorageError>,
    {
        match self.get_as::<Option<T>>(key) {
            Err(StorageError::KeyNotFound { .. }) => Ok(None),
            other => other,
        }
    }

    /// Get a value converted to `T`, or `default` when it is missing or of
    /// another type.
    pub fn get_or<T>(&self, key: &str, default: T) -> T
    where
        T: TryFrom<Value, Error = StorageError>,
    {
        self.get_as(key).unwrap_or(default)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + DoubleEndedIterator + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Values in the same order as [`Storage::keys`].
    pub fn values(&self) -> impl ExactSizeIterator<Item = &Value> + DoubleEndedIterator + '_ {
        self.entries.values()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.entries.iter() }
    }

    /// All entries as owned pairs, ascending by key.
    pub fn to_list(&self) -> Vec<(String, Value)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Distinct first segments of the dotted keys, ascending.
    ///
    /// `a.x`, `a.y` and `b` give `["a", "b"]`.
    pub fn namespaces(&self) -> Vec<String> {
        let mut heads: Vec<String> = self
            .keys()
            .map(|key| split_key(key).0.to_string())
            .collect();
        // `a-b` sorts between `a` and `a.x`, so heads may not be adjacent
        heads.sort();
        heads.dedup();
        heads
    }

    /// Entries whose key starts with `prefix.`, with that prefix stripped.
    ///
    /// # Examples
    /// ```
    /// use cfg_storage::{Storage, Value};
    ///
    /// let storage = Storage::from_list([
    ///     ("server.host", Value::string("localhost")),
    ///     ("server.tls.enabled", Value::bool(true)),
    ///     ("serverless", Value::bool(false)),
    /// ]);
    /// let server = storage.section("server");
    /// assert_eq!(server.keys().collect::<Vec<_>>(), ["host", "tls.enabled"]);
    /// ```
    pub fn section(&self, prefix: &str) -> Storage {
        let dotted = format!("{}.", prefix);
        let entries = self
            .entries
            .iter()
            .filter_map(|(k, v)| k.strip_prefix(&dotted).map(|rest| (rest.to_string(), v.clone())))
            .collect::<IndexMap<_, _>>();
        // stripping a shared prefix keeps the relative order
        Storage { entries: Arc::new(entries) }
    }

    /// Keep only the entries for which `pred` holds.
    pub fn filter<F>(&self, mut pred: F) -> Storage
    where
        F: FnMut(&str, &Value) -> bool,
    {
        let entries = self
            .entries
            .iter()
            .filter(|(k, v)| pred(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect::<IndexMap<_, _>>();
        Storage { entries: Arc::new(entries) }
    }

    /// Keep only the entries whose key matches the regular expression
    /// `pattern` (unanchored, like [`Regex::is_match`]).
    ///
    /// # Errors
    /// `PatternError` if `pattern` does not compile.
    pub fn filter_keys(&self, pattern: &str) -> Result<Storage, StorageError> {
        let re = Regex::new(pattern).map_err(|e| StorageError::PatternError {
            pattern: pattern.to_string(),
            message: e.to_string(),
            hint: Some("Escape literal dots as \\. and anchor with ^...$ when needed".into()),
            code: Some(460),
        })?;
        Ok(self.filter(|key, _| re.is_match(key)))
    }

    /// Apply `f` to every value, keeping the keys.
    pub fn map_values<F>(&self, mut f: F) -> Storage
    where
        F: FnMut(&str, &Value) -> Value,
    {
        let entries = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), f(k, v)))
            .collect::<IndexMap<_, _>>();
        Storage { entries: Arc::new(entries) }
    }
}
