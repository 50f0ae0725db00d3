// Author: Dustin Pilgrim
// License: MIT

use serde_json::json;

use crate::{Storage, StorageError, Value};

/// Convert a single value to its native JSON form.
///
/// Scalars map directly and `Json` payloads are embedded as-is. Non-finite
/// floats have no JSON form and become `null`.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => json!(s),
        Value::Bool(b) => json!(b),
        Value::Float(f) => json!(f),
        Value::Int(i) => json!(i),
        Value::Json(doc) => doc.clone(),
    }
}

/// Map a JSON scalar or document onto the closest variant.
///
/// Integers that fit in `i64` become `Int`, other numbers `Float`; `null`,
/// arrays and objects are kept whole as `Json`.
pub fn value_from_json(doc: &serde_json::Value) -> Value {
    match doc {
        serde_json::Value::String(s) => Value::String(s.clone()),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            // as_f64 is only None under serde_json's arbitrary_precision feature
            None => n.as_f64().map_or_else(|| Value::Json(doc.clone()), Value::Float),
        },
        other => Value::Json(other.clone()),
    }
}

impl Storage {
    /// Flat JSON object of the storage, keys in ascending order.
    pub fn to_json(&self) -> serde_json::Value {
        let object = self
            .iter()
            .map(|(k, v)| (k.to_string(), value_to_json(v)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(object)
    }

    /// Build a storage from the top-level entries of a JSON object.
    ///
    /// Nested objects are not flattened; they are stored as `Json` values.
    ///
    /// # Examples
    /// ```
    /// use cfg_storage::Storage;
    /// use serde_json::json;
    ///
    /// let storage = Storage::from_json(&json!({"port": 8080, "ratio": 0.5, "tls": {"on": true}}))?;
    /// assert_eq!(storage.get_int("port"), Some(8080));
    /// assert_eq!(storage.get_float("ratio"), Some(0.5));
    /// assert_eq!(storage.get_json("tls"), Some(&json!({"on": true})));
    /// # Ok::<(), cfg_storage::StorageError>(())
    /// ```
    ///
    /// # Errors
    /// `DocumentError` when `doc` is not a JSON object.
    pub fn from_json(doc: &serde_json::Value) -> Result<Storage, StorageError> {
        match doc {
            serde_json::Value::Object(object) => Ok(object
                .iter()
                .map(|(k, v)| (k.as_str(), value_from_json(v)))
                .collect()),
            other => Err(StorageError::DocumentError {
                message: format!("Expected a JSON object at the top level, got {}", json_kind(other)),
                hint: Some("Wrap the settings in an object: {\"key\": value}".into()),
                code: Some(501),
            }),
        }
    }
}

fn json_kind(doc: &serde_json::Value) -> &'static str {
    match doc {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a bool",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Export a storage as pretty-printed JSON text with keys in ascending order.
///
/// # Examples
/// ```
/// use cfg_storage::{Storage, Value, export::export_storage_to_json};
///
/// let storage = Storage::from_list([("b", Value::bool(true)), ("a", Value::int(1))]);
/// let text = export_storage_to_json(&storage)?;
/// assert_eq!(text, "{\n  \"a\": 1,\n  \"b\": true\n}");
/// # Ok::<(), cfg_storage::StorageError>(())
/// ```
///
/// # Errors
/// Returns `DocumentError` if the JSON writer fails.
pub fn export_storage_to_json(storage: &Storage) -> Result<String, StorageError> {
    serde_json::to_string_pretty(&storage.to_json()).map_err(|e| StorageError::DocumentError {
        message: format!("Failed to render JSON: {}", e),
        hint: None,
        code: Some(500),
    })
}
