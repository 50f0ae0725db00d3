use crate::{StorageError, Value};

fn type_error(expected: &str, value: &Value, code: u32) -> StorageError {
    StorageError::TypeError {
        message: format!("Expected {}, got {} ({})", expected, value.type_name(), value),
        key: None,
        hint: Some(format!("Store a {} value under this key", expected)),
        code: Some(code),
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<serde_json::Value> for Value {
    fn from(doc: serde_json::Value) -> Self {
        Value::Json(doc)
    }
}

impl TryFrom<Value> for String {
    type Error = StorageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(type_error("string", &other, 401)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = StorageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(f) => Ok(f),
            other => Err(type_error("float", &other, 402)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = StorageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(type_error("int", &other, 403)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = StorageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::String(ref s)
                if s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false") =>
            {
                Err(StorageError::TypeError {
                    message: format!("Expected bool, got the string '{}'", s),
                    key: None,
                    hint: Some("Store Value::Bool instead of its text form".into()),
                    code: Some(404),
                })
            }
            other => Err(type_error("bool", &other, 404)),
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = StorageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Json(doc) => Ok(doc),
            other => Err(type_error("json", &other, 405)),
        }
    }
}

/// The empty value converts to `None`; anything else must convert to `T`.
impl<T> TryFrom<Value> for Option<T>
where
    T: TryFrom<Value, Error = StorageError>,
{
    type Error = StorageError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(ref s) if s.is_empty() => Ok(None),
            v => Ok(Some(T::try_from(v)?)),
        }
    }
}
