use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::format_float;

mod conversion;

/// A single typed configuration value.
///
/// Extraction through the `as_*` accessors is exact: a query for one variant
/// never succeeds on another, so `Value::Int(1).as_float()` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    String(String),
    Bool(bool),
    Float(#[serde(with = "float_repr")] f64),
    Int(i64),
    Json(serde_json::Value),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    pub fn int(i: i64) -> Self {
        Value::Int(i)
    }

    pub fn json(doc: serde_json::Value) -> Self {
        Value::Json(doc)
    }

    /// The canonical "no value": an empty `String`. Same as `Value::default()`.
    pub fn empty() -> Self {
        Value::String(String::new())
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        if let Value::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        if let Value::Float(f) = self {
            Some(*f)
        } else {
            None
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        if let Value::Int(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        if let Value::Json(doc) = self {
            Some(doc)
        } else {
            None
        }
    }

    /// Short lowercase name of the active variant, e.g. `"float"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Float(_) => "float",
            Value::Int(_) => "int",
            Value::Json(_) => "json",
        }
    }

    /// Best-effort text for any variant. This is lossy: the variant is not
    /// recoverable from the result.
    ///
    /// - strings are returned as-is, without quotes
    /// - bools render as `true` / `false`
    /// - ints render in decimal
    /// - floats render as their shortest round-trip decimal, keeping `.0` on
    ///   integral values (`1.0`, `1.5`)
    /// - JSON documents render in compact JSON (`{"a":1}`)
    pub fn to_display_string(&self) -> String {
        self.to_string()
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Float(n) => f.write_str(&format_float(*n)),
            Value::Int(i) => write!(f, "{}", i),
            Value::Json(doc) => write!(f, "{}", doc),
        }
    }
}

/// Serde form of the `Float` payload. JSON has no spelling for `NaN` or the
/// infinities, so those travel as the strings `format_float` produces.
mod float_repr {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::utils::format_float;

    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&format_float(*value))
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(n),
            Repr::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!(
                    "expected a number, \"NaN\", \"inf\" or \"-inf\", got \"{}\"",
                    other
                ))),
            },
        }
    }
}
