use std::fmt;

/// The error type for the `Result`-returning parts of the storage API.
///
/// Plain lookups never fail: a missing key or a value of the wrong type is
/// reported as `None`. This type is only produced by the typed conversion
/// helpers, key pattern filters and the JSON document bridge.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// A value was present but held a different variant than requested.
    TypeError {
        message: String,
        key: Option<String>,
        hint: Option<String>,
        code: Option<u32>,
    },
    KeyNotFound {
        key: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a key filter pattern is not a valid regular expression.
    PatternError {
        pattern: String,
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
    DocumentError {
        message: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl StorageError {
    /// Numeric code attached to the error, if any.
    pub fn code(&self) -> Option<u32> {
        match self {
            StorageError::TypeError { code, .. }
            | StorageError::KeyNotFound { code, .. }
            | StorageError::PatternError { code, .. }
            | StorageError::DocumentError { code, .. } => *code,
        }
    }

    /// Attach the key a type error was raised for. Other variants pass through.
    pub(crate) fn with_key(self, key: &str) -> Self {
        match self {
            StorageError::TypeError { message, hint, code, .. } => StorageError::TypeError {
                message,
                key: Some(key.to_string()),
                hint,
                code,
            },
            other => other,
        }
    }
}

fn suffix(hint: &Option<String>, code: &Option<u32>) -> String {
    format!(
        "{}{}",
        hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
        code.map_or(String::new(), |c| format!(" Code: {}", c))
    )
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::TypeError { message, key: Some(key), hint, code } =>
                write!(f, "[STORAGE] Type Error at '{}': {}{}", key, message, suffix(hint, code)),
            StorageError::TypeError { message, key: None, hint, code } =>
                write!(f, "[STORAGE] Type Error: {}{}", message, suffix(hint, code)),
            StorageError::KeyNotFound { key, hint, code } =>
                write!(f, "[STORAGE] Key '{}' not found{}", key, suffix(hint, code)),
            StorageError::PatternError { pattern, message, hint, code } =>
                write!(f, "[STORAGE] Invalid key pattern '{}': {}{}", pattern, message, suffix(hint, code)),
            StorageError::DocumentError { message, hint, code } =>
                write!(f, "[STORAGE] Document Error: {}{}", message, suffix(hint, code)),
        }
    }
}

impl std::error::Error for StorageError {}
