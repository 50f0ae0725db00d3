/// Render a float as its shortest round-trip decimal text.
///
/// Integral values keep a trailing `.0` so they never read like an int.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }

    let text = format!("{}", value);
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

/// Split a dotted key into its first segment and the remainder.
///
/// `"config.item.b"` becomes `("config", Some("item.b"))`.
pub fn split_key(key: &str) -> (&str, Option<&str>) {
    match key.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (key, None),
    }
}
