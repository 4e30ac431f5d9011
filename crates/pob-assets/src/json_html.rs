//! JSON values embedded in page markup.

use serde_json::Value;

/// Render a data value for inclusion in a page.
///
/// Empty values (`null`, `false`, `0`, `""`) render nothing. Strings are
/// returned as-is; anything else is serialized as compact JSON.
///
/// # Examples
///
/// ```
/// use pob_assets::json_html;
/// use serde_json::json;
///
/// assert_eq!(json_html(&json!("<b>hi</b>")).as_deref(), Some("<b>hi</b>"));
/// assert_eq!(json_html(&json!({"a": 1})).as_deref(), Some(r#"{"a":1}"#));
/// assert_eq!(json_html(&json!(null)), None);
/// ```
pub fn json_html(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
