//! FILENAME: core/model/src/value.rs
//! PURPOSE: Defines the value/rendered/html triple the query engine produces for one cell.
//! CONTEXT: `Value` is the loosely-typed primitive (or list) a field carries.
//! `FieldValue` wraps it together with the optional display overrides.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The raw value of a field. Mirrors the JSON shapes the host sends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value. Text is parsed leniently (surrounding
    /// whitespace ignored); booleans and lists have no numeric meaning.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the display string of the value.
    pub fn display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::display)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

// Floats hash by bit pattern, NaN collapsed to one bucket.
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Number(n) => {
                if n.is_nan() {
                    u64::MAX.hash(state);
                } else {
                    n.to_bits().hash(state);
                }
            }
            Value::Text(s) => s.hash(state),
            Value::List(items) => items.hash(state),
        }
    }
}

/// One cell as produced by the upstream query engine.
///
/// `rendered` and `html` are optional display overrides of `value`. Which one
/// wins is decided by the renderer that displays the cell.
///
/// `html` is caller-supplied markup and is handed to the paint layer verbatim.
/// Nothing in this workspace escapes or sanitizes it; hosts must pass
/// markup they already trust.
#[derive(Debug, Clone, PartialEq, Default, Hash, Serialize, Deserialize)]
pub struct FieldValue {
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl FieldValue {
    pub fn new(value: impl Into<Value>) -> Self {
        FieldValue {
            value: value.into(),
            rendered: None,
            html: None,
        }
    }

    pub fn with_rendered(mut self, rendered: impl Into<String>) -> Self {
        self.rendered = Some(rendered.into());
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }

    /// `rendered` when present and non-empty, otherwise the stringified value.
    pub fn display_text(&self) -> String {
        match self.rendered.as_deref() {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => self.value.display(),
        }
    }

    /// True when the stringified value is one of `TRUTHY_TOKENS`.
    pub fn is_truthy_token(&self) -> bool {
        let shown = self.value.display();
        TRUTHY_TOKENS.contains(&shown.as_str())
    }
}

/// Values that switch a conditional highlight on.
pub const TRUTHY_TOKENS: [&str; 3] = ["Yes", "true", "1"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_drops_integral_decimals() {
        assert_eq!(Value::Number(42.0).display(), "42");
        assert_eq!(Value::Number(2.5).display(), "2.5");
        assert_eq!(Value::Null.display(), "");
        assert_eq!(Value::Boolean(true).display(), "true");
    }

    #[test]
    fn test_truthy_tokens_are_stringified() {
        assert!(FieldValue::new("Yes").is_truthy_token());
        assert!(FieldValue::new(1.0).is_truthy_token());
        assert!(FieldValue::new(true).is_truthy_token());
        assert!(!FieldValue::new("No").is_truthy_token());
        assert!(!FieldValue::new(0.0).is_truthy_token());
        assert!(!FieldValue::new("yes").is_truthy_token());
    }

    #[test]
    fn test_decode_field_value_shapes() {
        let fv: FieldValue =
            serde_json::from_str(r#"{"value": 12, "rendered": "$12"}"#).unwrap();
        assert_eq!(fv.value, Value::Number(12.0));
        assert_eq!(fv.display_text(), "$12");

        let list: FieldValue = serde_json::from_str(r#"{"value": [1, 2, 3]}"#).unwrap();
        assert_eq!(list.value.as_list().map(|l| l.len()), Some(3));

        let null: FieldValue = serde_json::from_str(r#"{"value": null}"#).unwrap();
        assert!(null.value.is_null());
    }

    #[test]
    fn test_text_parses_as_number() {
        assert_eq!(Value::text(" 3.5 ").as_number(), Some(3.5));
        assert_eq!(Value::text("abc").as_number(), None);
    }
}
