//! Conditional style objects and flattened property maps.

use indexmap::IndexMap;
use serde_json::{Number, Value};

/// A style object: property names and hook names mapped to values, in
/// declaration order. Hook names map to nested style objects.
pub type StyleObject = IndexMap<String, StyleValue>;

/// Result of flattening: no hook keys remain, and every value the
/// stringifier could render is a [`StyleValue::String`].
pub type Properties = IndexMap<String, StyleValue>;

/// A value inside a style object.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<StyleValue>),
    Object(StyleObject),
}

impl StyleValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub const fn as_object(&self) -> Option<&StyleObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Convert a JSON value. Numbers outside `f64` range become `Null`.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Object(entries) => Self::Object(
                entries
                    .into_iter()
                    .map(|(key, entry)| (key, Self::from_json(entry)))
                    .collect(),
            ),
        }
    }

    /// Convert to JSON. Non-finite numbers become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Number(number) => Number::from_f64(*number).map_or(Value::Null, Value::Number),
            Self::String(text) => Value::String(text.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, entry)| (key.clone(), entry.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Convert a JSON object into a style object; `None` if `value` is not an object.
pub fn style_from_json(value: Value) -> Option<StyleObject> {
    match StyleValue::from_json(value) {
        StyleValue::Object(object) => Some(object),
        _ => None,
    }
}

/// Convert a style object or property map into a JSON object.
pub fn style_to_json(object: &StyleObject) -> Value {
    Value::Object(
        object
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json()))
            .collect(),
    )
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<f64> for StyleValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<i32> for StyleValue {
    fn from(number: i32) -> Self {
        Self::Number(f64::from(number))
    }
}

impl From<bool> for StyleValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<StyleObject> for StyleValue {
    fn from(object: StyleObject) -> Self {
        Self::Object(object)
    }
}

impl<Inner: Into<Self>> From<Option<Inner>> for StyleValue {
    fn from(value: Option<Inner>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_from_json_preserving_order() {
        let object = style_from_json(json!({
            "zIndex": 2,
            "color": "red",
            "hover": {"color": "blue"},
            "outline": null
        }))
        .unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zIndex", "color", "hover", "outline"]);
        assert_eq!(object.get("zIndex"), Some(&StyleValue::Number(2.0)));
        assert_eq!(
            object.get("hover").and_then(StyleValue::as_object).and_then(|hover| hover.get("color")),
            Some(&StyleValue::from("blue"))
        );
        assert_eq!(object.get("outline"), Some(&StyleValue::Null));
    }

    #[test]
    fn non_objects_are_not_styles() {
        assert!(style_from_json(json!("red")).is_none());
        assert!(style_from_json(json!([1, 2])).is_none());
    }

    #[test]
    fn back_to_json() {
        let source = json!({"a": "x", "b": 1.5, "c": [true, null], "d": {"e": "f"}});
        let object = style_from_json(source.clone()).unwrap();
        assert_eq!(style_to_json(&object), source);
        assert_eq!(StyleValue::Number(f64::NAN).to_json(), Value::Null);
    }
}
