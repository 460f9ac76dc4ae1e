//! Stored form values.
//!
//! Each field kind stores exactly one [`FormValue`] shape: textual kinds a
//! string, checkbox groups a list, toggles a boolean. [`FormValues`] is the
//! parent-owned mapping from field name to value.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use idp_forms_core::error::{FormsError, FormsResult, ValueShape};

/// The value stored for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// Text, password, textarea, radio, dropdown, scopes and query parameters.
    Text(String),
    /// Checkbox groups: the selected option values.
    List(Vec<String>),
    /// Toggles.
    Flag(bool),
}

impl FormValue {
    /// Returns the shape of this value.
    pub const fn shape(&self) -> ValueShape {
        match self {
            Self::Text(_) => ValueShape::Text,
            Self::List(_) => ValueShape::List,
            Self::Flag(_) => ValueShape::Flag,
        }
    }

    /// Returns the string if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the selected values if this is a list value.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether a toggle bound to this value renders as checked.
    ///
    /// Only `Flag(true)` and the string `"true"` count as on.
    pub fn is_on(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Text(s) => s == "true",
            Self::List(_) => false,
        }
    }

    /// Whether the value counts as "not filled in" for required checks.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Flag(_) => false,
        }
    }
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::List(items) => write!(f, "{}", items.join(",")),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// The form value mapping, keyed by field name.
///
/// Names are unique: setting a name that already exists replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues {
    values: BTreeMap<String, FormValue>,
}

impl FormValues {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.values.get(name)
    }

    /// Stores `value` under `name`, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Option<FormValue> {
        self.values.insert(name.into(), value.into())
    }

    /// Removes the value stored under `name`.
    pub fn remove(&mut self, name: &str) -> Option<FormValue> {
        self.values.remove(name)
    }

    /// Returns `true` if a value is stored under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns the text stored under `name`, or `""` when absent or not text.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FormValue::as_text).unwrap_or("")
    }

    /// Returns the list stored under `name`, or an empty slice.
    pub fn list(&self, name: &str) -> &[String] {
        self.get(name).and_then(FormValue::as_list).unwrap_or(&[])
    }

    /// Returns whether the toggle stored under `name` is on.
    pub fn is_on(&self, name: &str) -> bool {
        self.get(name).is_some_and(FormValue::is_on)
    }

    /// Returns the text stored under `name`, failing if it has another shape.
    pub fn require_text(&self, name: &str) -> FormsResult<&str> {
        match self.get(name) {
            Some(FormValue::Text(s)) => Ok(s),
            Some(_) => Err(FormsError::ValueShapeMismatch {
                name: name.to_string(),
                expected: ValueShape::Text,
            }),
            None => Err(FormsError::UnknownField(name.to_string())),
        }
    }

    /// Returns the list stored under `name`, failing if it has another shape.
    pub fn require_list(&self, name: &str) -> FormsResult<&[String]> {
        match self.get(name) {
            Some(FormValue::List(items)) => Ok(items),
            Some(_) => Err(FormsError::ValueShapeMismatch {
                name: name.to_string(),
                expected: ValueShape::List,
            }),
            None => Err(FormsError::UnknownField(name.to_string())),
        }
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FormValue)> {
        self.values.iter()
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Serializes the mapping to a JSON object string.
    pub fn to_json(&self) -> FormsResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<(String, FormValue)> for FormValues {
    fn from_iter<T: IntoIterator<Item = (String, FormValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_semantics() {
        assert!(FormValue::Flag(true).is_on());
        assert!(FormValue::from("true").is_on());
        assert!(!FormValue::from("True").is_on());
        assert!(!FormValue::from("1").is_on());
        assert!(!FormValue::Flag(false).is_on());
        assert!(!FormValue::List(vec!["true".into()]).is_on());
    }

    #[test]
    fn test_absent_toggle_is_off() {
        let values = FormValues::new();
        assert!(!values.is_on("enabled"));
    }

    #[test]
    fn test_emptiness() {
        assert!(FormValue::from("").is_empty());
        assert!(FormValue::List(vec![]).is_empty());
        assert!(!FormValue::Flag(false).is_empty());
        assert!(!FormValue::from("x").is_empty());
    }

    #[test]
    fn test_set_overwrites_same_name() {
        let mut values = FormValues::new();
        values.set("client_id", "first");
        let previous = values.set("client_id", "second");
        assert_eq!(previous, Some(FormValue::from("first")));
        assert_eq!(values.text("client_id"), "second");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_typed_accessors() {
        let mut values = FormValues::new();
        values.set("grant_types", vec!["code".to_string()]);
        values.set("name", "app");

        assert_eq!(values.list("grant_types"), ["code".to_string()]);
        assert_eq!(values.text("grant_types"), "");
        assert!(values.require_list("grant_types").is_ok());

        let err = values.require_list("name").unwrap_err();
        assert!(matches!(
            err,
            FormsError::ValueShapeMismatch { expected: ValueShape::List, .. }
        ));
        assert!(matches!(
            values.require_text("missing"),
            Err(FormsError::UnknownField(_))
        ));
    }

    #[test]
    fn test_to_json() {
        let mut values = FormValues::new();
        values.set("b", true);
        values.set("a", "x");
        values.set("c", vec!["1".to_string(), "2".to_string()]);
        assert_eq!(values.to_json().unwrap(), r#"{"a":"x","b":true,"c":["1","2"]}"#);
    }

    #[test]
    fn test_deserialize_untagged() {
        let values: FormValues = serde_json::from_str(r#"{"a":"x","b":false,"c":[]}"#).unwrap();
        assert_eq!(values.get("a"), Some(&FormValue::from("x")));
        assert_eq!(values.get("b"), Some(&FormValue::Flag(false)));
        assert_eq!(values.get("c"), Some(&FormValue::List(vec![])));
    }
}
