//! Field validation.
//!
//! Two checks run per input field: the required check (is the stored value
//! filled in?) and, for textual fields, the caller's custom validation
//! callback. Results accumulate across fields rather than short-circuiting,
//! so every problem is reported at once.

use std::collections::HashMap;

use crate::fields::{FieldKind, FormField};
use crate::value::{FormValue, FormValues};

/// The outcome of custom validation for one field.
///
/// Validation callbacks receive a `Validation` that starts valid and call
/// [`Validation::fail`] for each problem found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    /// Whether the value passed.
    pub is_valid: bool,
    /// Messages to render when it did not.
    pub error_messages: Vec<String>,
}

impl Default for Validation {
    fn default() -> Self {
        Self {
            is_valid: true,
            error_messages: Vec::new(),
        }
    }
}

impl Validation {
    /// Marks the value invalid and records a message.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.is_valid = false;
        self.error_messages.push(message.into());
    }
}

/// Returns `true` if a stored value counts as filled in.
///
/// Absent values and empty strings or lists are not filled; toggles always are.
pub fn is_filled(value: Option<&FormValue>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Validates a single field against the current values.
///
/// Returns whether the required check is satisfied (trivially so for
/// optional fields) and the custom validation result.
pub fn validate_field(field: &FormField, values: &FormValues) -> (bool, Validation) {
    let satisfied = !field.meta.required || is_filled(values.get(&field.name));

    let mut validation = Validation::default();
    match &field.kind {
        FieldKind::Text {
            validation: Some(validate),
            ..
        }
        | FieldKind::Textarea {
            validation: Some(validate),
            ..
        }
        | FieldKind::Password {
            validation: Some(validate),
            ..
        } => (validate.get())(values.text(&field.name), &mut validation, values),
        _ => {}
    }

    (satisfied, validation)
}

/// Validates every input field, recording results per field name.
///
/// Fields that store no value (buttons, dividers, custom elements) are skipped.
pub fn validate_fields(
    fields: &[FormField],
    values: &FormValues,
    required: &mut HashMap<String, bool>,
    valid: &mut HashMap<String, Validation>,
) {
    for field in fields.iter().filter(|f| f.is_input_field()) {
        let (satisfied, validation) = validate_field(field, values);
        if !validation.is_valid {
            tracing::debug!(
                field = %field.name,
                errors = validation.error_messages.len(),
                "field failed validation"
            );
        }
        required.insert(field.name.clone(), satisfied);
        valid.insert(field.name.clone(), validation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn min_length(n: usize) -> impl Fn(&str, &mut Validation, &FormValues) + Send + Sync {
        move |value, validation, _| {
            if value.len() < n {
                validation.fail(format!("Must be at least {n} characters."));
            }
        }
    }

    #[test]
    fn test_is_filled() {
        assert!(!is_filled(None));
        assert!(!is_filled(Some(&FormValue::from(""))));
        assert!(!is_filled(Some(&FormValue::List(vec![]))));
        assert!(is_filled(Some(&FormValue::from("x"))));
        assert!(is_filled(Some(&FormValue::Flag(false))));
    }

    #[test]
    fn test_optional_empty_field_is_satisfied() {
        let field = FormField::text("nickname");
        let (satisfied, validation) = validate_field(&field, &FormValues::new());
        assert!(satisfied);
        assert!(validation.is_valid);
    }

    #[test]
    fn test_required_empty_field_is_unsatisfied() {
        let field = FormField::text("name").required(true);
        let mut values = FormValues::new();
        values.set("name", "");
        assert!(!validate_field(&field, &values).0);
        values.set("name", "console");
        assert!(validate_field(&field, &values).0);
    }

    #[test]
    fn test_custom_validation_runs_for_text_kinds() {
        let field = FormField::password("secret").validation(min_length(8));
        let mut values = FormValues::new();
        values.set("secret", "short");
        let (_, validation) = validate_field(&field, &values);
        assert!(!validation.is_valid);
        assert_eq!(validation.error_messages, vec!["Must be at least 8 characters."]);
    }

    #[test]
    fn test_validation_sees_other_values() {
        let field = FormField::password("confirm").validation(|value, validation, all| {
            if value != all.text("password") {
                validation.fail("Passwords do not match.");
            }
        });
        let mut values = FormValues::new();
        values.set("password", "hunter22");
        values.set("confirm", "hunter23");
        assert!(!validate_field(&field, &values).1.is_valid);
        values.set("confirm", "hunter22");
        assert!(validate_field(&field, &values).1.is_valid);
    }

    #[test]
    fn test_validate_fields_accumulates() {
        let fields = vec![
            FormField::text("a").required(true),
            FormField::text("b").validation(min_length(3)),
            FormField::submit("go", "Go"),
        ];
        let mut values = FormValues::new();
        values.set("a", "");
        values.set("b", "x");

        let mut required = HashMap::new();
        let mut valid = HashMap::new();
        validate_fields(&fields, &values, &mut required, &mut valid);

        assert_eq!(required.get("a"), Some(&false));
        assert_eq!(required.get("b"), Some(&true));
        assert!(!valid["b"].is_valid);
        assert!(!required.contains_key("go"));
    }
}
