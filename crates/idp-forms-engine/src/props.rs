//! The contract between a form container and the field renderer.
//!
//! The container owns the value mapping and all validation state. The
//! renderer reads values and errors through [`FormProps`] and reports every
//! edit back through its handlers; it never mutates the mapping directly.

use crate::fields::FormField;
use crate::value::FormValues;

/// Error state reported for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldError {
    /// Whether the field should render in its error state.
    pub is_error: bool,
    /// Messages rendered beneath the control.
    pub error_messages: Vec<String>,
}

impl FieldError {
    /// No error.
    pub fn none() -> Self {
        Self::default()
    }

    /// An error with the given messages.
    pub fn with_messages(messages: Vec<String>) -> Self {
        Self {
            is_error: true,
            error_messages: messages,
        }
    }
}

/// Values, error lookup and mutation handlers supplied by a form container.
pub trait FormProps {
    /// The current value mapping.
    fn values(&self) -> &FormValues;

    /// Reports the error state of a field. Called once per field render.
    fn check_error(&self, field: &FormField) -> FieldError;

    /// Stores a new text value for `name`.
    fn handle_change(&mut self, value: &str, name: &str);

    /// Commits the field: the container re-validates it.
    fn handle_blur(&mut self, name: &str);

    /// Flips a toggle. The new state is the container's to compute.
    fn handle_toggle(&mut self, name: &str);

    /// Adds `value` to, or removes it from, a checkbox group's selection.
    fn handle_change_checkbox(&mut self, value: &str, name: &str);

    /// Restores the whole form to its initial state.
    fn handle_reset(&mut self);
}
