//! UI events delivered to a rendered field, and what came of them.

use std::fmt;

/// A key press, as reported by the host UI.
///
/// `key` uses the DOM `KeyboardEvent.key` naming ("Enter", "ArrowLeft", "7").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// The logical key.
    pub key: String,
    /// Whether Control was held.
    pub ctrl: bool,
    /// Whether Meta (Command) was held.
    pub meta: bool,
}

impl KeyPress {
    /// A key press with no modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
        }
    }

    /// Marks Control as held.
    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Marks Meta as held.
    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Returns `true` for the Enter key.
    pub fn is_enter(&self) -> bool {
        self.key == "Enter"
    }
}

/// An interaction with a rendered field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    /// The control's value changed to the given string.
    Change(String),
    /// The control lost focus.
    Blur,
    /// A key was pressed inside the control.
    KeyDown(KeyPress),
    /// Text was pasted into the control.
    Paste(String),
    /// An option was picked (radio, dropdown or checkbox option value).
    Select(String),
    /// The control was clicked (buttons and toggles).
    Click,
    /// The password visibility icon was clicked.
    ToggleVisibility,
    /// The scope input box changed.
    ScopeInput(String),
    /// The scope add button was clicked.
    AddScope,
    /// The delete affordance of a scope was clicked.
    RemoveScope(String),
    /// The query-parameter name box changed.
    ParamNameInput(String),
    /// The query-parameter value box changed.
    ParamValueInput(String),
    /// The query-parameter add button was clicked.
    AddParam,
    /// The delete affordance of a query parameter was clicked.
    RemoveParam {
        /// Parameter name.
        name: String,
        /// Parameter value.
        value: String,
    },
}

impl FieldEvent {
    /// A short name for logging.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Change(_) => "change",
            Self::Blur => "blur",
            Self::KeyDown(_) => "keydown",
            Self::Paste(_) => "paste",
            Self::Select(_) => "select",
            Self::Click => "click",
            Self::ToggleVisibility => "toggle_visibility",
            Self::ScopeInput(_) => "scope_input",
            Self::AddScope => "add_scope",
            Self::RemoveScope(_) => "remove_scope",
            Self::ParamNameInput(_) => "param_name_input",
            Self::ParamValueInput(_) => "param_value_input",
            Self::AddParam => "add_param",
            Self::RemoveParam { .. } => "remove_param",
        }
    }
}

/// What the renderer did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// A handler ran or local control state changed.
    Applied,
    /// The event does not apply to this field (or the field is disabled).
    Ignored,
    /// Input was silently discarded by a keystroke or paste filter.
    Filtered,
    /// A radio `on_before` guard refused the change.
    Vetoed,
    /// A composite control refused the input; the message is rendered inline.
    Rejected(String),
    /// A submit control was activated; the owning form should submit.
    SubmitRequested,
}

impl fmt::Display for EventOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => write!(f, "applied"),
            Self::Ignored => write!(f, "ignored"),
            Self::Filtered => write!(f, "filtered"),
            Self::Vetoed => write!(f, "vetoed"),
            Self::Rejected(msg) => write!(f, "rejected: {msg}"),
            Self::SubmitRequested => write!(f, "submit requested"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_press_modifiers() {
        let key = KeyPress::new("v").with_ctrl();
        assert!(key.ctrl);
        assert!(!key.meta);
        assert!(!key.is_enter());
        assert!(KeyPress::new("Enter").is_enter());
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(FieldEvent::Blur.kind(), "blur");
        assert_eq!(
            FieldEvent::RemoveParam {
                name: "a".into(),
                value: "1".into()
            }
            .kind(),
            "remove_param"
        );
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(EventOutcome::Rejected("bad".into()).to_string(), "rejected: bad");
    }
}
