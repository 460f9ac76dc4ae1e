//! Form field descriptors.
//!
//! A [`FormField`] is the declarative description of one renderable field:
//! its name (the key into the form's value mapping), presentation metadata
//! ([`FieldMeta`]) and its [`FieldKind`]. Each kind carries its own payload
//! and determines the shape of the value it stores, so the renderer can match
//! on the kind exhaustively instead of probing descriptors.

use std::fmt;
use std::sync::Arc;

use idp_forms_core::error::ValueShape;

use crate::validation::Validation;
use crate::value::{FormValue, FormValues};

/// A shared callback carried by a field descriptor.
///
/// Descriptors are rebuilt and cloned freely, so callbacks are reference
/// counted.
pub struct Callback<F: ?Sized>(Arc<F>);

impl<F: ?Sized> Callback<F> {
    /// Returns the wrapped function.
    pub fn get(&self) -> &F {
        &self.0
    }
}

impl<F: ?Sized> From<Arc<F>> for Callback<F> {
    fn from(inner: Arc<F>) -> Self {
        Self(inner)
    }
}

impl<F: ?Sized> Clone for Callback<F> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// Custom validation for textual fields: `(value, validation, all values)`.
pub type ValidateFn = dyn Fn(&str, &mut Validation, &FormValues) + Send + Sync;
/// Radio guard run before a change; returning `false` vetoes it.
pub type BeforeChangeFn = dyn Fn(&str) -> bool + Send + Sync;
/// Button click handler.
pub type ClickFn = dyn Fn() + Send + Sync;
/// Computes whether an action control is disabled from the current values.
pub type DisabledFn = dyn Fn(&FormValues) -> bool + Send + Sync;

/// The HTML input type of a single-line text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextType {
    /// `type="text"`.
    #[default]
    Text,
    /// `type="email"`.
    Email,
    /// `type="number"`; keystrokes and pastes are filtered to digits.
    Number,
    /// `type="url"`.
    Url,
}

impl TextType {
    /// The HTML `type` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Number => "number",
            Self::Url => "url",
        }
    }
}

/// One option of a radio group, checkbox group or dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    /// Display label.
    pub label: String,
    /// Stored value.
    pub value: String,
    /// Optional hint rendered as a tooltip next to the option.
    pub hint: Option<String>,
}

impl Choice {
    /// Creates an option with a label and value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            hint: None,
        }
    }

    /// Sets the option's hint.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Presentation and validation metadata shared by every kind.
#[derive(Debug, Clone, Default)]
pub struct FieldMeta {
    /// Label shown above the control.
    pub label: String,
    /// Placeholder text.
    pub placeholder: String,
    /// Help text shown beneath the control.
    pub hint: Option<String>,
    /// Whether the field must be filled in before submission.
    pub required: bool,
    /// Message shown when a required field is empty.
    pub required_error_message: Option<String>,
    /// Rendered but not editable.
    pub read_only: bool,
    /// Rendered disabled; events are ignored.
    pub disabled: bool,
    /// Whether the control grabs focus on mount.
    pub auto_focus: bool,
    /// Grid width (1-16).
    pub width: Option<u8>,
    /// Extra CSS class.
    pub class_name: Option<String>,
}

/// The kind of a field, with its kind-specific payload.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Single-line text input.
    Text {
        /// HTML input type.
        input_type: TextType,
        /// Initial value.
        value: Option<String>,
        /// Custom validation.
        validation: Option<Callback<ValidateFn>>,
    },
    /// Multi-line text input.
    Textarea {
        /// Initial value.
        value: Option<String>,
        /// Custom validation.
        validation: Option<Callback<ValidateFn>>,
    },
    /// Masked text input with a visibility toggle.
    Password {
        /// Initial value.
        value: Option<String>,
        /// Tooltip for the "show" icon.
        show_password: Option<String>,
        /// Tooltip for the "hide" icon.
        hide_password: Option<String>,
        /// Custom validation.
        validation: Option<Callback<ValidateFn>>,
    },
    /// Radio group.
    Radio {
        /// Options.
        children: Vec<Choice>,
        /// Initial value.
        value: Option<String>,
        /// Value used when no initial value is given.
        default: Option<String>,
        /// Guard that can veto a change.
        on_before: Option<Callback<BeforeChangeFn>>,
    },
    /// Single-select dropdown.
    Dropdown {
        /// Options.
        children: Vec<Choice>,
        /// Initial value.
        value: Option<String>,
        /// Value used when no initial value is given.
        default: Option<String>,
    },
    /// Checkbox group storing the list of checked option values.
    CheckboxGroup {
        /// Options.
        children: Vec<Choice>,
        /// Initially checked values.
        value: Option<Vec<String>>,
    },
    /// A single on/off checkbox.
    Toggle {
        /// Initial state.
        value: Option<bool>,
    },
    /// Space-delimited scope tokens edited as a list.
    Scopes {
        /// Initial value.
        value: Option<String>,
        /// A scope that is always shown and cannot be removed.
        default_value: Option<String>,
    },
    /// `&`-joined `name=value` pairs edited as a list.
    QueryParams {
        /// Initial value.
        value: Option<String>,
    },
    /// Submit button.
    Submit {
        /// Button text.
        value: String,
        /// Disabled predicate.
        disabled: Option<Callback<DisabledFn>>,
    },
    /// Reset button.
    Reset {
        /// Button text.
        value: String,
        /// Disabled predicate.
        disabled: Option<Callback<DisabledFn>>,
    },
    /// Plain button running its own click handler.
    Button {
        /// Button text.
        value: String,
        /// Click handler.
        on_click: Option<Callback<ClickFn>>,
        /// Disabled predicate.
        disabled: Option<Callback<DisabledFn>>,
    },
    /// Visual separator.
    Divider {
        /// Render as an invisible spacer.
        hidden: bool,
    },
    /// Pre-rendered HTML inserted as-is.
    Custom {
        /// The HTML.
        element: String,
    },
}

impl FieldKind {
    /// The value shape stored for this kind, or `None` for kinds that store nothing.
    pub const fn value_shape(&self) -> Option<ValueShape> {
        match self {
            Self::Text { .. }
            | Self::Textarea { .. }
            | Self::Password { .. }
            | Self::Radio { .. }
            | Self::Dropdown { .. }
            | Self::Scopes { .. }
            | Self::QueryParams { .. } => Some(ValueShape::Text),
            Self::CheckboxGroup { .. } => Some(ValueShape::List),
            Self::Toggle { .. } => Some(ValueShape::Flag),
            Self::Submit { .. }
            | Self::Reset { .. }
            | Self::Button { .. }
            | Self::Divider { .. }
            | Self::Custom { .. } => None,
        }
    }

    /// A short name for logging.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Textarea { .. } => "textarea",
            Self::Password { .. } => "password",
            Self::Radio { .. } => "radio",
            Self::Dropdown { .. } => "dropdown",
            Self::CheckboxGroup { .. } => "checkbox",
            Self::Toggle { .. } => "toggle",
            Self::Scopes { .. } => "scopes",
            Self::QueryParams { .. } => "queryParams",
            Self::Submit { .. } => "submit",
            Self::Reset { .. } => "reset",
            Self::Button { .. } => "button",
            Self::Divider { .. } => "divider",
            Self::Custom { .. } => "custom",
        }
    }
}

/// Complete description of one form field.
///
/// # Examples
///
/// ```
/// use idp_forms_engine::fields::{Choice, FormField};
///
/// let field = FormField::radio(
///     "grant",
///     vec![Choice::new("Code", "code"), Choice::new("Implicit", "implicit")],
/// )
/// .label("Grant type")
/// .default_value("code");
/// assert!(field.is_radio_field());
/// ```
#[derive(Debug, Clone)]
pub struct FormField {
    /// Key into the form value mapping. Must be unique within a form.
    pub name: String,
    /// Presentation and validation metadata.
    pub meta: FieldMeta,
    /// Kind and kind-specific payload.
    pub kind: FieldKind,
}

impl FormField {
    /// Creates a field from a name and kind with default metadata.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            meta: FieldMeta::default(),
            kind,
        }
    }

    /// A single-line text field.
    pub fn text(name: impl Into<String>) -> Self {
        Self::typed_text(name, TextType::Text)
    }

    /// A single-line field of the given input type.
    pub fn typed_text(name: impl Into<String>, input_type: TextType) -> Self {
        Self::new(
            name,
            FieldKind::Text {
                input_type,
                value: None,
                validation: None,
            },
        )
    }

    /// A numeric-only text field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::typed_text(name, TextType::Number)
    }

    /// A multi-line text field.
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Textarea {
                value: None,
                validation: None,
            },
        )
    }

    /// A password field.
    pub fn password(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Password {
                value: None,
                show_password: None,
                hide_password: None,
                validation: None,
            },
        )
    }

    /// A radio group.
    pub fn radio(name: impl Into<String>, children: Vec<Choice>) -> Self {
        Self::new(
            name,
            FieldKind::Radio {
                children,
                value: None,
                default: None,
                on_before: None,
            },
        )
    }

    /// A dropdown.
    pub fn dropdown(name: impl Into<String>, children: Vec<Choice>) -> Self {
        Self::new(
            name,
            FieldKind::Dropdown {
                children,
                value: None,
                default: None,
            },
        )
    }

    /// A checkbox group.
    pub fn checkbox_group(name: impl Into<String>, children: Vec<Choice>) -> Self {
        Self::new(name, FieldKind::CheckboxGroup { children, value: None })
    }

    /// A toggle.
    pub fn toggle(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Toggle { value: None })
    }

    /// A scopes editor.
    pub fn scopes(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Scopes {
                value: None,
                default_value: None,
            },
        )
    }

    /// A query-parameters editor.
    pub fn query_params(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::QueryParams { value: None })
    }

    /// A submit button.
    pub fn submit(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Submit {
                value: text.into(),
                disabled: None,
            },
        )
    }

    /// A reset button.
    pub fn reset(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Reset {
                value: text.into(),
                disabled: None,
            },
        )
    }

    /// A plain button.
    pub fn button(
        name: impl Into<String>,
        text: impl Into<String>,
        on_click: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            FieldKind::Button {
                value: text.into(),
                on_click: Some(Callback::from(Arc::new(on_click) as Arc<ClickFn>)),
                disabled: None,
            },
        )
    }

    /// A divider.
    pub fn divider(hidden: bool) -> Self {
        Self::new("", FieldKind::Divider { hidden })
    }

    /// A custom pre-rendered element.
    pub fn custom(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Custom {
                element: element.into(),
            },
        )
    }

    // ── Metadata builders ────────────────────────────────────────────

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.meta.label = label.into();
        self
    }

    /// Sets the placeholder.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.meta.placeholder = placeholder.into();
        self
    }

    /// Sets the hint.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.meta.hint = Some(hint.into());
        self
    }

    /// Sets whether the field is required.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.meta.required = required;
        self
    }

    /// Sets the message shown when the required field is empty.
    #[must_use]
    pub fn required_error_message(mut self, message: impl Into<String>) -> Self {
        self.meta.required_error_message = Some(message.into());
        self
    }

    /// Sets whether the field is read-only.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.meta.read_only = read_only;
        self
    }

    /// Sets whether the field is disabled.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.meta.disabled = disabled;
        self
    }

    /// Sets whether the field grabs focus.
    #[must_use]
    pub fn auto_focus(mut self, auto_focus: bool) -> Self {
        self.meta.auto_focus = auto_focus;
        self
    }

    /// Sets the grid width.
    #[must_use]
    pub fn width(mut self, width: u8) -> Self {
        self.meta.width = Some(width);
        self
    }

    /// Sets an extra CSS class.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.meta.class_name = Some(class_name.into());
        self
    }

    // ── Kind payload builders ────────────────────────────────────────

    /// Sets the initial value of a text-valued field.
    ///
    /// Ignored (with a warning) for kinds that do not store text.
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        match &mut self.kind {
            FieldKind::Text { value: slot, .. }
            | FieldKind::Textarea { value: slot, .. }
            | FieldKind::Password { value: slot, .. }
            | FieldKind::Radio { value: slot, .. }
            | FieldKind::Dropdown { value: slot, .. }
            | FieldKind::Scopes { value: slot, .. }
            | FieldKind::QueryParams { value: slot } => *slot = Some(value),
            other => tracing::warn!(field = %self.name, kind = other.name(), "text value ignored"),
        }
        self
    }

    /// Sets the initially checked options of a checkbox group.
    #[must_use]
    pub fn checked_values(mut self, values: Vec<String>) -> Self {
        if let FieldKind::CheckboxGroup { value, .. } = &mut self.kind {
            *value = Some(values);
        } else {
            tracing::warn!(field = %self.name, kind = self.kind.name(), "list value ignored");
        }
        self
    }

    /// Sets the initial state of a toggle.
    #[must_use]
    pub fn checked(mut self, on: bool) -> Self {
        if let FieldKind::Toggle { value } = &mut self.kind {
            *value = Some(on);
        } else {
            tracing::warn!(field = %self.name, kind = self.kind.name(), "toggle value ignored");
        }
        self
    }

    /// Sets the fallback value of a radio group or dropdown, or the
    /// non-removable scope of a scopes editor.
    #[must_use]
    pub fn default_value(mut self, default_value: impl Into<String>) -> Self {
        let default_value = default_value.into();
        match &mut self.kind {
            FieldKind::Radio { default, .. } | FieldKind::Dropdown { default, .. } => {
                *default = Some(default_value);
            }
            FieldKind::Scopes {
                default_value: slot,
                ..
            } => *slot = Some(default_value),
            other => tracing::warn!(field = %self.name, kind = other.name(), "default ignored"),
        }
        self
    }

    /// Attaches custom validation to a text, textarea or password field.
    #[must_use]
    pub fn validation(
        mut self,
        validate: impl Fn(&str, &mut Validation, &FormValues) + Send + Sync + 'static,
    ) -> Self {
        match &mut self.kind {
            FieldKind::Text { validation, .. }
            | FieldKind::Textarea { validation, .. }
            | FieldKind::Password { validation, .. } => {
                *validation = Some(Callback::from(Arc::new(validate) as Arc<ValidateFn>));
            }
            other => tracing::warn!(field = %self.name, kind = other.name(), "validation ignored"),
        }
        self
    }

    /// Attaches a veto guard to a radio group.
    #[must_use]
    pub fn on_before(mut self, guard: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        if let FieldKind::Radio { on_before, .. } = &mut self.kind {
            *on_before = Some(Callback::from(Arc::new(guard) as Arc<BeforeChangeFn>));
        } else {
            tracing::warn!(field = %self.name, kind = self.kind.name(), "on_before ignored");
        }
        self
    }

    /// Attaches a disabled predicate to a submit, reset or plain button.
    #[must_use]
    pub fn disabled_when(
        mut self,
        predicate: impl Fn(&FormValues) -> bool + Send + Sync + 'static,
    ) -> Self {
        match &mut self.kind {
            FieldKind::Submit { disabled, .. }
            | FieldKind::Reset { disabled, .. }
            | FieldKind::Button { disabled, .. } => {
                *disabled = Some(Callback::from(Arc::new(predicate) as Arc<DisabledFn>));
            }
            other => tracing::warn!(field = %self.name, kind = other.name(), "disabled_when ignored"),
        }
        self
    }

    /// Sets the show/hide tooltips of a password field.
    #[must_use]
    pub fn password_hints(mut self, show: impl Into<String>, hide: impl Into<String>) -> Self {
        if let FieldKind::Password {
            show_password,
            hide_password,
            ..
        } = &mut self.kind
        {
            *show_password = Some(show.into());
            *hide_password = Some(hide.into());
        }
        self
    }

    // ── Kind predicates ──────────────────────────────────────────────

    /// Text, textarea and password fields.
    pub const fn is_text_field(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Text { .. } | FieldKind::Textarea { .. } | FieldKind::Password { .. }
        )
    }

    /// Password fields.
    pub const fn is_password_field(&self) -> bool {
        matches!(self.kind, FieldKind::Password { .. })
    }

    /// Textarea fields.
    pub const fn is_textarea_field(&self) -> bool {
        matches!(self.kind, FieldKind::Textarea { .. })
    }

    /// Radio groups.
    pub const fn is_radio_field(&self) -> bool {
        matches!(self.kind, FieldKind::Radio { .. })
    }

    /// Dropdowns.
    pub const fn is_dropdown_field(&self) -> bool {
        matches!(self.kind, FieldKind::Dropdown { .. })
    }

    /// Checkbox groups.
    pub const fn is_checkbox_field(&self) -> bool {
        matches!(self.kind, FieldKind::CheckboxGroup { .. })
    }

    /// Toggles.
    pub const fn is_toggle_field(&self) -> bool {
        matches!(self.kind, FieldKind::Toggle { .. })
    }

    /// Scopes editors.
    pub const fn is_scopes_field(&self) -> bool {
        matches!(self.kind, FieldKind::Scopes { .. })
    }

    /// Query-parameter editors.
    pub const fn is_query_params_field(&self) -> bool {
        matches!(self.kind, FieldKind::QueryParams { .. })
    }

    /// Submit buttons.
    pub const fn is_submit_field(&self) -> bool {
        matches!(self.kind, FieldKind::Submit { .. })
    }

    /// Reset buttons.
    pub const fn is_reset_field(&self) -> bool {
        matches!(self.kind, FieldKind::Reset { .. })
    }

    /// Plain buttons.
    pub const fn is_button_field(&self) -> bool {
        matches!(self.kind, FieldKind::Button { .. })
    }

    /// Dividers.
    pub const fn is_divider(&self) -> bool {
        matches!(self.kind, FieldKind::Divider { .. })
    }

    /// Custom elements.
    pub const fn is_custom_field(&self) -> bool {
        matches!(self.kind, FieldKind::Custom { .. })
    }

    /// Any field that stores a value in the form mapping.
    pub const fn is_input_field(&self) -> bool {
        self.kind.value_shape().is_some()
    }

    /// The value this field starts with.
    ///
    /// When `ignore_explicit` is set (form reset), the explicit `value` is
    /// skipped but radio/dropdown defaults still apply. Returns `None` for
    /// kinds that store nothing.
    pub fn initial_value(&self, ignore_explicit: bool) -> Option<FormValue> {
        let explicit = |value: &Option<String>| {
            value
                .as_ref()
                .filter(|v| !ignore_explicit && !v.is_empty())
                .cloned()
        };
        let value = match &self.kind {
            FieldKind::Text { value, .. }
            | FieldKind::Textarea { value, .. }
            | FieldKind::Password { value, .. }
            | FieldKind::QueryParams { value } => {
                FormValue::Text(explicit(value).unwrap_or_default())
            }
            FieldKind::Radio { value, default, .. } | FieldKind::Dropdown { value, default, .. } => {
                FormValue::Text(
                    explicit(value)
                        .or_else(|| default.clone())
                        .unwrap_or_default(),
                )
            }
            FieldKind::Scopes {
                value,
                default_value,
            } => FormValue::Text(
                explicit(value)
                    .or_else(|| default_value.clone())
                    .unwrap_or_default(),
            ),
            FieldKind::CheckboxGroup { value, .. } => FormValue::List(
                value
                    .as_ref()
                    .filter(|_| !ignore_explicit)
                    .cloned()
                    .unwrap_or_default(),
            ),
            FieldKind::Toggle { value } => {
                FormValue::Flag(value.filter(|_| !ignore_explicit).unwrap_or(false))
            }
            FieldKind::Submit { .. }
            | FieldKind::Reset { .. }
            | FieldKind::Button { .. }
            | FieldKind::Divider { .. }
            | FieldKind::Custom { .. } => return None,
        };
        Some(value)
    }

    /// Returns the option values of radio, dropdown and checkbox kinds.
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            FieldKind::Radio { children, .. }
            | FieldKind::Dropdown { children, .. }
            | FieldKind::CheckboxGroup { children, .. } => children,
            _ => &[],
        }
    }

    /// Whether `value` is one of the field's option values.
    pub fn has_choice(&self, value: &str) -> bool {
        self.choices().iter().any(|c| c.value == value)
    }

    /// Whether an action control is disabled for the given values.
    pub fn is_action_disabled(&self, values: &FormValues) -> bool {
        match &self.kind {
            FieldKind::Submit { disabled, .. }
            | FieldKind::Reset { disabled, .. }
            | FieldKind::Button { disabled, .. } => {
                self.meta.disabled || disabled.as_ref().is_some_and(|p| (p.get())(values))
            }
            _ => self.meta.disabled,
        }
    }
}
