//! The field renderer.
//!
//! [`InnerField`] turns one [`FormField`] into HTML bound to the current
//! value, and routes UI events for that field to the matching [`FormProps`]
//! handler. Dispatch is an exhaustive `match` on [`FieldKind`].
//!
//! The renderer owns the local state of the composite controls (password
//! visibility, scope and query-parameter lists), keyed by field name. It
//! never writes to the value mapping itself: every edit goes back to the
//! form through the handler contract.

use std::collections::HashMap;
use std::fmt::Write as _;

use idp_forms_core::logging::field_span;
use idp_forms_core::NumericPastePolicy;

use crate::controls::{PasswordControl, QueryParamsControl, ScopesControl};
use crate::events::{EventOutcome, FieldEvent};
use crate::fields::{Choice, FieldKind, FormField, TextType};
use crate::keys::{filter_numeric_paste, is_allowed_numeric_key};
use crate::props::{FieldError, FormProps};
use crate::widgets::{
    errors_as_ul, escape, field_id, hint_tag, label_tag, Attrs, Button, ChoiceInput, Input, Select,
    Textarea, Widget,
};

/// Renders fields and routes their events.
#[derive(Debug, Default)]
pub struct InnerField {
    passwords: HashMap<String, PasswordControl>,
    scopes: HashMap<String, ScopesControl>,
    query_params: HashMap<String, QueryParamsControl>,
    paste_policy: NumericPastePolicy,
}

impl InnerField {
    /// Creates a renderer with no control state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how pastes into numeric fields are filtered.
    #[must_use]
    pub fn with_paste_policy(mut self, policy: NumericPastePolicy) -> Self {
        self.paste_policy = policy;
        self
    }

    /// Drops all composite control state (used on form reset).
    pub fn clear(&mut self) {
        self.passwords.clear();
        self.scopes.clear();
        self.query_params.clear();
    }

    /// The password control for `name`, if it has been rendered or used.
    pub fn password(&self, name: &str) -> Option<&PasswordControl> {
        self.passwords.get(name)
    }

    /// The scopes control for `name`, if it has been rendered or used.
    pub fn scopes(&self, name: &str) -> Option<&ScopesControl> {
        self.scopes.get(name)
    }

    /// The query-parameters control for `name`, if it has been rendered or used.
    pub fn query_params(&self, name: &str) -> Option<&QueryParamsControl> {
        self.query_params.get(name)
    }

    fn scopes_control(&mut self, name: &str, value: &str) -> &mut ScopesControl {
        let control = self
            .scopes
            .entry(name.to_string())
            .or_insert_with(|| ScopesControl::new(value));
        control.sync(value);
        control
    }

    fn query_params_control(&mut self, name: &str, value: &str) -> &mut QueryParamsControl {
        let control = self
            .query_params
            .entry(name.to_string())
            .or_insert_with(|| QueryParamsControl::new(value));
        control.sync(value);
        control
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Renders one field bound to the current values.
    ///
    /// `check_error` is consulted exactly once, except for custom elements,
    /// which are inserted as-is.
    pub fn render(&mut self, field: &FormField, props: &dyn FormProps) -> String {
        let error = match &field.kind {
            FieldKind::Custom { .. } => FieldError::none(),
            _ => props.check_error(field),
        };
        tracing::trace!(field = %field.name, kind = field.kind.name(), is_error = error.is_error, "rendering field");

        let name = field.name.as_str();
        let values = props.values();
        let attrs = control_attrs(field, &error);

        let control = match &field.kind {
            FieldKind::Text { input_type, .. } => {
                let mut attrs = attrs;
                if *input_type == TextType::Number {
                    attrs.insert("inputmode".to_string(), "numeric".to_string());
                }
                Input::new(input_type.as_str()).render(name, values.text(name), &attrs)
            }
            FieldKind::Textarea { .. } => Textarea.render(name, values.text(name), &attrs),
            FieldKind::Password {
                show_password,
                hide_password,
                ..
            } => self.passwords.entry(name.to_string()).or_default().render(
                name,
                values.text(name),
                &attrs,
                show_password.as_deref(),
                hide_password.as_deref(),
            ),
            FieldKind::Radio { children, .. } => {
                render_radio_group(field, children, values.text(name))
            }
            FieldKind::Dropdown { children, .. } => {
                let mut select = Select::new(
                    children
                        .iter()
                        .map(|c| (c.value.clone(), c.label.clone()))
                        .collect(),
                );
                if !field.meta.placeholder.is_empty() {
                    select.placeholder = Some(field.meta.placeholder.clone());
                }
                let mut attrs = attrs;
                attrs.remove("placeholder");
                select.render(name, values.text(name), &attrs)
            }
            FieldKind::CheckboxGroup { children, .. } => {
                render_checkbox_group(field, children, values.list(name), &error)
            }
            FieldKind::Toggle { .. } => render_toggle(field, values.is_on(name)),
            FieldKind::Scopes { default_value, .. } => {
                let editable = !field.meta.disabled && !field.meta.read_only;
                self.scopes_control(name, values.text(name)).render(
                    name,
                    default_value.as_deref(),
                    &attrs,
                    editable,
                )
            }
            FieldKind::QueryParams { .. } => {
                let editable = !field.meta.disabled && !field.meta.read_only;
                self.query_params_control(name, values.text(name))
                    .render(name, &attrs, editable)
            }
            FieldKind::Submit { value, .. } => {
                render_action(&Button::submit(), field, value, props)
            }
            FieldKind::Reset { value, .. } => render_action(&Button::reset(), field, value, props),
            FieldKind::Button { value, .. } => {
                render_action(&Button::plain(), field, value, props)
            }
            FieldKind::Divider { hidden } => {
                return if *hidden {
                    r#"<div class="ui hidden divider"></div>"#.to_string()
                } else {
                    r#"<div class="ui divider"></div>"#.to_string()
                };
            }
            FieldKind::Custom { element } => return element.clone(),
        };

        wrap_field(field, &control, &error)
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Routes one UI event for `field` to the form's handlers.
    ///
    /// Disabled fields ignore every event; read-only fields ignore everything
    /// except focus loss and the password visibility toggle.
    pub fn dispatch(
        &mut self,
        field: &FormField,
        props: &mut dyn FormProps,
        event: FieldEvent,
    ) -> EventOutcome {
        let span = field_span(&field.name, event.kind());
        let _guard = span.enter();

        let outcome = if field.meta.disabled {
            EventOutcome::Ignored
        } else if field.meta.read_only
            && !matches!(event, FieldEvent::Blur | FieldEvent::ToggleVisibility)
        {
            EventOutcome::Ignored
        } else {
            self.dispatch_kind(field, props, event)
        };

        tracing::debug!(%outcome, "field event handled");
        outcome
    }

    fn dispatch_kind(
        &mut self,
        field: &FormField,
        props: &mut dyn FormProps,
        event: FieldEvent,
    ) -> EventOutcome {
        let name = field.name.as_str();
        match &field.kind {
            FieldKind::Text { input_type, .. } => {
                self.dispatch_text(name, *input_type == TextType::Number, props, event)
            }
            FieldKind::Textarea { .. } => self.dispatch_text(name, false, props, event),
            FieldKind::Password { .. } => {
                if event == FieldEvent::ToggleVisibility {
                    let value = props.values().text(name).to_string();
                    let control = self.passwords.entry(name.to_string()).or_default();
                    return if control.toggle_visibility(&value) {
                        EventOutcome::Applied
                    } else {
                        EventOutcome::Ignored
                    };
                }
                self.dispatch_text(name, false, props, event)
            }
            FieldKind::Radio { on_before, .. } => match event {
                FieldEvent::Select(value) | FieldEvent::Change(value) => {
                    if !field.has_choice(&value) {
                        return EventOutcome::Ignored;
                    }
                    if let Some(guard) = on_before {
                        if !(guard.get())(&value) {
                            return EventOutcome::Vetoed;
                        }
                    }
                    props.handle_change(&value, name);
                    EventOutcome::Applied
                }
                FieldEvent::Blur => blur(props, name),
                _ => EventOutcome::Ignored,
            },
            FieldKind::Dropdown { .. } => match event {
                FieldEvent::Select(value) | FieldEvent::Change(value) => {
                    if value.is_empty() || field.has_choice(&value) {
                        props.handle_change(&value, name);
                        EventOutcome::Applied
                    } else {
                        EventOutcome::Ignored
                    }
                }
                FieldEvent::Blur => blur(props, name),
                _ => EventOutcome::Ignored,
            },
            FieldKind::CheckboxGroup { .. } => match event {
                FieldEvent::Select(value) | FieldEvent::Change(value)
                    if field.has_choice(&value) =>
                {
                    props.handle_change_checkbox(&value, name);
                    EventOutcome::Applied
                }
                FieldEvent::Blur => blur(props, name),
                _ => EventOutcome::Ignored,
            },
            FieldKind::Toggle { .. } => match event {
                FieldEvent::Click | FieldEvent::Change(_) => {
                    props.handle_toggle(name);
                    EventOutcome::Applied
                }
                _ => EventOutcome::Ignored,
            },
            FieldKind::Scopes { default_value, .. } => {
                let value = props.values().text(name).to_string();
                let control = self.scopes_control(name, &value);
                let serialized = match event {
                    FieldEvent::ScopeInput(text) => {
                        control.set_input(text);
                        return EventOutcome::Applied;
                    }
                    FieldEvent::AddScope => control.add(),
                    FieldEvent::KeyDown(key) if key.is_enter() => control.add(),
                    FieldEvent::RemoveScope(token) => control.remove(&token, default_value.as_deref()),
                    FieldEvent::Blur => return blur(props, name),
                    _ => return EventOutcome::Ignored,
                };
                serialized.map_or(EventOutcome::Ignored, |serialized| {
                    props.handle_change(&serialized, name);
                    EventOutcome::Applied
                })
            }
            FieldKind::QueryParams { .. } => {
                let value = props.values().text(name).to_string();
                let control = self.query_params_control(name, &value);
                match event {
                    FieldEvent::ParamNameInput(text) => {
                        control.set_name_input(text);
                        EventOutcome::Applied
                    }
                    FieldEvent::ParamValueInput(text) => {
                        control.set_value_input(text);
                        EventOutcome::Applied
                    }
                    FieldEvent::AddParam => add_param(control, props, name),
                    FieldEvent::KeyDown(key) if key.is_enter() => add_param(control, props, name),
                    FieldEvent::RemoveParam {
                        name: param,
                        value,
                    } => control.remove(&param, &value).map_or(
                        EventOutcome::Ignored,
                        |serialized| {
                            props.handle_change(&serialized, name);
                            EventOutcome::Applied
                        },
                    ),
                    FieldEvent::Blur => blur(props, name),
                    _ => EventOutcome::Ignored,
                }
            }
            FieldKind::Submit { .. } => match event {
                FieldEvent::Click if !field.is_action_disabled(props.values()) => {
                    EventOutcome::SubmitRequested
                }
                _ => EventOutcome::Ignored,
            },
            FieldKind::Reset { .. } => match event {
                FieldEvent::Click if !field.is_action_disabled(props.values()) => {
                    props.handle_reset();
                    EventOutcome::Applied
                }
                _ => EventOutcome::Ignored,
            },
            FieldKind::Button { on_click, .. } => match event {
                FieldEvent::Click if !field.is_action_disabled(props.values()) => {
                    if let Some(on_click) = on_click {
                        (on_click.get())();
                    }
                    EventOutcome::Applied
                }
                _ => EventOutcome::Ignored,
            },
            FieldKind::Divider { .. } | FieldKind::Custom { .. } => EventOutcome::Ignored,
        }
    }

    fn dispatch_text(
        &self,
        name: &str,
        numeric: bool,
        props: &mut dyn FormProps,
        event: FieldEvent,
    ) -> EventOutcome {
        match event {
            FieldEvent::Change(value) => {
                if numeric && !value.chars().all(|c| c.is_ascii_digit()) {
                    return EventOutcome::Filtered;
                }
                props.handle_change(&value, name);
                EventOutcome::Applied
            }
            FieldEvent::Blur => blur(props, name),
            FieldEvent::KeyDown(key) => {
                if numeric && !is_allowed_numeric_key(&key) {
                    EventOutcome::Filtered
                } else if key.is_enter() {
                    blur(props, name)
                } else {
                    EventOutcome::Ignored
                }
            }
            FieldEvent::Paste(text) => {
                let text = if numeric {
                    match filter_numeric_paste(&text, self.paste_policy) {
                        Some(text) => text,
                        None => return EventOutcome::Filtered,
                    }
                } else {
                    text
                };
                let value = format!("{}{text}", props.values().text(name));
                props.handle_change(&value, name);
                EventOutcome::Applied
            }
            _ => EventOutcome::Ignored,
        }
    }
}

fn blur(props: &mut dyn FormProps, name: &str) -> EventOutcome {
    props.handle_blur(name);
    EventOutcome::Applied
}

fn add_param(control: &mut QueryParamsControl, props: &mut dyn FormProps, name: &str) -> EventOutcome {
    match control.add() {
        Ok(serialized) => {
            props.handle_change(&serialized, name);
            EventOutcome::Applied
        }
        Err(err) => {
            tracing::warn!(field = %name, error = %err, "query parameter rejected");
            EventOutcome::Rejected(err.to_string())
        }
    }
}

/// Attributes shared by text-like controls.
fn control_attrs(field: &FormField, error: &FieldError) -> Attrs {
    let mut attrs = Attrs::new();
    attrs.insert("id".to_string(), field_id(&field.name));
    if !field.meta.placeholder.is_empty() {
        attrs.insert("placeholder".to_string(), field.meta.placeholder.clone());
    }
    if field.meta.read_only {
        attrs.insert("readonly".to_string(), String::new());
    }
    if field.meta.disabled {
        attrs.insert("disabled".to_string(), String::new());
    }
    if field.meta.auto_focus {
        attrs.insert("autofocus".to_string(), String::new());
    }
    if field.meta.required {
        attrs.insert("required".to_string(), String::new());
    }
    if error.is_error {
        attrs.insert("aria-invalid".to_string(), "true".to_string());
    }
    attrs
}

/// Wraps a control with its label, hint and error list.
///
/// Checkbox groups render their own error list on the first option.
fn wrap_field(field: &FormField, control: &str, error: &FieldError) -> String {
    let mut classes = String::from("field");
    if error.is_error {
        classes.push_str(" error");
    }
    if field.meta.required {
        classes.push_str(" required");
    }
    if let Some(width) = field.meta.width {
        let _ = write!(classes, " wide-{width}");
    }
    if let Some(class_name) = &field.meta.class_name {
        classes.push(' ');
        classes.push_str(class_name);
    }

    let label = if field.is_toggle_field() {
        String::new()
    } else {
        label_tag(&field_id(&field.name), &field.meta.label, field.meta.required)
    };
    let errors = if field.is_checkbox_field() {
        String::new()
    } else {
        errors_as_ul(&error.error_messages)
    };
    format!(
        r#"<div class="{}">{label}{control}{}{errors}</div>"#,
        escape(&classes),
        hint_tag(field.meta.hint.as_deref())
    )
}

fn option_hint(choice: &Choice) -> String {
    choice
        .hint
        .as_deref()
        .map(|h| format!(r#"<i class="info circle icon" title="{}"></i>"#, escape(h)))
        .unwrap_or_default()
}

fn render_radio_group(field: &FormField, children: &[Choice], current: &str) -> String {
    let widget = ChoiceInput::radio();
    let mut html = String::from(r#"<div class="grouped fields">"#);
    for (index, child) in children.iter().enumerate() {
        let mut attrs = Attrs::new();
        attrs.insert("id".to_string(), format!("{}_{index}", field_id(&field.name)));
        if child.value == current {
            attrs.insert("checked".to_string(), String::new());
        }
        if field.meta.disabled {
            attrs.insert("disabled".to_string(), String::new());
        }
        let _ = write!(
            html,
            r#"<div class="field radio"><label>{} {}</label>{}</div>"#,
            widget.render(&field.name, &child.value, &attrs),
            escape(&child.label),
            option_hint(child)
        );
    }
    html.push_str("</div>");
    html
}

fn render_checkbox_group(
    field: &FormField,
    children: &[Choice],
    selected: &[String],
    error: &FieldError,
) -> String {
    let widget = ChoiceInput::checkbox();
    let mut html = String::from(r#"<div class="grouped fields">"#);
    for (index, child) in children.iter().enumerate() {
        let mut attrs = Attrs::new();
        attrs.insert("id".to_string(), format!("{}_{index}", field_id(&field.name)));
        if selected.contains(&child.value) {
            attrs.insert("checked".to_string(), String::new());
        }
        if field.meta.disabled {
            attrs.insert("disabled".to_string(), String::new());
        }
        if error.is_error {
            attrs.insert("aria-invalid".to_string(), "true".to_string());
        }
        let class = if error.is_error {
            "field checkbox error"
        } else {
            "field checkbox"
        };
        let errors = if index == 0 {
            errors_as_ul(&error.error_messages)
        } else {
            String::new()
        };
        let _ = write!(
            html,
            r#"<div class="{class}"><label>{} {}</label>{}{errors}</div>"#,
            widget.render(&field.name, &child.value, &attrs),
            escape(&child.label),
            option_hint(child)
        );
    }
    html.push_str("</div>");
    html
}

fn render_toggle(field: &FormField, on: bool) -> String {
    let mut attrs = Attrs::new();
    attrs.insert("id".to_string(), field_id(&field.name));
    if on {
        attrs.insert("checked".to_string(), String::new());
    }
    if field.meta.disabled {
        attrs.insert("disabled".to_string(), String::new());
    }
    format!(
        r#"<div class="ui toggle checkbox">{}<label for="{}">{}</label></div>"#,
        ChoiceInput::checkbox().render(&field.name, "true", &attrs),
        field_id(&field.name),
        escape(&field.meta.label)
    )
}

fn render_action(widget: &Button, field: &FormField, text: &str, props: &dyn FormProps) -> String {
    let mut attrs = Attrs::new();
    attrs.insert("id".to_string(), field_id(&field.name));
    if field.is_action_disabled(props.values()) {
        attrs.insert("disabled".to_string(), String::new());
    }
    widget.render(&field.name, text, &attrs)
}
