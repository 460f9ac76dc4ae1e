//! The form container.
//!
//! [`Form`] owns the value mapping, tracks which required fields are filled
//! and which fields failed validation, and implements the [`FormProps`]
//! contract the renderer reports edits through. Submission validates every
//! field; errors only render once a submission has been attempted.
//!
//! # Examples
//!
//! ```
//! use idp_forms_engine::{FieldEvent, Form, FormField};
//!
//! let mut form = Form::new(vec![
//!     FormField::text("name").label("Name").required(true),
//!     FormField::scopes("scope").default_value("openid"),
//!     FormField::submit("save", "Save"),
//! ]);
//!
//! assert!(!form.submit());
//! assert!(form.render().contains("errorlist"));
//!
//! form.dispatch("name", FieldEvent::Change("console".into())).unwrap();
//! assert!(form.submit());
//! assert_eq!(form.values().text("scope"), "openid");
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use idp_forms_core::i18n;
use idp_forms_core::{FormsError, FormsResult, NumericPastePolicy};

use crate::events::{EventOutcome, FieldEvent};
use crate::fields::{Callback, FormField};
use crate::inner_field::InnerField;
use crate::props::{FieldError, FormProps};
use crate::validation::{is_filled, validate_field, validate_fields, Validation};
use crate::value::{FormValue, FormValues};
use crate::widgets::escape;

/// Called with the values of a successful submission.
pub type SubmitFn = dyn Fn(&FormValues) + Send + Sync;
/// Called with the values after every change.
pub type ListenFn = dyn Fn(&FormValues) + Send + Sync;

/// A run of consecutive fields rendered inside a wrapper `<div>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Index of the first field in the group.
    pub start: usize,
    /// Index one past the last field in the group.
    pub end: usize,
    /// CSS class of the wrapper.
    pub class_name: String,
}

impl Group {
    /// Groups fields `start..end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            class_name: "group".to_string(),
        }
    }

    /// Sets the wrapper class.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

/// Values and validation state of a form.
#[derive(Debug, Default)]
pub struct FormState {
    fields: Vec<FormField>,
    values: FormValues,
    required_fields: HashMap<String, bool>,
    valid_fields: HashMap<String, Validation>,
    is_submitting: bool,
    listen: Option<Callback<ListenFn>>,
}

impl FormState {
    /// Creates the state for a list of fields and initializes their values.
    pub fn new(fields: Vec<FormField>) -> Self {
        let mut state = Self {
            fields,
            ..Self::default()
        };
        state.init(false);
        state
    }

    /// The field descriptors.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Looks up an input or action field by name.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields
            .iter()
            .find(|f| f.name == name && !f.is_divider())
    }

    /// Whether a submission has been attempted and failed.
    pub const fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Whether the required check for `name` is currently satisfied.
    pub fn is_required_satisfied(&self, name: &str) -> bool {
        self.required_fields.get(name).copied().unwrap_or(true)
    }

    /// The last validation result for `name`.
    pub fn validation(&self, name: &str) -> Option<&Validation> {
        self.valid_fields.get(name)
    }

    /// Initializes values and required flags.
    ///
    /// Existing values are kept unless `is_reset` is set. On reset, explicit
    /// field values are ignored but radio and dropdown defaults still apply.
    fn init(&mut self, is_reset: bool) {
        let names: Vec<&str> = self.fields.iter().map(|f| f.name.as_str()).collect();
        let stale: Vec<String> = self
            .values
            .iter()
            .filter(|(name, _)| !names.contains(&name.as_str()))
            .map(|(name, _)| name.clone())
            .collect();
        for name in stale {
            self.values.remove(&name);
        }

        for field in self.fields.iter().filter(|f| f.is_input_field()) {
            if is_reset || !self.values.contains(&field.name) {
                if let Some(initial) = field.initial_value(is_reset) {
                    self.values.set(field.name.clone(), initial);
                }
            }
            let satisfied = !field.meta.required || (!is_reset && is_filled(self.values.get(&field.name)));
            self.required_fields.insert(field.name.clone(), satisfied);
            self.valid_fields.insert(field.name.clone(), Validation::default());
        }
        self.required_fields
            .retain(|name, _| self.fields.iter().any(|f| &f.name == name));
        self.valid_fields
            .retain(|name, _| self.fields.iter().any(|f| &f.name == name));
    }

    /// Replaces the field list, keeping values for names already present.
    pub fn set_fields(&mut self, fields: Vec<FormField>) {
        self.fields = fields;
        self.init(false);
    }

    /// Validates every field and reports whether the form may be submitted.
    pub fn validate_all(&mut self) -> bool {
        validate_fields(
            &self.fields,
            &self.values,
            &mut self.required_fields,
            &mut self.valid_fields,
        );
        self.required_fields.values().all(|filled| *filled)
            && self.valid_fields.values().all(|v| v.is_valid)
    }

    fn notify(&self) {
        if let Some(listen) = &self.listen {
            (listen.get())(&self.values);
        }
    }

    fn set_value(&mut self, name: &str, value: FormValue) {
        if self.field(name).is_none() {
            tracing::warn!(field = %name, "value set for unknown field");
        }
        self.values.set(name, value);
        self.notify();
    }
}

impl FormProps for FormState {
    fn values(&self) -> &FormValues {
        &self.values
    }

    fn check_error(&self, field: &FormField) -> FieldError {
        if !self.is_submitting {
            return FieldError::none();
        }
        if field.is_input_field()
            && !field.is_radio_field()
            && field.meta.required
            && !self.is_required_satisfied(&field.name)
        {
            let message = field
                .meta
                .required_error_message
                .clone()
                .unwrap_or_else(|| i18n::gettext("This field is required."));
            return FieldError::with_messages(vec![message]);
        }
        if field.is_text_field() {
            if let Some(validation) = self.valid_fields.get(&field.name) {
                if !validation.is_valid {
                    return FieldError::with_messages(validation.error_messages.clone());
                }
            }
        }
        FieldError::none()
    }

    fn handle_change(&mut self, value: &str, name: &str) {
        self.set_value(name, FormValue::from(value));
    }

    fn handle_blur(&mut self, name: &str) {
        let Some(field) = self.field(name).filter(|f| f.is_input_field()) else {
            tracing::warn!(field = %name, "blur on unknown field");
            return;
        };
        let (satisfied, validation) = validate_field(field, &self.values);
        self.required_fields.insert(name.to_string(), satisfied);
        self.valid_fields.insert(name.to_string(), validation);
    }

    fn handle_toggle(&mut self, name: &str) {
        let on = self.values.is_on(name);
        self.set_value(name, FormValue::Flag(!on));
    }

    fn handle_change_checkbox(&mut self, value: &str, name: &str) {
        let mut selected = self.values.list(name).to_vec();
        if let Some(index) = selected.iter().position(|item| item == value) {
            selected.remove(index);
        } else {
            selected.push(value.to_string());
        }
        self.set_value(name, FormValue::List(selected));
    }

    fn handle_reset(&mut self) {
        self.is_submitting = false;
        self.init(true);
        self.notify();
    }
}

/// A form: field descriptors, their values, a renderer and a submit handler.
#[derive(Debug, Default)]
pub struct Form {
    state: FormState,
    renderer: InnerField,
    groups: Vec<Group>,
    on_submit: Option<Callback<SubmitFn>>,
}

impl Form {
    /// Creates a form and initializes its values from the fields.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            state: FormState::new(fields),
            ..Self::default()
        }
    }

    /// Sets how pastes into numeric fields are filtered.
    #[must_use]
    pub fn with_paste_policy(mut self, policy: NumericPastePolicy) -> Self {
        self.renderer = InnerField::new().with_paste_policy(policy);
        self
    }

    /// Wraps runs of fields in grouping `<div>`s.
    #[must_use]
    pub fn with_groups(mut self, groups: Vec<Group>) -> Self {
        self.groups = groups;
        self
    }

    /// Sets the handler called with the values of a successful submission.
    #[must_use]
    pub fn on_submit(mut self, handler: impl Fn(&FormValues) + Send + Sync + 'static) -> Self {
        self.on_submit = Some(Callback::from(Arc::new(handler) as Arc<SubmitFn>));
        self
    }

    /// Sets a callback notified with the values after every change.
    #[must_use]
    pub fn listen(mut self, listener: impl Fn(&FormValues) + Send + Sync + 'static) -> Self {
        self.state.listen = Some(Callback::from(Arc::new(listener) as Arc<ListenFn>));
        self
    }

    /// Replaces the field list, keeping values for names already present.
    pub fn set_fields(&mut self, fields: Vec<FormField>) {
        self.state.set_fields(fields);
    }

    /// The field descriptors.
    pub fn fields(&self) -> &[FormField] {
        self.state.fields()
    }

    /// The current values.
    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    /// The value mapping as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::SerializationError`] if serialization fails.
    pub fn values_json(&self) -> FormsResult<String> {
        self.state.values.to_json()
    }

    /// The validation and submission state.
    pub const fn state(&self) -> &FormState {
        &self.state
    }

    /// The renderer and its composite control state.
    pub const fn renderer(&self) -> &InnerField {
        &self.renderer
    }

    /// Reports the error state of the named field.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::UnknownField`] if no field has that name.
    pub fn check_error(&self, name: &str) -> FormsResult<FieldError> {
        let field = self.lookup(name)?;
        Ok(self.state.check_error(field))
    }

    fn lookup(&self, name: &str) -> FormsResult<&FormField> {
        self.state.field(name).ok_or_else(|| {
            tracing::warn!(field = %name, "unknown field");
            FormsError::UnknownField(name.to_string())
        })
    }

    /// Routes a UI event to the named field.
    ///
    /// Activating a submit control submits the form.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::UnknownField`] if no field has that name.
    pub fn dispatch(&mut self, name: &str, event: FieldEvent) -> FormsResult<EventOutcome> {
        let field = self.lookup(name)?.clone();
        let outcome = self.renderer.dispatch(&field, &mut self.state, event);
        match outcome {
            EventOutcome::SubmitRequested => {
                self.submit();
            }
            EventOutcome::Applied if field.is_reset_field() => self.renderer.clear(),
            _ => {}
        }
        Ok(outcome)
    }

    /// Validates every field and, if all pass, calls the submit handler.
    ///
    /// Returns `true` if the form was submitted. On failure the form enters
    /// its submitting state so errors render.
    pub fn submit(&mut self) -> bool {
        let ok = self.state.validate_all();
        if ok {
            self.state.is_submitting = false;
            tracing::debug!(fields = self.state.values.len(), "form submitted");
            if let Some(handler) = &self.on_submit {
                (handler.get())(&self.state.values);
            }
        } else {
            self.state.is_submitting = true;
            tracing::debug!("form submission blocked by validation");
        }
        ok
    }

    /// Restores every field to its initial value and clears control state.
    pub fn reset(&mut self) {
        self.state.handle_reset();
        self.renderer.clear();
    }

    /// Renders one field.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::UnknownField`] if no field has that name.
    pub fn render_field(&mut self, name: &str) -> FormsResult<String> {
        let field = self.lookup(name)?.clone();
        Ok(self.renderer.render(&field, &self.state))
    }

    /// Renders the whole form.
    pub fn render(&mut self) -> String {
        let fields = &self.state.fields;
        let mut html = String::from(r#"<form class="ui form" novalidate>"#);
        let mut index = 0;
        while index < fields.len() {
            let group = self
                .groups
                .iter()
                .find(|g| g.start == index && g.end > g.start);
            if let Some(group) = group {
                let end = group.end.min(fields.len());
                let _ = write!(html, r#"<div class="{}">"#, escape(&group.class_name));
                for field in &fields[index..end] {
                    html.push_str(&self.renderer.render(field, &self.state));
                }
                html.push_str("</div>");
                index = end;
            } else {
                html.push_str(&self.renderer.render(&fields[index], &self.state));
                index += 1;
            }
        }
        html.push_str("</form>");
        html
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::fields::Choice;

    fn sample_fields() -> Vec<FormField> {
        vec![
            FormField::text("name").label("Name").required(true),
            FormField::radio("grant", vec![Choice::new("Code", "code"), Choice::new("Implicit", "implicit")])
                .default_value("code"),
            FormField::dropdown("lang", vec![Choice::new("English", "en")]),
            FormField::checkbox_group("types", vec![Choice::new("A", "a"), Choice::new("B", "b")]),
            FormField::toggle("enabled"),
            FormField::scopes("scope").default_value("openid"),
            FormField::text("url").value("https://localhost"),
            FormField::submit("save", "Save"),
        ]
    }

    #[test]
    fn test_init_values() {
        let form = Form::new(sample_fields());
        let values = form.values();
        assert_eq!(values.text("name"), "");
        assert_eq!(values.text("grant"), "code");
        assert_eq!(values.text("lang"), "");
        assert_eq!(values.list("types"), &[] as &[String]);
        assert_eq!(values.get("enabled"), Some(&FormValue::Flag(false)));
        assert_eq!(values.text("scope"), "openid");
        assert_eq!(values.text("url"), "https://localhost");
        assert!(!values.contains("save"));
    }

    #[test]
    fn test_required_flags_at_init() {
        let form = Form::new(vec![
            FormField::text("a").required(true),
            FormField::text("b").required(true).value("x"),
            FormField::text("c"),
        ]);
        assert!(!form.state().is_required_satisfied("a"));
        assert!(form.state().is_required_satisfied("b"));
        assert!(form.state().is_required_satisfied("c"));
    }

    #[test]
    fn test_errors_hidden_until_submit() {
        let mut form = Form::new(sample_fields());
        assert!(!form.check_error("name").unwrap().is_error);
        assert!(!form.submit());
        let error = form.check_error("name").unwrap();
        assert_eq!(error.error_messages, vec!["This field is required."]);
    }

    #[test]
    fn test_custom_required_message() {
        let mut form = Form::new(vec![FormField::text("name")
            .required(true)
            .required_error_message("Name is required")]);
        form.submit();
        assert_eq!(
            form.check_error("name").unwrap().error_messages,
            vec!["Name is required"]
        );
    }

    #[test]
    fn test_radio_never_reports_required() {
        let mut form = Form::new(vec![FormField::radio("r", vec![Choice::new("A", "a")]).required(true)]);
        assert!(!form.submit());
        assert!(!form.check_error("r").unwrap().is_error);
    }

    #[test]
    fn test_submit_calls_handler() {
        let submitted = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&submitted);
        let mut form = Form::new(sample_fields()).on_submit(move |values| {
            *sink.lock().unwrap() = Some(values.text("name").to_string());
        });
        form.dispatch("name", FieldEvent::Change("console".into())).unwrap();
        assert_eq!(
            form.dispatch("save", FieldEvent::Click).unwrap(),
            EventOutcome::SubmitRequested
        );
        assert_eq!(submitted.lock().unwrap().as_deref(), Some("console"));
        assert!(!form.state().is_submitting());
    }

    #[test]
    fn test_validation_errors_block_submit() {
        let mut form = Form::new(vec![FormField::text("port").validation(|value, validation, _| {
            if value.parse::<u16>().is_err() {
                validation.fail("Enter a valid port.");
            }
        })]);
        form.dispatch("port", FieldEvent::Change("http".into())).unwrap();
        form.dispatch("port", FieldEvent::Blur).unwrap();
        assert!(!form.check_error("port").unwrap().is_error);
        assert!(!form.submit());
        assert_eq!(
            form.check_error("port").unwrap().error_messages,
            vec!["Enter a valid port."]
        );
        form.dispatch("port", FieldEvent::Change("8080".into())).unwrap();
        assert!(form.submit());
    }

    #[test]
    fn test_enter_in_textarea_validates() {
        let mut form = Form::new(vec![FormField::textarea("desc").validation(
            |value, validation, _| {
                if value.len() < 3 {
                    validation.fail("Too short.");
                }
            },
        )]);
        form.dispatch("desc", FieldEvent::Change("x".into())).unwrap();
        let outcome = form
            .dispatch("desc", FieldEvent::KeyDown(crate::events::KeyPress::new("Enter")))
            .unwrap();

        assert_eq!(outcome, EventOutcome::Applied);
        let validation = form.state().validation("desc").unwrap();
        assert!(!validation.is_valid);
        assert_eq!(validation.error_messages, vec!["Too short."]);
    }

    #[test]
    fn test_checkbox_membership_toggles() {
        let mut form = Form::new(sample_fields());
        form.dispatch("types", FieldEvent::Select("a".into())).unwrap();
        form.dispatch("types", FieldEvent::Select("b".into())).unwrap();
        form.dispatch("types", FieldEvent::Select("a".into())).unwrap();
        assert_eq!(form.values().list("types"), &["b".to_string()]);
    }

    #[test]
    fn test_toggle_flips() {
        let mut form = Form::new(sample_fields());
        form.dispatch("enabled", FieldEvent::Click).unwrap();
        assert!(form.values().is_on("enabled"));
        form.dispatch("enabled", FieldEvent::Click).unwrap();
        assert!(!form.values().is_on("enabled"));
    }

    #[test]
    fn test_reset_restores_defaults_and_ignores_explicit_values() {
        let mut form = Form::new(sample_fields());
        form.dispatch("grant", FieldEvent::Select("implicit".into())).unwrap();
        form.dispatch("url", FieldEvent::Change("https://example.com".into())).unwrap();
        form.dispatch("enabled", FieldEvent::Click).unwrap();
        form.submit();
        form.reset();

        assert_eq!(form.values().text("grant"), "code");
        assert_eq!(form.values().text("url"), "");
        assert!(!form.values().is_on("enabled"));
        assert!(!form.state().is_submitting());
    }

    #[test]
    fn test_reset_button_clears_control_state() {
        let mut fields = sample_fields();
        fields.push(FormField::password("secret").value("pw"));
        fields.push(FormField::reset("reset", "Reset"));
        let mut form = Form::new(fields);
        form.dispatch("secret", FieldEvent::ToggleVisibility).unwrap();
        assert!(form.renderer().password("secret").is_some());
        form.dispatch("reset", FieldEvent::Click).unwrap();
        assert!(form.renderer().password("secret").is_none());
    }

    #[test]
    fn test_listen_notified_on_every_change() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut form = Form::new(sample_fields()).listen(move |values| {
            sink.lock().unwrap().push(values.text("name").to_string());
        });
        form.dispatch("name", FieldEvent::Change("a".into())).unwrap();
        form.dispatch("name", FieldEvent::Change("ab".into())).unwrap();
        form.dispatch("name", FieldEvent::Blur).unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["a", "ab"]);
    }

    #[test]
    fn test_unknown_field() {
        let mut form = Form::new(sample_fields());
        assert!(matches!(
            form.dispatch("missing", FieldEvent::Blur),
            Err(FormsError::UnknownField(name)) if name == "missing"
        ));
        assert!(form.render_field("missing").is_err());
    }

    #[test]
    fn test_set_fields_keeps_existing_values() {
        let mut form = Form::new(sample_fields());
        form.dispatch("name", FieldEvent::Change("kept".into())).unwrap();
        form.set_fields(vec![
            FormField::text("name").value("ignored"),
            FormField::text("extra").value("new"),
        ]);
        assert_eq!(form.values().text("name"), "kept");
        assert_eq!(form.values().text("extra"), "new");
        assert!(!form.values().contains("grant"));
    }

    #[test]
    fn test_render_with_groups() {
        let mut form = Form::new(vec![
            FormField::text("a"),
            FormField::text("b"),
            FormField::text("c"),
        ])
        .with_groups(vec![Group::new(0, 2).class_name("two fields")]);
        let html = form.render();
        assert!(html.starts_with(r#"<form class="ui form" novalidate><div class="two fields">"#));
        let group_end = html.find("</div></div><div").unwrap();
        assert!(html[..group_end].contains(r#"name="b""#));
        assert!(!html[..group_end].contains(r#"name="c""#));
        assert!(html.ends_with("</form>"));
    }

    #[test]
    fn test_values_json() {
        let form = Form::new(vec![FormField::text("a").value("x"), FormField::toggle("b")]);
        assert_eq!(form.values_json().unwrap(), r#"{"a":"x","b":false}"#);
    }
}
