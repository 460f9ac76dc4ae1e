//! HTML primitives shared by every control.
//!
//! Widgets render a single HTML element for a field name, a current value and
//! a set of extra attributes. Attributes are kept in a sorted map so output is
//! deterministic; an attribute with an empty value renders bare
//! (`disabled`, `checked`, `readonly`).

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

/// Extra HTML attributes, rendered in name order.
pub type Attrs = BTreeMap<String, String>;

/// A trait for HTML widgets.
pub trait Widget: Send + Sync + fmt::Debug {
    /// Renders the widget as an HTML string.
    fn render(&self, name: &str, value: &str, attrs: &Attrs) -> String;
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats attributes as ` key="value"`, with empty values rendered bare.
pub fn render_attrs(attrs: &Attrs) -> String {
    let mut out = String::new();
    for (key, value) in attrs {
        if value.is_empty() {
            let _ = write!(out, " {key}");
        } else {
            let _ = write!(out, r#" {key}="{}""#, escape(value));
        }
    }
    out
}

/// Renders error messages as `<ul class="errorlist">`, or nothing when empty.
pub fn errors_as_ul(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(r#"<ul class="errorlist">{items}</ul>"#)
}

/// Returns the HTML `id` used for a field's control.
pub fn field_id(name: &str) -> String {
    format!("id_{name}")
}

/// Renders a `<label>` for a control, or nothing when the label is empty.
pub fn label_tag(for_id: &str, label: &str, required: bool) -> String {
    if label.is_empty() {
        return String::new();
    }
    let class = if required { r#" class="required""# } else { "" };
    format!(r#"<label for="{for_id}"{class}>{}</label>"#, escape(label))
}

/// Renders a hint paragraph, or nothing when there is no hint.
pub fn hint_tag(hint: Option<&str>) -> String {
    hint.filter(|h| !h.is_empty())
        .map(|h| format!(r#"<p class="hint">{}</p>"#, escape(h)))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Built-in widgets
// ---------------------------------------------------------------------------

/// An `<input>` of a given type.
#[derive(Debug, Clone)]
pub struct Input {
    input_type: &'static str,
}

impl Input {
    /// Creates an input with the given `type` attribute.
    pub const fn new(input_type: &'static str) -> Self {
        Self { input_type }
    }

    /// `<input type="password">`.
    pub const fn password() -> Self {
        Self::new("password")
    }
}

impl Widget for Input {
    fn render(&self, name: &str, value: &str, attrs: &Attrs) -> String {
        format!(
            r#"<input type="{}" name="{name}" value="{}"{} />"#,
            self.input_type,
            escape(value),
            render_attrs(attrs)
        )
    }
}

/// A `<textarea>` widget.
#[derive(Debug, Clone)]
pub struct Textarea;

impl Widget for Textarea {
    fn render(&self, name: &str, value: &str, attrs: &Attrs) -> String {
        format!(
            r#"<textarea name="{name}"{}>{}</textarea>"#,
            render_attrs(attrs),
            escape(value)
        )
    }
}

/// A `<select>` widget.
#[derive(Debug, Clone)]
pub struct Select {
    /// The available choices as `(value, display_label)` pairs.
    pub choices: Vec<(String, String)>,
    /// Text of an empty leading option, if any.
    pub placeholder: Option<String>,
}

impl Select {
    /// Creates a new `Select` with the given choices.
    pub fn new(choices: Vec<(String, String)>) -> Self {
        Self {
            choices,
            placeholder: None,
        }
    }
}

impl Widget for Select {
    fn render(&self, name: &str, value: &str, attrs: &Attrs) -> String {
        let mut options = String::new();
        if let Some(placeholder) = &self.placeholder {
            let selected = if value.is_empty() { " selected" } else { "" };
            let _ = write!(
                options,
                r#"<option value=""{selected}>{}</option>"#,
                escape(placeholder)
            );
        }
        for (val, label) in &self.choices {
            let selected = if val == value { " selected" } else { "" };
            let _ = write!(
                options,
                r#"<option value="{}"{selected}>{}</option>"#,
                escape(val),
                escape(label)
            );
        }
        format!(
            r#"<select name="{name}"{}>{options}</select>"#,
            render_attrs(attrs)
        )
    }
}

/// A single radio or checkbox input; `value` is the option's value and the
/// checked state is passed through `attrs`.
#[derive(Debug, Clone)]
pub struct ChoiceInput {
    input_type: &'static str,
}

impl ChoiceInput {
    /// `<input type="radio">`.
    pub const fn radio() -> Self {
        Self {
            input_type: "radio",
        }
    }

    /// `<input type="checkbox">`.
    pub const fn checkbox() -> Self {
        Self {
            input_type: "checkbox",
        }
    }
}

impl Widget for ChoiceInput {
    fn render(&self, name: &str, value: &str, attrs: &Attrs) -> String {
        format!(
            r#"<input type="{}" name="{name}" value="{}"{} />"#,
            self.input_type,
            escape(value),
            render_attrs(attrs)
        )
    }
}

/// A `<button>`; `value` is the button text.
#[derive(Debug, Clone)]
pub struct Button {
    button_type: &'static str,
}

impl Button {
    /// `<button type="submit">`.
    pub const fn submit() -> Self {
        Self {
            button_type: "submit",
        }
    }

    /// `<button type="reset">`.
    pub const fn reset() -> Self {
        Self {
            button_type: "reset",
        }
    }

    /// `<button type="button">`.
    pub const fn plain() -> Self {
        Self {
            button_type: "button",
        }
    }
}

impl Widget for Button {
    fn render(&self, name: &str, value: &str, attrs: &Attrs) -> String {
        format!(
            r#"<button type="{}" name="{name}"{}>{}</button>"#,
            self.button_type,
            render_attrs(attrs),
            escape(value)
        )
    }
}
