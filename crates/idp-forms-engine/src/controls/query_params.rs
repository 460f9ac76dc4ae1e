//! `&`-joined `name=value` pairs edited as a list.
//!
//! The form stores parameters as one string (`"a=1&b=2"`). The control
//! keeps the parsed list, two input boxes for the next parameter and an
//! inline error for rejected input.

use std::fmt::Write as _;

use thiserror::Error;

use idp_forms_core::i18n;

use crate::widgets::{errors_as_ul, escape, render_attrs, Attrs};

/// Characters that may not appear in a parameter name or value.
pub const ILLEGAL_CHARACTERS: [char; 4] = [',', '&', '=', '?'];

/// Why a parameter could not be added.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParamError {
    /// The name box is empty.
    #[error("query parameter name is empty")]
    EmptyName,

    /// The value box is empty.
    #[error("query parameter value is empty")]
    EmptyValue,

    /// The name or value contains a reserved character.
    #[error("query parameter contains an illegal character: {0}")]
    IllegalCharacter(char),
}

impl QueryParamError {
    /// The message rendered inline under the input boxes, if any.
    ///
    /// Empty boxes are rejected silently.
    pub fn inline_message(&self) -> Option<String> {
        match self {
            Self::EmptyName | Self::EmptyValue => None,
            Self::IllegalCharacter(c) => Some(i18n::gettext_with(
                "Query parameter contains an illegal character: {character}",
                &[("character", &c.to_string())],
            )),
        }
    }
}

/// One named parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter value.
    pub value: String,
}

impl QueryParameter {
    /// The `name=value` form used for serialization and removal.
    pub fn as_pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// Parses `a=1&b=2` into parameters.
///
/// Only the segment between the first and second `=` is kept as the value,
/// so `a=1=2` parses to `a` = `1`. A pair without `=` has an empty value.
pub fn parse_query_params(value: &str) -> Vec<QueryParameter> {
    value
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let mut parts = pair.split('=');
            QueryParameter {
                name: parts.next().unwrap_or_default().to_string(),
                value: parts.next().unwrap_or_default().to_string(),
            }
        })
        .collect()
}

/// Joins parameters as `name=value` pairs separated by `&`.
pub fn serialize_query_params(params: &[QueryParameter]) -> String {
    params
        .iter()
        .map(QueryParameter::as_pair)
        .collect::<Vec<_>>()
        .join("&")
}

fn find_illegal(text: &str) -> Option<char> {
    text.chars().find(|c| ILLEGAL_CHARACTERS.contains(c))
}

/// Local state of a query-parameters editor.
#[derive(Debug, Clone, Default)]
pub struct QueryParamsControl {
    params: Vec<QueryParameter>,
    name_input: String,
    value_input: String,
    error: Option<String>,
    synced_from: Option<String>,
}

impl QueryParamsControl {
    /// Creates a control initialized from a stored value.
    pub fn new(value: &str) -> Self {
        let mut control = Self::default();
        control.sync(value);
        control
    }

    /// Re-parses the list if the stored value changed since the last sync.
    ///
    /// A re-parse drops any inline error left by an earlier rejected add.
    pub fn sync(&mut self, value: &str) {
        if self.synced_from.as_deref() != Some(value) {
            self.params = parse_query_params(value);
            self.error = None;
            self.synced_from = Some(value.to_string());
        }
    }

    /// The parsed parameters.
    pub fn params(&self) -> &[QueryParameter] {
        &self.params
    }

    /// The inline error, if the last add was rejected for an illegal character.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replaces the contents of the name box.
    pub fn set_name_input(&mut self, text: impl Into<String>) {
        self.name_input = text.into();
    }

    /// Replaces the contents of the value box.
    pub fn set_value_input(&mut self, text: impl Into<String>) {
        self.value_input = text.into();
    }

    /// The current list, serialized.
    pub fn serialized(&self) -> String {
        serialize_query_params(&self.params)
    }

    /// Adds the parameter typed into the input boxes.
    ///
    /// If the name already exists the new value is prepended to the old one
    /// with a space. On success the boxes and error are cleared and the new
    /// serialized value returned.
    ///
    /// # Errors
    ///
    /// Returns [`QueryParamError`] if either box is empty or contains one of
    /// [`ILLEGAL_CHARACTERS`]; the list is left unchanged.
    pub fn add(&mut self) -> Result<String, QueryParamError> {
        let result = self.try_add();
        if let Err(err) = &result {
            if let Some(message) = err.inline_message() {
                self.error = Some(message);
            }
        }
        result
    }

    fn try_add(&mut self) -> Result<String, QueryParamError> {
        if self.name_input.is_empty() {
            return Err(QueryParamError::EmptyName);
        }
        if self.value_input.is_empty() {
            return Err(QueryParamError::EmptyValue);
        }
        if let Some(c) = find_illegal(&self.name_input).or_else(|| find_illegal(&self.value_input)) {
            return Err(QueryParamError::IllegalCharacter(c));
        }

        let name = std::mem::take(&mut self.name_input);
        let value = std::mem::take(&mut self.value_input);
        if let Some(existing) = self.params.iter_mut().find(|p| p.name == name) {
            existing.value = format!("{value} {}", existing.value);
        } else {
            self.params.push(QueryParameter { name, value });
        }
        self.error = None;
        Ok(self.commit())
    }

    /// Removes the first parameter whose `name=value` form matches.
    ///
    /// Returns the new serialized value, or `None` if nothing matched.
    pub fn remove(&mut self, name: &str, value: &str) -> Option<String> {
        let target = format!("{name}={value}");
        let index = self.params.iter().position(|p| p.as_pair() == target)?;
        self.params.remove(index);
        Some(self.commit())
    }

    fn commit(&mut self) -> String {
        let serialized = self.serialized();
        self.synced_from = Some(serialized.clone());
        serialized
    }

    /// Renders the two input boxes, the add button, the inline error and
    /// the parameter list.
    pub fn render(&self, name: &str, attrs: &Attrs, editable: bool) -> String {
        let mut name_attrs = attrs.clone();
        name_attrs.insert("placeholder".to_string(), i18n::gettext("Parameter name"));
        let mut value_attrs = attrs.clone();
        value_attrs.insert("placeholder".to_string(), i18n::gettext("Parameter value"));

        let mut html = String::from(r#"<div class="query-params-field"><div class="query-param-input">"#);
        let _ = write!(
            html,
            r#"<input type="text" name="{name}-name" value="{}"{} />"#,
            escape(&self.name_input),
            render_attrs(&name_attrs)
        );
        let _ = write!(
            html,
            r#"<input type="text" name="{name}-value" value="{}"{} />"#,
            escape(&self.value_input),
            render_attrs(&value_attrs)
        );
        let disabled = if editable { "" } else { " disabled" };
        let _ = write!(
            html,
            r#"<button type="button" data-action="add-param"{disabled}>{}</button></div>"#,
            escape(&i18n::gettext("Add"))
        );
        if let Some(error) = &self.error {
            html.push_str(&errors_as_ul(std::slice::from_ref(error)));
        }

        html.push_str(r#"<div class="query-param-list">"#);
        let remove = escape(&i18n::gettext("Remove"));
        for param in &self.params {
            let pair = escape(&param.as_pair());
            if editable {
                let _ = write!(
                    html,
                    r#"<span class="ui label query-param">{pair}<i class="delete icon" title="{remove}" data-param-name="{}" data-param-value="{}"></i></span>"#,
                    escape(&param.name),
                    escape(&param.value)
                );
            } else {
                let _ = write!(html, r#"<span class="ui label query-param">{pair}</span>"#);
            }
        }
        let _ = write!(
            html,
            r#"</div><input type="hidden" name="{name}" value="{}" /></div>"#,
            escape(&self.serialized())
        );
        html
    }
}
