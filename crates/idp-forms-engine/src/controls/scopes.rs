//! Space-delimited scope tokens edited as a list.
//!
//! The form stores scopes as one string (`"openid profile email"`). The
//! control parses it into [`Scope`] records whenever the stored value changes
//! and re-joins the list with a single space after every local edit.

use std::fmt::Write as _;

use idp_forms_core::i18n;

use crate::widgets::{escape, render_attrs, Attrs};

/// One scope token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    /// The token.
    pub value: String,
}

/// Splits a stored value on single spaces. Empty segments are dropped, so
/// the empty string yields no scopes.
pub fn parse_scopes(value: &str) -> Vec<Scope> {
    value
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| Scope {
            value: token.to_string(),
        })
        .collect()
}

/// Joins scopes with a single space.
pub fn serialize_scopes(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(|s| s.value.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Local state of a scopes editor.
#[derive(Debug, Clone, Default)]
pub struct ScopesControl {
    scopes: Vec<Scope>,
    input: String,
    synced_from: Option<String>,
}

impl ScopesControl {
    /// Creates a control initialized from a stored value.
    pub fn new(value: &str) -> Self {
        let mut control = Self::default();
        control.sync(value);
        control
    }

    /// Re-parses the list if the stored value changed since the last sync.
    pub fn sync(&mut self, value: &str) {
        if self.synced_from.as_deref() != Some(value) {
            self.scopes = parse_scopes(value);
            self.synced_from = Some(value.to_string());
        }
    }

    /// The parsed scopes.
    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// The contents of the input box.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replaces the contents of the input box.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// The current list, serialized.
    pub fn serialized(&self) -> String {
        serialize_scopes(&self.scopes)
    }

    /// Adds the trimmed input box contents as a new scope.
    ///
    /// Returns the new serialized value, or `None` when the candidate is
    /// empty or already present.
    pub fn add(&mut self) -> Option<String> {
        let candidate = self.input.trim();
        if candidate.is_empty() || self.scopes.iter().any(|s| s.value == candidate) {
            return None;
        }
        self.scopes.push(Scope {
            value: candidate.to_string(),
        });
        self.input.clear();
        Some(self.commit())
    }

    /// Removes the first scope equal to `token`.
    ///
    /// The default scope cannot be removed. Returns the new serialized value,
    /// or `None` if nothing was removed.
    pub fn remove(&mut self, token: &str, default_value: Option<&str>) -> Option<String> {
        if default_value == Some(token) {
            return None;
        }
        let index = self.scopes.iter().position(|s| s.value == token)?;
        self.scopes.remove(index);
        Some(self.commit())
    }

    fn commit(&mut self) -> String {
        let serialized = self.serialized();
        self.synced_from = Some(serialized.clone());
        serialized
    }

    /// Renders the input box, the add button and the token list.
    ///
    /// The default scope, when stored, is listed first without a delete
    /// affordance.
    pub fn render(
        &self,
        name: &str,
        default_value: Option<&str>,
        attrs: &Attrs,
        editable: bool,
    ) -> String {
        let mut input_attrs = attrs.clone();
        input_attrs
            .entry("placeholder".to_string())
            .or_insert_with(|| i18n::gettext("Scope"));

        let mut html = String::from(r#"<div class="scopes-field"><div class="scope-input">"#);
        let _ = write!(
            html,
            r#"<input type="text" name="{name}-input" value="{}"{} />"#,
            escape(&self.input),
            render_attrs(&input_attrs)
        );
        let disabled = if editable { "" } else { " disabled" };
        let _ = write!(
            html,
            r#"<button type="button" data-action="add-scope"{disabled}>{}</button></div>"#,
            escape(&i18n::gettext("Add"))
        );

        html.push_str(r#"<div class="scope-list">"#);
        let default_value =
            default_value.filter(|d| !d.is_empty() && self.scopes.iter().any(|s| s.value == *d));
        if let Some(default) = default_value {
            let _ = write!(
                html,
                r#"<span class="ui label scope default">{}</span>"#,
                escape(default)
            );
        }
        let remove = escape(&i18n::gettext("Remove"));
        for scope in self
            .scopes
            .iter()
            .filter(|s| default_value != Some(s.value.as_str()))
        {
            let token = escape(&scope.value);
            if editable {
                let _ = write!(
                    html,
                    r#"<span class="ui label scope">{token}<i class="delete icon" title="{remove}" data-scope="{token}"></i></span>"#
                );
            } else {
                let _ = write!(html, r#"<span class="ui label scope">{token}</span>"#);
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_without_mutation() {
        let control = ScopesControl::new("openid profile");
        assert_eq!(control.scopes().len(), 2);
        assert_eq!(control.serialized(), "openid profile");
    }

    #[test]
    fn test_empty_value_parses_to_empty_list() {
        assert!(parse_scopes("").is_empty());
        assert_eq!(ScopesControl::new("").serialized(), "");
    }

    #[test]
    fn test_add_appends_and_clears_input() {
        let mut control = ScopesControl::new("openid");
        control.set_input("  email ");
        assert_eq!(control.add(), Some("openid email".to_string()));
        assert_eq!(control.input(), "");
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut control = ScopesControl::new("openid email");
        control.set_input("email");
        assert_eq!(control.add(), None);
        assert_eq!(control.serialized(), "openid email");
    }

    #[test]
    fn test_add_blank_is_noop() {
        let mut control = ScopesControl::new("openid");
        control.set_input("   ");
        assert_eq!(control.add(), None);
    }

    #[test]
    fn test_remove_first_match() {
        let mut control = ScopesControl::new("openid profile email");
        assert_eq!(control.remove("profile", None), Some("openid email".to_string()));
        assert_eq!(control.remove("missing", None), None);
    }

    #[test]
    fn test_default_scope_not_removable() {
        let mut control = ScopesControl::new("openid profile");
        assert_eq!(control.remove("openid", Some("openid")), None);
        assert_eq!(control.serialized(), "openid profile");
    }

    #[test]
    fn test_sync_only_on_external_change() {
        let mut control = ScopesControl::new("openid");
        control.set_input("email");
        control.add();
        control.sync("openid email");
        assert_eq!(control.scopes().len(), 2);
        control.sync("address");
        assert_eq!(control.serialized(), "address");
    }

    #[test]
    fn test_render_default_without_delete() {
        let control = ScopesControl::new("openid profile");
        let html = control.render("scope", Some("openid"), &Attrs::new(), true);
        assert!(html.contains(r#"<span class="ui label scope default">openid</span>"#));
        assert!(html.contains(r#"data-scope="profile""#));
        assert!(!html.contains(r#"data-scope="openid""#));
        assert!(html.contains(r#"<input type="hidden" name="scope" value="openid profile" />"#));
    }

    #[test]
    fn test_render_default_only_when_stored() {
        let mut control = ScopesControl::new("profile");
        let html = control.render("scope", Some("openid"), &Attrs::new(), true);
        assert!(!html.contains("openid"));
        assert!(html.contains(r#"<input type="hidden" name="scope" value="profile" />"#));

        control.set_input("openid");
        assert_eq!(control.add(), Some("profile openid".to_string()));
        let html = control.render("scope", Some("openid"), &Attrs::new(), true);
        assert!(html.contains(r#"<span class="ui label scope default">openid</span>"#));
        assert!(!html.contains(r#"data-scope="openid""#));
    }

    #[test]
    fn test_render_read_only_has_no_delete() {
        let control = ScopesControl::new("openid profile");
        let html = control.render("scope", None, &Attrs::new(), false);
        assert!(!html.contains("delete icon"));
        assert!(html.contains("disabled"));
    }
}
