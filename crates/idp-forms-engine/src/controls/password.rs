//! Masked text input with a visibility toggle.

use idp_forms_core::i18n;

use crate::widgets::{escape, Attrs, Input, Widget};

/// Visibility state of a password control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordControl {
    is_show: bool,
}

impl PasswordControl {
    /// A masked control.
    pub const fn new() -> Self {
        Self { is_show: false }
    }

    /// Whether the value is currently shown in clear text.
    pub const fn is_show(&self) -> bool {
        self.is_show
    }

    /// Flips visibility.
    ///
    /// The icon is inert while the value is empty, so this returns `false`
    /// and changes nothing in that case.
    pub fn toggle_visibility(&mut self, value: &str) -> bool {
        if value.is_empty() {
            return false;
        }
        self.is_show = !self.is_show;
        true
    }

    /// CSS classes of the eye icon.
    pub fn icon_class(&self, value: &str) -> String {
        let eye = if self.is_show { "eye slash" } else { "eye" };
        if value.is_empty() {
            format!("{eye} disabled link icon")
        } else {
            format!("{eye} link icon")
        }
    }

    /// Renders the input and its eye icon.
    ///
    /// `show_hint` and `hide_hint` override the default tooltips.
    pub fn render(
        &self,
        name: &str,
        value: &str,
        attrs: &Attrs,
        show_hint: Option<&str>,
        hide_hint: Option<&str>,
    ) -> String {
        let input = if self.is_show {
            Input::new("text")
        } else {
            Input::password()
        };
        let tooltip = if self.is_show {
            hide_hint.map_or_else(|| i18n::gettext("Hide password"), str::to_string)
        } else {
            show_hint.map_or_else(|| i18n::gettext("Show password"), str::to_string)
        };
        format!(
            r#"<div class="ui icon input password-field">{}<i class="{}" title="{}" data-action="toggle-visibility"></i></div>"#,
            input.render(name, value, attrs),
            self.icon_class(value),
            escape(&tooltip)
        )
    }
}
