//! Message translation for labels, hints and error messages.
//!
//! The engine never hard-codes user-facing text at the call site; it asks
//! [`gettext`] or [`gettext_with`] using the English message as the msgid.
//! Unknown messages fall back to the msgid itself.
//!
//! ```
//! use idp_forms_core::i18n;
//!
//! i18n::catalog::register_translations("de-DE", vec![
//!     ("Show password", "Passwort anzeigen"),
//! ]);
//!
//! i18n::activate("de-DE");
//! assert_eq!(i18n::gettext("Show password"), "Passwort anzeigen");
//! i18n::deactivate();
//! assert_eq!(i18n::gettext("Show password"), "Show password");
//! ```

pub mod catalog;

use std::cell::RefCell;

thread_local! {
    static CURRENT_LANGUAGE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// The language used when none has been activated.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Activates the given language code for the current thread.
pub fn activate(language_code: &str) {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = Some(language_code.to_string());
    });
}

/// Deactivates the current thread's language setting, reverting to the default.
pub fn deactivate() {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the language code active on the current thread.
pub fn get_language() -> String {
    CURRENT_LANGUAGE.with(|cell| {
        cell.borrow()
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    })
}

/// Translates a message using the current thread's active language.
///
/// If no translation is found, returns the original `msgid`.
pub fn gettext(msgid: &str) -> String {
    let lang = get_language();
    catalog::translate(&lang, msgid).unwrap_or_else(|| msgid.to_string())
}

/// Translates a message and substitutes `{name}` placeholders.
///
/// # Examples
///
/// ```
/// use idp_forms_core::i18n;
///
/// let msg = i18n::gettext_with(
///     "Query parameter contains an illegal character: {character}",
///     &[("character", "&")],
/// );
/// assert_eq!(msg, "Query parameter contains an illegal character: &");
/// ```
pub fn gettext_with(msgid: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(gettext(msgid), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        deactivate();
    }

    #[test]
    fn test_activate_and_get_language() {
        setup();
        assert_eq!(get_language(), "en");
        activate("si-LK");
        assert_eq!(get_language(), "si-LK");
        deactivate();
        assert_eq!(get_language(), "en");
    }

    #[test]
    fn test_gettext_no_translation() {
        setup();
        assert_eq!(gettext("untranslated"), "untranslated");
    }

    #[test]
    fn test_gettext_with_translation() {
        setup();
        catalog::register_translations("pt-BR", vec![("Remove", "Remover")]);
        activate("pt-BR");
        assert_eq!(gettext("Remove"), "Remover");
        deactivate();
        assert_eq!(gettext("Remove"), "Remove");
    }

    #[test]
    fn test_gettext_with_params_translated() {
        setup();
        catalog::register_translations(
            "tr-TR",
            vec![("Illegal {character} in {field}", "{field} içinde geçersiz {character}")],
        );
        activate("tr-TR");
        let msg = gettext_with(
            "Illegal {character} in {field}",
            &[("character", "?"), ("field", "ad")],
        );
        assert_eq!(msg, "ad içinde geçersiz ?");
        deactivate();
    }

    #[test]
    fn test_gettext_with_missing_param_left_alone() {
        setup();
        assert_eq!(gettext_with("Hello {name}", &[]), "Hello {name}");
    }
}
