//! Translation catalog for loading and looking up translations.
//!
//! Catalogs live in a global, thread-safe registry keyed by language code.
//! They can be loaded from JSON or registered programmatically.
//!
//! ## JSON Format
//!
//! ```json
//! {
//!   "messages": {
//!     "Show password": "Passwort anzeigen",
//!     "Hide password": "Passwort verbergen"
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{OnceLock, RwLock};

use crate::error::{FormsError, FormsResult};

/// A translation catalog for a single language.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    /// Message translations: msgid -> translated string.
    messages: HashMap<String, String>,
}

/// The global translation catalog registry, keyed by language code.
fn global_catalogs() -> &'static RwLock<HashMap<String, TranslationCatalog>> {
    static CATALOGS: OnceLock<RwLock<HashMap<String, TranslationCatalog>>> = OnceLock::new();
    CATALOGS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn with_catalog<F, R>(language: &str, f: F) -> Option<R>
where
    F: FnOnce(&TranslationCatalog) -> Option<R>,
{
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs.get(language).and_then(f)
}

#[allow(clippy::significant_drop_tightening)]
fn with_catalog_mut<F>(language: &str, f: F)
where
    F: FnOnce(&mut TranslationCatalog),
{
    let mut catalogs = global_catalogs().write().expect("catalog lock poisoned");
    let catalog = catalogs.entry(language.to_string()).or_default();
    f(catalog);
}

// ── Registration API ─────────────────────────────────────────────────────

/// Registers message translations for a language.
///
/// Entries are merged into any existing catalog, overwriting duplicates.
///
/// # Examples
///
/// ```
/// use idp_forms_core::i18n::catalog;
///
/// catalog::register_translations("fr-FR", vec![
///     ("Show password", "Afficher le mot de passe"),
/// ]);
/// ```
pub fn register_translations(language: &str, entries: Vec<(&str, &str)>) {
    with_catalog_mut(language, |catalog| {
        for (msgid, translated) in entries {
            catalog
                .messages
                .insert(msgid.to_string(), translated.to_string());
        }
    });
}

/// Loads translations from a JSON string.
///
/// Only the top-level `"messages"` object is read; it is optional.
///
/// # Errors
///
/// Returns [`FormsError::CatalogError`] if the JSON is invalid.
pub fn load_from_json(language: &str, json_str: &str) -> FormsResult<()> {
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormsError::CatalogError(format!("Invalid JSON for '{language}': {e}")))?;

    with_catalog_mut(language, |catalog| {
        if let Some(messages) = value.get("messages").and_then(|v| v.as_object()) {
            for (msgid, translated) in messages {
                if let Some(t) = translated.as_str() {
                    catalog.messages.insert(msgid.clone(), t.to_string());
                }
            }
        }
    });

    Ok(())
}

/// Loads translations for a language from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_from_file(language: &str, path: impl AsRef<Path>) -> FormsResult<()> {
    let content = std::fs::read_to_string(path.as_ref())?;
    load_from_json(language, &content)
}

// ── Lookup API ───────────────────────────────────────────────────────────

/// Looks up a translation in the catalog.
pub fn translate(language: &str, msgid: &str) -> Option<String> {
    with_catalog(language, |catalog| catalog.messages.get(msgid).cloned())
}

/// Returns `true` if translations are registered for the given language.
pub fn has_language(language: &str) -> bool {
    let catalogs = global_catalogs().read().expect("catalog lock poisoned");
    catalogs.contains_key(language)
}

/// Clears all translations for a given language.
pub fn clear_language(language: &str) {
    let mut catalogs = global_catalogs().write().expect("catalog lock poisoned");
    catalogs.remove(language);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_translate() {
        register_translations("test_lang1", vec![("foo", "bar")]);
        assert_eq!(translate("test_lang1", "foo"), Some("bar".to_string()));
        assert_eq!(translate("test_lang1", "baz"), None);
    }

    #[test]
    fn test_translate_missing_language() {
        assert_eq!(translate("nonexistent_lang", "hello"), None);
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "messages": {
                "Show password": "Mostrar contraseña",
                "Hide password": "Ocultar contraseña"
            }
        }"#;

        load_from_json("test_json_lang", json).unwrap();
        assert_eq!(
            translate("test_json_lang", "Hide password"),
            Some("Ocultar contraseña".to_string())
        );
    }

    #[test]
    fn test_load_from_json_invalid() {
        let result = load_from_json("bad", "not json");
        assert!(matches!(result, Err(FormsError::CatalogError(_))));
    }

    #[test]
    fn test_load_from_json_empty() {
        assert!(load_from_json("test_empty_lang", "{}").is_ok());
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = load_from_file("test_file_lang", "/nonexistent/catalog.json");
        assert!(matches!(result, Err(FormsError::IoError(_))));
    }

    #[test]
    fn test_merge_translations() {
        register_translations("test_merge_lang", vec![("A", "1"), ("B", "2")]);
        register_translations("test_merge_lang", vec![("B", "3"), ("C", "4")]);

        assert_eq!(translate("test_merge_lang", "A"), Some("1".to_string()));
        assert_eq!(translate("test_merge_lang", "B"), Some("3".to_string()));
        assert_eq!(translate("test_merge_lang", "C"), Some("4".to_string()));
    }

    #[test]
    fn test_clear_language() {
        register_translations("test_clear_lang", vec![("x", "y")]);
        assert!(has_language("test_clear_lang"));
        clear_language("test_clear_lang");
        assert!(!has_language("test_clear_lang"));
    }
}
