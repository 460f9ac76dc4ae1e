//! # idp-forms
//!
//! Declarative form rendering and validation.
//!
//! This is the meta-crate that re-exports the member crates and wires them
//! together from one [`Settings`](core::Settings) value. Depend on
//! `idp-forms` to get everything, or on the individual crates for finer
//! control.
//!
//! ```
//! use idp_forms::core::Settings;
//! use idp_forms::engine::{FieldEvent, FormField};
//!
//! let settings = Settings::default();
//! idp_forms::init(&settings).unwrap();
//!
//! let mut form = idp_forms::new_form(&settings, vec![
//!     FormField::number("port").label("Port"),
//! ]);
//! form.dispatch("port", FieldEvent::Paste("80a".into())).unwrap();
//! assert_eq!(form.values().text("port"), "");
//! ```

/// Error types, settings, logging and translations.
pub use idp_forms_core as core;

/// Field descriptors, composite controls, the renderer and the form container.
#[cfg(feature = "engine")]
pub use idp_forms_engine as engine;

pub use serde;
pub use serde_json;
pub use tracing;

use idp_forms_core::i18n;
use idp_forms_core::{FormsResult, Settings};

/// Applies settings process-wide.
///
/// Installs the tracing subscriber, loads every configured translation
/// catalog and activates the configured language on the calling thread.
///
/// # Errors
///
/// Returns an error if a translation file cannot be read or parsed.
pub fn init(settings: &Settings) -> FormsResult<()> {
    idp_forms_core::logging::setup_logging(settings);

    for (language, path) in &settings.translation_files {
        i18n::catalog::load_from_file(language, path)?;
        tracing::debug!(%language, path = %path.display(), "translation catalog loaded");
    }

    i18n::activate(&settings.language_code);
    tracing::debug!(language = %settings.language_code, "forms initialized");
    Ok(())
}

/// Creates a form configured from settings.
#[cfg(feature = "engine")]
pub fn new_form(settings: &Settings, fields: Vec<engine::FormField>) -> engine::Form {
    engine::Form::new(fields).with_paste_policy(settings.numeric_paste_policy)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_init_loads_catalogs_and_activates_language() {
        let path = std::env::temp_dir().join(format!("idp-forms-catalog-{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"{"messages": {"Add": "Ajouter"}}"#).unwrap();

        let mut settings = Settings {
            language_code: "fr-test".to_string(),
            ..Settings::default()
        };
        settings
            .translation_files
            .insert("fr-test".to_string(), path.clone());

        init(&settings).unwrap();
        assert_eq!(i18n::get_language(), "fr-test");
        assert_eq!(i18n::gettext("Add"), "Ajouter");

        i18n::deactivate();
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_init_missing_catalog_fails() {
        let mut settings = Settings::default();
        settings
            .translation_files
            .insert("xx".to_string(), "/nonexistent/xx.json".into());
        assert!(init(&settings).is_err());
    }

    #[cfg(feature = "engine")]
    #[test]
    fn test_new_form_uses_paste_policy() {
        use idp_forms_core::NumericPastePolicy;
        use engine::{FieldEvent, FormField};

        let settings = Settings {
            numeric_paste_policy: NumericPastePolicy::Strip,
            ..Settings::default()
        };
        let mut form = new_form(&settings, vec![FormField::number("port")]);
        form.dispatch("port", FieldEvent::Paste("8a0".into())).unwrap();
        assert_eq!(form.values().text("port"), "80");
    }
}
