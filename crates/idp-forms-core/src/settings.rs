//! Settings for the form engine.
//!
//! [`Settings`] carries everything that is configurable about the engine:
//! logging, the active language and where its translation catalogs live, and
//! how numeric inputs treat pasted text. Use
//! [`settings_loader`](crate::settings_loader) to read it from a file or the
//! environment.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a paste into a `type="number"` text field is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericPastePolicy {
    /// The whole paste is dropped unless it is made of ASCII digits only.
    #[default]
    Discard,
    /// Non-digit characters are removed and the rest is kept.
    Strip,
}

impl std::str::FromStr for NumericPastePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "discard" => Ok(Self::Discard),
            "strip" => Ok(Self::Strip),
            other => Err(format!("unknown numeric paste policy '{other}'")),
        }
    }
}

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use idp_forms_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.language_code, "en");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled. Selects pretty logs over JSON logs.
    pub debug: bool,
    /// The tracing filter directive (e.g. "info", "`idp_forms_engine=debug`").
    pub log_level: String,
    /// The language activated for message lookup.
    pub language_code: String,
    /// JSON translation catalogs to load, keyed by language code.
    pub translation_files: HashMap<String, PathBuf>,
    /// Paste handling for numeric text fields.
    pub numeric_paste_policy: NumericPastePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            language_code: "en".to_string(),
            translation_files: HashMap::new(),
            numeric_paste_policy: NumericPastePolicy::Discard,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
        assert!(settings.translation_files.is_empty());
        assert_eq!(settings.numeric_paste_policy, NumericPastePolicy::Discard);
    }

    #[test]
    fn test_paste_policy_from_str() {
        assert_eq!("strip".parse::<NumericPastePolicy>(), Ok(NumericPastePolicy::Strip));
        assert_eq!(
            "DISCARD".parse::<NumericPastePolicy>(),
            Ok(NumericPastePolicy::Discard)
        );
        assert!("keep".parse::<NumericPastePolicy>().is_err());
    }

    #[test]
    fn test_settings_serde_roundtrip() {
        let settings = Settings {
            numeric_paste_policy: NumericPastePolicy::Strip,
            ..Settings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains(r#""numeric_paste_policy":"strip""#));
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.numeric_paste_policy, NumericPastePolicy::Strip);
    }
}
