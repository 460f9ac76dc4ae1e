//! # idp-forms-core
//!
//! Foundation types shared by the form engine and the facade crate.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Engine settings with defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`i18n`] - Translation catalogs and message lookup

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{FormsError, FormsResult};
pub use settings::{NumericPastePolicy, Settings};
