//! # idp-forms-engine
//!
//! Declarative form rendering and validation. A [`FormField`] describes one
//! field; [`InnerField`] renders it to HTML and routes UI events for it back
//! to the owning form through the [`FormProps`] handler contract; [`Form`]
//! is the container that owns the value mapping and implements that contract.
//!
//! ## Modules
//!
//! - [`value`] - Stored form values and the value mapping
//! - [`fields`] - Field descriptors and kind predicates
//! - [`events`] - UI events and their outcomes
//! - [`keys`] - Keystroke and paste filtering for numeric inputs
//! - [`widgets`] - HTML primitives shared by every control
//! - [`props`] - The parent/renderer handler contract
//! - [`controls`] - Password, scopes and query-parameter composite controls
//! - [`inner_field`] - The field renderer
//! - [`validation`] - Required and custom validation
//! - [`form`] - The form container

pub mod controls;
pub mod events;
pub mod fields;
pub mod form;
pub mod inner_field;
pub mod keys;
pub mod props;
pub mod validation;
pub mod value;
pub mod widgets;

pub use events::{EventOutcome, FieldEvent, KeyPress};
pub use fields::{Choice, FieldKind, FieldMeta, FormField, TextType};
pub use form::{Form, FormState, Group};
pub use inner_field::InnerField;
pub use props::{FieldError, FormProps};
pub use validation::Validation;
pub use value::{FormValue, FormValues};
