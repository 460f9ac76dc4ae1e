//! Composite controls.
//!
//! Each control keeps transient local state (visibility, the parsed token
//! list, the contents of its input boxes) and serializes edits back into the
//! single string value owned by the form. The renderer keeps one control per
//! field name so the state survives re-renders.

pub mod password;
pub mod query_params;
pub mod scopes;

pub use password::PasswordControl;
pub use query_params::{QueryParamError, QueryParameter, QueryParamsControl};
pub use scopes::{Scope, ScopesControl};
