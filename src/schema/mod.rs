//! Schema subsystem for blueprint
//!
//! Schemas are ordered field-to-node mappings, evaluated against dynamic
//! value trees by a [`Blueprint`].
//!
//! # Design Principles
//!
//! - Every field is visited, errors are aggregated
//! - Output holds only declared fields
//! - Validators never throw through the evaluator
//! - Names resolve through the registry at validation time

mod blueprint;
mod context;
mod errors;
mod types;
mod validator;

pub use blueprint::Blueprint;
pub use context::ValidationContext;
pub use errors::{codes, SchemaError, SchemaResult, ValidationError};
pub use types::{Schema, SchemaNode};
pub use validator::{IntoOutcome, Outcome, Validator};

pub(crate) use blueprint::validate_nested;
pub(crate) use validator::{expectation_failed, guarded};

use crate::registry::Registry;

/// Builds a blueprint against the global registry.
///
/// # Errors
///
/// Returns `SchemaError::InvalidName` if `name` is blank.
pub fn blueprint(name: &str, schema: Schema) -> SchemaResult<Blueprint> {
    Registry::global().blueprint(name, schema)
}
