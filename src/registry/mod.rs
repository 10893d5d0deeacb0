//! Validator registry subsystem
//!
//! Named validators, types and blueprints. The free functions here operate
//! on [`Registry::global`]; create a [`Registry`] directly for isolated
//! tables.

mod builtins;
mod store;
mod types;

pub use builtins::{expression, MAX_DECIMAL_PLACES};
pub use store::{BlueprintSource, Pattern, Registry};
pub use types::{TypeRef, TypeValidators, Variant};

use std::collections::HashMap;

use crate::schema::{Blueprint, IntoOutcome, SchemaResult, ValidationContext, Validator};

/// Registers a raw validator in the global registry
pub fn register_validator<F, R>(name: &str, f: F) -> SchemaResult<Validator>
where
    F: Fn(&ValidationContext<'_>) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Registry::global().register_validator(name, f)
}

/// Registers a type in the global registry
pub fn register_type<F, R>(name: &str, f: F) -> SchemaResult<TypeValidators>
where
    F: Fn(&ValidationContext<'_>) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Registry::global().register_type(name, f)
}

/// Registers a blueprint as a type in the global registry
pub fn register_blueprint(name: &str, source: impl Into<BlueprintSource>) -> SchemaResult<Blueprint> {
    Registry::global().register_blueprint(name, source)
}

/// Registers an expression type in the global registry
pub fn register_expression(name: &str, pattern: impl Into<Pattern>) -> SchemaResult<TypeValidators> {
    Registry::global().register_expression(name, pattern)
}

/// Looks up a validator in the global registry
pub fn get_validator(name: &str) -> Option<Validator> {
    Registry::global().get_validator(name)
}

/// Snapshot of the global registry
pub fn get_validators() -> HashMap<String, Validator> {
    Registry::global().get_validators()
}
