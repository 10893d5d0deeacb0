//! blueprint - A declarative, registry-driven runtime validator
//!
//! Schemas map field names to named types, patterns, nested schemas or
//! validator functions. A [`Blueprint`] evaluates a dynamic [`Value`] tree
//! against its schema and returns either a cleaned copy holding only the
//! declared fields, or every failure at once.
//!
//! ```
//! use blueprint::{blueprint, gt, optional, Schema, Value};
//!
//! let person = blueprint(
//!     "person",
//!     Schema::new()
//!         .field("name", "string")
//!         .field("age", optional(gt(0.0).unwrap())),
//! )
//! .unwrap();
//!
//! let input = Value::from(serde_json::json!({ "name": " Ada ", "extra": true }));
//! let output = person.validate(&input).unwrap();
//! assert_eq!(output.get("name"), &Value::from("Ada"));
//! assert!(output.get("extra").is_undefined());
//! ```

pub mod comparators;
pub mod config;
pub mod is;
pub mod registry;
pub mod schema;
pub mod value;

pub use comparators::{gt, gte, lt, lte, optional, range, required, Comparator, Optional, Range, RangeOptions, Required};
pub use config::{KeyStyle, Options};
pub use registry::{
    expression, get_validator, get_validators, register_blueprint, register_expression, register_type,
    register_validator, Registry, TypeRef, TypeValidators, Variant,
};
pub use schema::{
    blueprint, Blueprint, IntoOutcome, Outcome, Schema, SchemaError, SchemaNode, SchemaResult,
    ValidationContext, ValidationError, Validator,
};
pub use value::{FunctionKind, FunctionValue, Map, Value};
