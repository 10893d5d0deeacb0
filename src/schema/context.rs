//! Validation context
//!
//! Created fresh for each field visit and discarded afterwards.

use super::types::Schema;
use crate::registry::Registry;
use crate::value::{Map, Value};

static EMPTY_SCHEMA: Schema = Schema::new();
static EMPTY_MAP: Map = Map::new();
static UNDEFINED: Value = Value::Undefined;

/// Everything a validator may inspect about the field being validated
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    /// Field path, bare at the top level and dotted when nested
    pub key: String,
    /// The field's input value
    pub value: Value,
    /// The object this field belongs to
    pub input: &'a Value,
    /// The outermost object passed to `validate`
    pub root: &'a Value,
    /// The schema the field belongs to
    pub schema: &'a Schema,
    /// Fields of the current object validated so far
    pub output: &'a Map,
    /// Registry names are resolved against
    pub registry: &'a Registry,
}

impl<'a> ValidationContext<'a> {
    /// Context for a standalone value with no surrounding object, resolving
    /// names against the global registry.
    pub fn for_value(key: impl Into<String>, value: Value) -> ValidationContext<'static> {
        ValidationContext {
            key: key.into(),
            value,
            input: &UNDEFINED,
            root: &UNDEFINED,
            schema: &EMPTY_SCHEMA,
            output: &EMPTY_MAP,
            registry: Registry::global(),
        }
    }

    /// Same context, different value
    pub fn with_value(&self, value: Value) -> Self {
        Self {
            value,
            ..self.clone()
        }
    }

    /// Same context, different key and value (used for array elements)
    pub fn with_key_and_value(&self, key: String, value: Value) -> Self {
        Self {
            key,
            value,
            ..self.clone()
        }
    }

    /// Renders the context as an object for dynamic function validators
    pub fn to_value(&self) -> Value {
        Value::object([
            ("key", Value::from(self.key.as_str())),
            ("value", self.value.clone()),
            ("input", self.input.clone()),
            ("root", self.root.clone()),
            ("output", Value::Object(self.output.clone())),
        ])
    }
}
