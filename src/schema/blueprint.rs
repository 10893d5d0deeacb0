//! Blueprints and the schema evaluator
//!
//! Evaluation semantics:
//! - Fields are visited in declaration order
//! - Every field is visited, failures do not short-circuit
//! - The output holds exactly the schema's fields, nothing else from input
//! - Nested schemas are validated recursively under dotted keys
//! - Errors are collected in order and reported together

use std::sync::Arc;

use tracing::{debug, warn};

use super::context::ValidationContext;
use super::errors::{SchemaError, SchemaResult, ValidationError};
use super::types::{make_path, Schema, SchemaNode};
use super::validator::Outcome;
use crate::config::{KeyStyle, Options};
use crate::registry::Registry;
use crate::value::{Map, Value};

/// A named schema bound to a registry
#[derive(Debug, Clone)]
pub struct Blueprint {
    name: Arc<str>,
    schema: Arc<Schema>,
    registry: Registry,
    options: Options,
}

impl Blueprint {
    pub(crate) fn build(name: &str, schema: Schema, registry: Registry) -> SchemaResult<Self> {
        if name.trim().is_empty() {
            return Err(SchemaError::InvalidName);
        }

        Ok(Self {
            name: Arc::from(name),
            schema: Arc::new(schema),
            registry,
            options: Options::default(),
        })
    }

    /// Builds a blueprint from a dynamic schema object against the global
    /// registry.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError` if the name is blank or the value is not a
    /// valid schema object.
    pub fn from_value(name: &str, schema: &Value) -> SchemaResult<Self> {
        if name.trim().is_empty() {
            return Err(SchemaError::InvalidName);
        }
        let schema = Schema::try_from(schema)?;
        Self::build(name, schema, Registry::global().clone())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn shared_schema(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns a copy of this blueprint using `options`
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Validates `input`, returning a new object holding only the schema's
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Invalid` listing every failing field.
    /// Nothing is returned for the passing fields in that case.
    pub fn validate(&self, input: &Value) -> Outcome {
        let prefix = match self.options.key_style {
            KeyStyle::Path => None,
            KeyStyle::Qualified => Some(self.name()),
        };

        match evaluate(&self.schema, prefix, input, input, &self.registry) {
            Ok(output) => Ok(Value::Object(output)),
            Err(messages) => Err(rejected(self.name(), messages)),
        }
    }
}

/// Validates the context's value against `schema` as a nested object keyed
/// under the context's key. Used by registered blueprints and by nested
/// schemas wrapped in `optional`/`required`.
pub(crate) fn validate_nested(schema: &Schema, ctx: &ValidationContext<'_>) -> Outcome {
    match evaluate(schema, Some(&ctx.key), &ctx.value, ctx.root, ctx.registry) {
        Ok(output) => Ok(Value::Object(output)),
        Err(messages) => Err(ValidationError::Invalid {
            name: ctx.key.clone(),
            messages,
        }),
    }
}

fn rejected(name: &str, messages: Vec<String>) -> ValidationError {
    debug!(event = "BLUEPRINT_REJECTED", blueprint = name, errors = messages.len());
    ValidationError::Invalid {
        name: name.to_string(),
        messages,
    }
}

/// Evaluates one object level. Returns the output map or the ordered list
/// of failure messages.
fn evaluate(
    schema: &Schema,
    prefix: Option<&str>,
    input: &Value,
    root: &Value,
    registry: &Registry,
) -> Result<Map, Vec<String>> {
    let mut output = Map::new();
    let mut errors = Vec::new();

    for (field, node) in schema.fields() {
        let key = make_path(prefix, field);
        let value = input.get(field);

        let validator = match node {
            SchemaNode::Nested(child) => {
                match evaluate(child, Some(&key), value, root, registry) {
                    Ok(nested) => {
                        output.insert(field.to_string(), Value::Object(nested));
                    }
                    Err(messages) => {
                        errors.extend(messages);
                        output.insert(field.to_string(), Value::Null);
                    }
                }
                continue;
            }
            other => registry.resolve_node(other),
        };

        let Some(validator) = validator else {
            let name = node.describe();
            warn!(event = "VALIDATOR_UNRESOLVED", key = %key, name = %name);
            errors.push(ValidationError::Unresolved { key, name }.to_string());
            continue;
        };

        let result = {
            let ctx = ValidationContext {
                key,
                value: value.clone(),
                input,
                root,
                schema,
                output: &output,
                registry,
            };
            validator.validate(&ctx)
        };

        match result {
            Ok(validated) => {
                output.insert(field.to_string(), validated);
            }
            Err(err) => errors.extend(err.messages()),
        }
    }

    if errors.is_empty() {
        Ok(output)
    } else {
        Err(errors)
    }
}
