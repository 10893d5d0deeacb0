//! Validator registry
//!
//! Holds named raw validators and named types. Lookup checks raw validators
//! first, then parses the name into a base type and a variant.
//!
//! The registry is a cheap handle: clones share the same entries. Writes
//! take a write lock, and lookups hand out cloned validators so no lock is
//! held while validating.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use regex::Regex;
use tracing::debug;

use super::builtins::{self, expression};
use super::types::{TypeRef, TypeValidators};
use crate::schema::{
    validate_nested, Blueprint, IntoOutcome, Schema, SchemaError, SchemaNode, SchemaResult,
    ValidationContext, Validator,
};

#[derive(Default)]
struct Entries {
    validators: HashMap<String, Validator>,
    types: HashMap<String, TypeValidators>,
}

/// Shared table of named validators and types
#[derive(Clone, Default)]
pub struct Registry {
    entries: Arc<RwLock<Entries>>,
}

/// Source of a blueprint registration
#[derive(Debug, Clone)]
pub enum BlueprintSource {
    Schema(Schema),
    Blueprint(Blueprint),
}

impl From<Schema> for BlueprintSource {
    fn from(schema: Schema) -> Self {
        BlueprintSource::Schema(schema)
    }
}

impl From<Blueprint> for BlueprintSource {
    fn from(bp: Blueprint) -> Self {
        BlueprintSource::Blueprint(bp)
    }
}

impl From<&Blueprint> for BlueprintSource {
    fn from(bp: &Blueprint) -> Self {
        BlueprintSource::Blueprint(bp.clone())
    }
}

/// A regular expression, compiled or not
#[derive(Debug, Clone)]
pub enum Pattern {
    Source(String),
    Compiled(Regex),
}

impl Pattern {
    fn compile(self) -> SchemaResult<Regex> {
        match self {
            Pattern::Source(source) => Ok(Regex::new(&source)?),
            Pattern::Compiled(re) => Ok(re),
        }
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::Source(source.to_string())
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Pattern::Source(source)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern::Compiled(re)
    }
}

fn check_name(name: &str, operation: &'static str) -> SchemaResult<()> {
    if name.trim().is_empty() {
        Err(SchemaError::InvalidValidatorName { operation })
    } else {
        Ok(())
    }
}

impl Registry {
    /// An empty registry, without built-in types
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry holding the built-in types
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtins::install(&registry);
        registry
    }

    /// The process-wide registry, seeded with the built-in types on first use
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::with_builtins)
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a raw validator under an exact name. A raw validator has
    /// no derived variants and shadows any type with the same spelling.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidValidatorName` if `name` is blank.
    pub fn register_validator<F, R>(&self, name: &str, f: F) -> SchemaResult<Validator>
    where
        F: Fn(&ValidationContext<'_>) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        check_name(name, "registerValidator")?;
        let validator = Validator::named(name, f);
        self.write()
            .validators
            .insert(name.to_string(), validator.clone());
        debug!(event = "VALIDATOR_REGISTERED", name = name);
        Ok(validator)
    }

    /// Registers a type, deriving its optional and array variants.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidValidatorName` if `name` is blank.
    pub fn register_type<F, R>(&self, name: &str, f: F) -> SchemaResult<TypeValidators>
    where
        F: Fn(&ValidationContext<'_>) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        check_name(name, "registerType")?;
        Ok(self.install_type(name, Validator::named(name, f)))
    }

    /// Registers a blueprint as a type, so other schemas can reference it
    /// by name (`"person"`, `"person?"`, `"person[]"`). Referencing fields
    /// report nested failures under their own key.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidName` if `name` is blank.
    pub fn register_blueprint(
        &self,
        name: &str,
        source: impl Into<BlueprintSource>,
    ) -> SchemaResult<Blueprint> {
        let schema = match source.into() {
            BlueprintSource::Schema(schema) => schema,
            BlueprintSource::Blueprint(bp) => bp.schema().clone(),
        };
        let bp = self.blueprint(name, schema)?;

        // Nested validation resolves against the caller's registry, so the
        // type does not hold a handle to this one.
        let schema = bp.shared_schema();
        self.install_type(
            name,
            Validator::new(move |ctx: &ValidationContext<'_>| validate_nested(&schema, ctx)),
        );
        debug!(event = "BLUEPRINT_REGISTERED", name = name, fields = bp.schema().len());
        Ok(bp)
    }

    /// Registers a regular expression as a type. Only strings can match.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidValidatorName` if `name` is blank, or
    /// `SchemaError::InvalidExpression` if the pattern does not compile.
    pub fn register_expression(
        &self,
        name: &str,
        pattern: impl Into<Pattern>,
    ) -> SchemaResult<TypeValidators> {
        check_name(name, "registerExpression")?;
        let re = pattern.into().compile()?;
        debug!(event = "EXPRESSION_REGISTERED", name = name, pattern = re.as_str());
        Ok(self.install_type(name, expression(re)))
    }

    /// Installs all four variants of a type, evicting raw validators
    /// registered under any of their spellings.
    pub(crate) fn install_type(&self, name: &str, base: Validator) -> TypeValidators {
        let types = TypeValidators::derive(name, base);
        {
            let mut entries = self.write();
            for (spelled, _) in types.iter() {
                entries.validators.remove(&spelled);
            }
            entries.types.insert(name.to_string(), types.clone());
        }
        debug!(event = "TYPE_REGISTERED", name = name);
        types
    }

    /// Looks up a validator by spelled name
    pub fn get_validator(&self, name: &str) -> Option<Validator> {
        self.resolve(name)
    }

    /// Snapshot of every resolvable name
    pub fn get_validators(&self) -> HashMap<String, Validator> {
        let entries = self.read();
        let mut all: HashMap<String, Validator> = entries
            .types
            .values()
            .flat_map(|types| {
                types
                    .iter()
                    .map(|(name, validator)| (name, validator.clone()))
                    .collect::<Vec<_>>()
            })
            .collect();
        for (name, validator) in &entries.validators {
            all.insert(name.clone(), validator.clone());
        }
        all
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Resolves a spelled name: raw validators first, then types.
    pub fn resolve(&self, name: &str) -> Option<Validator> {
        let entries = self.read();
        if let Some(validator) = entries.validators.get(name) {
            return Some(validator.clone());
        }

        let reference = TypeRef::parse(name);
        entries
            .types
            .get(reference.base())
            .map(|types| types.get(reference.variant()).clone())
    }

    /// Resolves any schema node to a validator. Only references can fail.
    pub fn resolve_node(&self, node: &SchemaNode) -> Option<Validator> {
        match node {
            SchemaNode::Reference(name) => self.resolve(name),
            SchemaNode::Validator(validator) => Some(validator.clone()),
            SchemaNode::Expression(re) => Some(expression(re.clone())),
            SchemaNode::Nested(schema) => {
                let schema = schema.clone();
                Some(Validator::new(move |ctx: &ValidationContext<'_>| {
                    validate_nested(&schema, ctx)
                }))
            }
        }
    }

    /// Builds a blueprint bound to this registry.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidName` if `name` is blank.
    pub fn blueprint(&self, name: &str, schema: Schema) -> SchemaResult<Blueprint> {
        Blueprint::build(name, schema, self.clone())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.read();
        f.debug_struct("Registry")
            .field("validators", &entries.validators.len())
            .field("types", &entries.types.len())
            .finish()
    }
}
