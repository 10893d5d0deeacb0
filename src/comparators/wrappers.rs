//! `optional` and `required` wrappers
//!
//! Both wrap any schema node (a name, a pattern, a validator, a comparator)
//! and resolve it against the context's registry when they run. Both are
//! immutable builders: every modifier returns a new wrapper.

use std::fmt;
use std::sync::Arc;

use crate::schema::{guarded, Outcome, SchemaNode, ValidationContext, ValidationError, Validator};
use crate::value::Value;

type FromFn = dyn Fn(&ValidationContext<'_>) -> Value + Send + Sync;
type DefaultFn = dyn Fn() -> Value + Send + Sync;

/// Value substituted for null/undefined by [`Optional`]
#[derive(Clone)]
pub enum DefaultValue {
    /// A fixed value. Function values are called to produce the default.
    Value(Value),
    /// Computed on every use
    Computed(Arc<DefaultFn>),
}

impl DefaultValue {
    fn produce(&self, ctx: &ValidationContext<'_>) -> Outcome {
        match self {
            DefaultValue::Value(Value::Function(func)) => guarded(ctx, || func.call(&[])),
            DefaultValue::Value(value) => Ok(value.clone()),
            DefaultValue::Computed(make) => guarded(ctx, || make()),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(value) => f.debug_tuple("Value").field(value).finish(),
            DefaultValue::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

fn resolve(node: &SchemaNode, ctx: &ValidationContext<'_>) -> Result<Validator, ValidationError> {
    ctx.registry
        .resolve_node(node)
        .ok_or_else(|| ValidationError::Unresolved {
            key: ctx.key.clone(),
            name: node.describe(),
        })
}

/// The derived value replaces the raw one entirely, nullish or not.
fn effective_value(from: &Option<Arc<FromFn>>, ctx: &ValidationContext<'_>) -> Outcome {
    match from {
        Some(derive) => guarded(ctx, || derive(ctx)),
        None => Ok(ctx.value.clone()),
    }
}

/// Skips validation for null/undefined values, optionally substituting a
/// default
#[derive(Clone)]
pub struct Optional {
    inner: SchemaNode,
    default: Option<DefaultValue>,
    from: Option<Arc<FromFn>>,
}

/// Wraps `node` so null and undefined pass without validation
pub fn optional(node: impl Into<SchemaNode>) -> Optional {
    Optional {
        inner: node.into(),
        default: None,
        from: None,
    }
}

impl Optional {
    /// Default for null/undefined values. Defaults are never validated.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    /// Default computed on every use
    pub fn with_default_fn<F>(mut self, make: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::Computed(Arc::new(make)));
        self
    }

    /// Replaces the value with one derived from the context before anything
    /// else happens
    #[allow(clippy::should_implement_trait)]
    pub fn from<F>(mut self, derive: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> Value + Send + Sync + 'static,
    {
        self.from = Some(Arc::new(derive));
        self
    }

    pub fn check(&self, ctx: &ValidationContext<'_>) -> Outcome {
        let value = effective_value(&self.from, ctx)?;

        if value.is_nullish() {
            return match &self.default {
                Some(default) => default.produce(ctx),
                None => Ok(value),
            };
        }

        let validator = resolve(&self.inner, ctx)?;
        validator.validate(&ctx.with_value(value))
    }
}

impl fmt::Debug for Optional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Optional")
            .field("inner", &self.inner)
            .field("default", &self.default)
            .field("from", &self.from.is_some())
            .finish()
    }
}

impl From<Optional> for Validator {
    fn from(wrapper: Optional) -> Self {
        Validator::new(move |ctx: &ValidationContext<'_>| wrapper.check(ctx))
    }
}

impl From<Optional> for SchemaNode {
    fn from(wrapper: Optional) -> Self {
        SchemaNode::Validator(wrapper.into())
    }
}

/// Always validates, optionally against a derived value
#[derive(Clone)]
pub struct Required {
    inner: SchemaNode,
    from: Option<Arc<FromFn>>,
}

/// Wraps `node` so it is always validated
pub fn required(node: impl Into<SchemaNode>) -> Required {
    Required {
        inner: node.into(),
        from: None,
    }
}

impl Required {
    /// Replaces the value with one derived from the context before
    /// validation
    #[allow(clippy::should_implement_trait)]
    pub fn from<F>(mut self, derive: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> Value + Send + Sync + 'static,
    {
        self.from = Some(Arc::new(derive));
        self
    }

    pub fn check(&self, ctx: &ValidationContext<'_>) -> Outcome {
        let value = effective_value(&self.from, ctx)?;
        let validator = resolve(&self.inner, ctx)?;
        validator.validate(&ctx.with_value(value))
    }
}

impl fmt::Debug for Required {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Required")
            .field("inner", &self.inner)
            .field("from", &self.from.is_some())
            .finish()
    }
}

impl From<Required> for Validator {
    fn from(wrapper: Required) -> Self {
        Validator::new(move |ctx: &ValidationContext<'_>| wrapper.check(ctx))
    }
}

impl From<Required> for SchemaNode {
    fn from(wrapper: Required) -> Self {
        SchemaNode::Validator(wrapper.into())
    }
}
