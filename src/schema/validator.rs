//! Validator handles and the return-value adapter
//!
//! User validators may answer with a boolean, a `Result`, nothing at all, or
//! a dynamic `{err, value}` object, and they may panic. [`IntoOutcome`]
//! normalizes all of that into a single [`Outcome`] at the point the function
//! is wrapped, so the evaluator only ever sees one shape.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use super::context::ValidationContext;
use super::errors::{codes, ValidationError};
use crate::is::get_type;
use crate::value::{FunctionValue, Value};

/// Result of running one validator. `Ok` holds the value to store for the
/// field.
pub type Outcome = Result<Value, ValidationError>;

type Body = dyn Fn(&ValidationContext<'_>) -> Outcome + Send + Sync;

/// A validator function. Cloning is cheap.
#[derive(Clone)]
pub struct Validator {
    body: Arc<Body>,
}

impl Validator {
    /// Wraps a function that already returns an [`Outcome`]. No
    /// normalization or panic capture is applied.
    pub fn new<F>(body: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> Outcome + Send + Sync + 'static,
    {
        Self {
            body: Arc::new(body),
        }
    }

    /// Wraps an inline user function. A `false` answer reports
    /// "expected `key` {type} to be valid".
    pub fn from_fn<F, R>(f: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        adapt("valid".to_string(), f)
    }

    /// Wraps a user function registered under `name`. A `false` answer
    /// reports "expected `key` {type} to be {name}".
    pub fn named<F, R>(name: &str, f: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        adapt(format!("{{{}}}", name), f)
    }

    /// Wraps a dynamic function value. It is called with the context as an
    /// object (`{key, value, input, root, output}`) and its return value is
    /// adapted like any other.
    pub fn from_function_value(func: FunctionValue) -> Self {
        adapt("valid".to_string(), move |ctx: &ValidationContext<'_>| {
            func.call(&[ctx.to_value()])
        })
    }

    /// Runs the validator
    pub fn validate(&self, ctx: &ValidationContext<'_>) -> Outcome {
        (self.body)(ctx)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// User functions that accept without producing a value keep the value they
/// were given.
fn adapt<F, R>(expectation: String, f: F) -> Validator
where
    F: Fn(&ValidationContext<'_>) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Validator::new(move |ctx| {
        let answer = guarded(ctx, || f(ctx))?;
        match answer.into_outcome(ctx, &expectation)? {
            Value::Undefined => Ok(ctx.value.clone()),
            value => Ok(value),
        }
    })
}

/// Runs user code for the field in `ctx`. A panic becomes a field error
/// carrying the field's key.
pub(crate) fn guarded<T>(ctx: &ValidationContext<'_>, f: impl FnOnce() -> T) -> Result<T, ValidationError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = panic_message(payload.as_ref());
        warn!(event = "VALIDATOR_PANICKED", key = %ctx.key, message = %message);
        ValidationError::invalid_value(ctx.key.clone(), message)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "validator panicked".to_string()
    }
}

/// Builds the default "expected `key` {actual} to be <expectation>" failure.
pub(crate) fn expectation_failed(ctx: &ValidationContext<'_>, expectation: &str) -> ValidationError {
    ValidationError::with_code(
        ctx.key.clone(),
        format!(
            "expected `{}` {{{}}} to be {}",
            ctx.key,
            get_type(&ctx.value),
            expectation
        ),
        codes::INVALID_TYPE,
    )
}

/// Conversion of a validator's answer into an [`Outcome`]
pub trait IntoOutcome {
    /// `expectation` is the text used when a plain `false` needs a message.
    fn into_outcome(self, ctx: &ValidationContext<'_>, expectation: &str) -> Outcome;
}

impl IntoOutcome for bool {
    fn into_outcome(self, ctx: &ValidationContext<'_>, expectation: &str) -> Outcome {
        if self {
            Ok(ctx.value.clone())
        } else {
            Err(expectation_failed(ctx, expectation))
        }
    }
}

impl IntoOutcome for () {
    fn into_outcome(self, _ctx: &ValidationContext<'_>, _expectation: &str) -> Outcome {
        Ok(Value::Undefined)
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: Into<Value>,
    E: Into<ValidationError>,
{
    fn into_outcome(self, _ctx: &ValidationContext<'_>, _expectation: &str) -> Outcome {
        self.map(Into::into).map_err(Into::into)
    }
}

impl IntoOutcome for Value {
    fn into_outcome(self, ctx: &ValidationContext<'_>, expectation: &str) -> Outcome {
        match self {
            Value::Bool(ok) => ok.into_outcome(ctx, expectation),
            Value::Undefined => Ok(Value::Undefined),
            Value::Object(mut map) if map.contains_key("err") || map.contains_key("value") => {
                match map.remove("err") {
                    Some(err) if !err.is_nullish() => Err(error_from_value(&err)),
                    _ => Ok(map.remove("value").unwrap_or(Value::Undefined)),
                }
            }
            other => Err(ValidationError::ContractViolation {
                key: ctx.key.clone(),
                returned: format!("{{{}}}", get_type(&other)),
            }),
        }
    }
}

/// Extracts a message from a dynamic error value: a string, or an object
/// with a `message` string.
fn error_from_value(err: &Value) -> ValidationError {
    match err {
        Value::String(message) => ValidationError::custom(message.as_str()),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) => ValidationError::custom(message.as_str()),
            _ => ValidationError::custom(err.to_string()),
        },
        other => ValidationError::custom(other.to_string()),
    }
}
