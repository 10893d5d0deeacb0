//! Type predicates
//!
//! Pure, total classification functions over [`Value`]. Every predicate has
//! an exact negation in [`not`]. None of them panic, and all of them return
//! `false` for null/undefined unless they target those kinds.

mod decimal;

use thiserror::Error;

use crate::value::{FunctionKind, Value};

pub use decimal::decimal;

/// A unary predicate
pub type Predicate = fn(&Value) -> bool;

/// Errors raised while building composite predicates
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IsError {
    /// The predicate name is not known
    #[error("is does not support evaluation of {{{0}}}")]
    Unsupported(String),
}

/// Returns the lowered kind name of a value (`string`, `number`, `array`,
/// `asyncfunction`, ...).
pub fn get_type(value: &Value) -> &'static str {
    match value {
        Value::Undefined => "undefined",
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::BigInt(_) => "bigint",
        Value::String(_) => "string",
        Value::Symbol(_) => "symbol",
        Value::Date(_) => "date",
        Value::RegExp(_) => "regexp",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        Value::Function(f) => match f.kind() {
            FunctionKind::Sync => "function",
            FunctionKind::Async => "asyncfunction",
        },
        Value::Promise => "promise",
    }
}

pub fn defined(value: &Value) -> bool {
    !value.is_undefined()
}

pub fn null_or_undefined(value: &Value) -> bool {
    value.is_nullish()
}

/// Sync functions, async functions and promises are all function-like.
pub fn function(value: &Value) -> bool {
    matches!(value, Value::Function(_) | Value::Promise)
}

pub fn func(value: &Value) -> bool {
    function(value)
}

/// Async functions and promises
pub fn promise(value: &Value) -> bool {
    match value {
        Value::Function(f) => f.is_async(),
        Value::Promise => true,
        _ => false,
    }
}

pub fn async_function(value: &Value) -> bool {
    promise(value)
}

pub fn async_func(value: &Value) -> bool {
    promise(value)
}

pub fn object(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

pub fn array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

pub fn string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

pub fn boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

pub fn date(value: &Value) -> bool {
    matches!(value, Value::Date(_))
}

pub fn regexp(value: &Value) -> bool {
    matches!(value, Value::RegExp(_))
}

pub fn number(value: &Value) -> bool {
    matches!(value, Value::Number(_))
}

/// Null, undefined, and strings without a single non-whitespace character.
/// Arrays are never blank.
pub fn null_or_whitespace(value: &Value) -> bool {
    match value {
        Value::Undefined | Value::Null => true,
        Value::Array(_) => false,
        Value::String(s) => s.trim().is_empty(),
        // Anything else is judged by its string form
        other => other.to_string().trim().is_empty(),
    }
}

/// Booleans, null, undefined, numbers, big integers, strings and symbols
pub fn primitive(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(_)
            | Value::Null
            | Value::Undefined
            | Value::Number(_)
            | Value::BigInt(_)
            | Value::String(_)
            | Value::Symbol(_)
    )
}

/// Looks up a unary predicate by its camelCase name.
pub fn by_name(name: &str) -> Option<Predicate> {
    let predicate: Predicate = match name {
        "defined" => defined,
        "nullOrUndefined" => null_or_undefined,
        "function" => function,
        "func" => func,
        "promise" => promise,
        "asyncFunction" => async_function,
        "asyncFunc" => async_func,
        "object" => object,
        "array" => array,
        "string" => string,
        "boolean" => boolean,
        "date" => date,
        "regexp" => regexp,
        "number" => number,
        "nullOrWhitespace" => null_or_whitespace,
        "decimal" => |v| decimal(v, None),
        "primitive" => primitive,
        _ => return None,
    };
    Some(predicate)
}

/// Tests that every element of an array satisfies a named predicate
#[derive(Debug, Clone, Copy)]
pub struct ArrayPredicate {
    element: Predicate,
    negated: bool,
}

impl ArrayPredicate {
    pub fn test(&self, value: &Value) -> bool {
        let all = match value {
            Value::Array(items) => items.iter().all(self.element),
            _ => false,
        };
        all != self.negated
    }
}

/// Builds a predicate testing that a value is an array whose elements all
/// satisfy the predicate named `type_name`.
///
/// # Errors
///
/// Returns `IsError::Unsupported` when no predicate has that name.
pub fn array_of(type_name: &str) -> Result<ArrayPredicate, IsError> {
    let element = by_name(type_name).ok_or_else(|| IsError::Unsupported(type_name.to_string()))?;
    Ok(ArrayPredicate {
        element,
        negated: false,
    })
}

/// Negated predicates
pub mod not {
    use super::{ArrayPredicate, IsError};
    use crate::value::Value;

    macro_rules! negate {
        ($($name:ident),* $(,)?) => {
            $(
                pub fn $name(value: &Value) -> bool {
                    !super::$name(value)
                }
            )*
        };
    }

    negate!(
        defined,
        null_or_undefined,
        function,
        func,
        promise,
        async_function,
        async_func,
        object,
        array,
        string,
        boolean,
        date,
        regexp,
        number,
        null_or_whitespace,
        primitive,
    );

    pub fn decimal(value: &Value, places: Option<usize>) -> bool {
        !super::decimal(value, places)
    }

    pub fn array_of(type_name: &str) -> Result<ArrayPredicate, IsError> {
        let mut predicate = super::array_of(type_name)?;
        predicate.negated = true;
        Ok(predicate)
    }
}
