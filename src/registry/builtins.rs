//! Built-in types
//!
//! Installed into every registry created with `Registry::with_builtins`,
//! including the global one.

use regex::Regex;

use super::store::Registry;
use crate::is::{self, get_type, Predicate};
use crate::schema::{codes, expectation_failed, ValidationError, Validator};
use crate::value::Value;

/// Highest `decimal:N` type installed
pub const MAX_DECIMAL_PLACES: usize = 15;

const PREDICATE_TYPES: [(&str, Predicate); 11] = [
    ("function", is::function),
    ("asyncFunction", is::async_function),
    ("promise", is::promise),
    ("object", is::object),
    ("array", is::array),
    ("boolean", is::boolean),
    ("date", is::date),
    ("number", is::number),
    ("regexp", is::regexp),
    ("primitive", is::primitive),
    ("decimal", any_decimal),
];

fn any_decimal(value: &Value) -> bool {
    is::decimal(value, None)
}

pub(crate) fn install(registry: &Registry) {
    for (name, predicate) in PREDICATE_TYPES {
        registry.install_type(name, type_check(name, predicate));
    }

    registry.install_type("string", string());
    registry.install_type("any", any());

    for places in 1..=MAX_DECIMAL_PLACES {
        registry.install_type(&format!("decimal:{}", places), decimal_places(places));
    }
}

fn type_check(name: &'static str, predicate: Predicate) -> Validator {
    let expectation = format!("{{{}}}", name);
    Validator::new(move |ctx| {
        if predicate(&ctx.value) {
            Ok(ctx.value.clone())
        } else {
            Err(expectation_failed(ctx, &expectation))
        }
    })
}

/// Strings, trimmed. Blank strings are rejected.
fn string() -> Validator {
    Validator::new(|ctx| match &ctx.value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(ValidationError::with_code(
                    ctx.key.clone(),
                    format!("expected `{}` {{string}} to not be an empty string", ctx.key),
                    codes::EMPTY_STRING,
                ))
            } else {
                Ok(Value::String(trimmed.to_string()))
            }
        }
        _ => Err(expectation_failed(ctx, "{string}")),
    })
}

/// Anything except null and undefined
fn any() -> Validator {
    Validator::new(|ctx| {
        if ctx.value.is_nullish() {
            Err(expectation_failed(ctx, "{any}"))
        } else {
            Ok(ctx.value.clone())
        }
    })
}

fn decimal_places(places: usize) -> Validator {
    Validator::new(move |ctx| {
        if is::decimal(&ctx.value, Some(places)) {
            Ok(ctx.value.clone())
        } else {
            Err(ValidationError::with_code(
                ctx.key.clone(),
                format!(
                    "expected `{}` {{{}}} to be a decimal with {} places",
                    ctx.key,
                    get_type(&ctx.value),
                    places
                ),
                codes::INVALID_DECIMAL,
            ))
        }
    })
}

/// Matches string values against `re`. Non-strings never match.
pub fn expression(re: Regex) -> Validator {
    Validator::new(move |ctx| match &ctx.value {
        Value::String(s) if re.is_match(s) => Ok(ctx.value.clone()),
        _ => Err(ValidationError::with_code(
            ctx.key.clone(),
            format!("expected `{}` to match /{}/", ctx.key, re.as_str()),
            codes::INVALID_EXPRESSION,
        )),
    })
}
