//! Numeric comparators and validator wrappers
//!
//! Comparators are built once and checked per value. Boundaries are checked
//! at construction, so a bad boundary never reaches validation.

mod range;
mod wrappers;

pub use range::{range, Range, RangeOptions};
pub use wrappers::{optional, required, DefaultValue, Optional, Required};

use crate::schema::{codes, Outcome, SchemaError, SchemaNode, SchemaResult, ValidationContext, ValidationError, Validator};
use crate::value::{format_number, Value};

/// Comparison applied by a [`Comparator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Bound {
    pub fn name(self) -> &'static str {
        match self {
            Bound::Gt => "gt",
            Bound::Gte => "gte",
            Bound::Lt => "lt",
            Bound::Lte => "lte",
        }
    }

    fn phrase(self) -> &'static str {
        match self {
            Bound::Gt => "greater than",
            Bound::Gte => "greater than or equal to",
            Bound::Lt => "less than",
            Bound::Lte => "less than or equal to",
        }
    }

    fn code(self) -> &'static str {
        match self {
            Bound::Gt => codes::INVALID_GT,
            Bound::Gte => codes::INVALID_GTE,
            Bound::Lt => codes::INVALID_LT,
            Bound::Lte => codes::INVALID_LTE,
        }
    }

    fn holds(self, value: f64, boundary: f64) -> bool {
        match self {
            Bound::Gt => value > boundary,
            Bound::Gte => value >= boundary,
            Bound::Lt => value < boundary,
            Bound::Lte => value <= boundary,
        }
    }
}

/// A single numeric boundary check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparator {
    bound: Bound,
    boundary: f64,
}

impl Comparator {
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidBoundary` if `boundary` is NaN.
    pub fn new(bound: Bound, boundary: f64) -> SchemaResult<Self> {
        if boundary.is_nan() {
            return Err(SchemaError::InvalidBoundary {
                comparator: bound.name(),
            });
        }
        Ok(Self { bound, boundary })
    }

    pub fn bound(&self) -> Bound {
        self.bound
    }

    pub fn boundary(&self) -> f64 {
        self.boundary
    }

    /// Passes numbers satisfying the bound. Everything else fails,
    /// including numeric strings.
    pub fn check(&self, ctx: &ValidationContext<'_>) -> Outcome {
        match ctx.value {
            Value::Number(n) if self.bound.holds(n, self.boundary) => Ok(ctx.value.clone()),
            _ => Err(ValidationError::with_code(
                ctx.key.clone(),
                format!(
                    "expected `{}` to be {} {}",
                    ctx.key,
                    self.bound.phrase(),
                    format_number(self.boundary)
                ),
                self.bound.code(),
            )),
        }
    }
}

impl From<Comparator> for Validator {
    fn from(comparator: Comparator) -> Self {
        Validator::new(move |ctx: &ValidationContext<'_>| comparator.check(ctx))
    }
}

impl From<Comparator> for SchemaNode {
    fn from(comparator: Comparator) -> Self {
        SchemaNode::Validator(comparator.into())
    }
}

/// Values strictly greater than `min`
pub fn gt(min: f64) -> SchemaResult<Comparator> {
    Comparator::new(Bound::Gt, min)
}

/// Values greater than or equal to `min`
pub fn gte(min: f64) -> SchemaResult<Comparator> {
    Comparator::new(Bound::Gte, min)
}

/// Values strictly less than `max`
pub fn lt(max: f64) -> SchemaResult<Comparator> {
    Comparator::new(Bound::Lt, max)
}

/// Values less than or equal to `max`
pub fn lte(max: f64) -> SchemaResult<Comparator> {
    Comparator::new(Bound::Lte, max)
}
