//! Range comparator: one lower and one upper bound

use serde::{Deserialize, Serialize};

use super::{gt, gte, lt, lte, Comparator};
use crate::schema::{Outcome, SchemaError, SchemaNode, SchemaResult, ValidationContext, Validator};

/// Bounds for [`range`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeOptions {
    pub gt: Option<f64>,
    pub gte: Option<f64>,
    pub lt: Option<f64>,
    pub lte: Option<f64>,
}

impl RangeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gt(mut self, min: f64) -> Self {
        self.gt = Some(min);
        self
    }

    pub fn gte(mut self, min: f64) -> Self {
        self.gte = Some(min);
        self
    }

    pub fn lt(mut self, max: f64) -> Self {
        self.lt = Some(max);
        self
    }

    pub fn lte(mut self, max: f64) -> Self {
        self.lte = Some(max);
        self
    }
}

/// A lower and an upper comparator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lower: Comparator,
    upper: Comparator,
}

impl Range {
    pub fn lower(&self) -> Comparator {
        self.lower
    }

    pub fn upper(&self) -> Comparator {
        self.upper
    }

    /// Upper bound first; its failure is reported when both fail.
    pub fn check(&self, ctx: &ValidationContext<'_>) -> Outcome {
        self.upper.check(ctx)?;
        self.lower.check(ctx)
    }
}

/// Builds a range. When both a strict and an inclusive bound are given on
/// the same side, the strict one is used.
///
/// # Errors
///
/// Returns `SchemaError::InvalidRange` when a side has no bound, or
/// `SchemaError::InvalidBoundary` for a NaN bound.
pub fn range(options: RangeOptions) -> SchemaResult<Range> {
    let lower = match (options.gt, options.gte) {
        (Some(min), _) => gt(min)?,
        (None, Some(min)) => gte(min)?,
        (None, None) => {
            return Err(SchemaError::InvalidRange(
                "You must specify `gt`, or `gte` {number} when defining a range".to_string(),
            ))
        }
    };

    let upper = match (options.lt, options.lte) {
        (Some(max), _) => lt(max)?,
        (None, Some(max)) => lte(max)?,
        (None, None) => {
            return Err(SchemaError::InvalidRange(
                "You must specify `lt`, or `lte` {number} when defining a range".to_string(),
            ))
        }
    };

    Ok(Range { lower, upper })
}

impl From<Range> for Validator {
    fn from(range: Range) -> Self {
        Validator::new(move |ctx: &ValidationContext<'_>| range.check(ctx))
    }
}

impl From<Range> for SchemaNode {
    fn from(range: Range) -> Self {
        SchemaNode::Validator(range.into())
    }
}
