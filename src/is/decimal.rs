//! Decimal precision check

use crate::value::{format_number, Value};

/// True if `value` is a number. When `places` is given (and non-zero), true
/// only if rounding the number to exactly that many fractional digits
/// reproduces its own shortest string form, i.e. the number has exactly
/// `places` fractional digits.
pub fn decimal(value: &Value, places: Option<usize>) -> bool {
    let n = match value {
        Value::Number(n) => *n,
        _ => return false,
    };

    match places {
        None | Some(0) => true,
        Some(_) if !n.is_finite() => false,
        Some(places) => format!("{:.*}", places, n) == format_number(n),
    }
}
