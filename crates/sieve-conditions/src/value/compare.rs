use crate::value::Value;
use std::cmp::Ordering;

/// Range comparator backing `gt`/`ge`/`lt`/`le` conditions.
///
/// Only numbers and text order against each other: integers and floats
/// compare numerically across variants, text compares lexicographically by
/// Unicode scalar value. Every other pairing yields `None`, which the
/// evaluators read as "condition not satisfied" rather than an error.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn range_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Float(b)) => Some((*a as f64).total_cmp(&b.get())),
        (Value::Float(a), Value::Int(b)) => Some(a.get().total_cmp(&(*b as f64))),
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
