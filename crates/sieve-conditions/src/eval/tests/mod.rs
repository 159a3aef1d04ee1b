mod point;

use crate::{
    condition::Condition,
    value::{Float64, Value},
};
use std::collections::BTreeMap;

pub(crate) fn like(pattern: &str) -> Condition {
    Condition::like(pattern).unwrap()
}

pub(crate) fn num(value: f64) -> Value {
    Value::Float(Float64::try_new(value).unwrap())
}

pub(crate) fn list(items: &[&str]) -> Value {
    Value::List(items.iter().map(|item| Value::from(*item)).collect())
}

pub(crate) fn map_value(entries: &[(&str, &str)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), Value::from(*value)))
            .collect::<BTreeMap<_, _>>(),
    )
}
