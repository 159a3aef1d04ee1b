use crate::{
    condition::{Condition, Containment},
    eval::MAX_CONDITION_DEPTH,
    value::{Value, range_cmp},
};

/// Evaluate one condition against one optionally-present value.
///
/// `None` is the undefined value, as seen by a missing map key. Type
/// mismatches are unsatisfied rather than errors, so evaluation is total.
/// `Intrinsic` conditions address record metadata that a bare value does
/// not carry; they are never satisfied here.
#[must_use]
pub fn satisfies(value: Option<&Value>, condition: &Condition) -> bool {
    if condition.depth() > MAX_CONDITION_DEPTH {
        return false;
    }

    eval(value, condition)
}

// Recursive body, shared with the static evaluators which have already
// depth-checked their operands.
pub(crate) fn eval(value: Option<&Value>, condition: &Condition) -> bool {
    match condition {
        Condition::Constant(constant) => *constant,
        Condition::Equal(expected) => value == Some(expected),
        Condition::In(values) => value.is_some_and(|value| values.contains(value)),
        Condition::Is(state) => state.matches(value),
        Condition::Comparison { op, value: bound } => value
            .and_then(|value| range_cmp(value, bound))
            .is_some_and(|ordering| op.admits(ordering)),
        Condition::Like(pattern) => {
            matches!(value, Some(Value::Text(text)) if pattern.matches(text))
        }
        Condition::Contains {
            values,
            containment,
        } => {
            let Some(Value::List(items)) = value else {
                return false;
            };
            match containment {
                Containment::All => values.iter().all(|value| items.contains(value)),
                Containment::Any => values.iter().any(|value| items.contains(value)),
                Containment::Only => items.iter().all(|item| values.contains(item)),
            }
        }
        Condition::Map(entries) => {
            let Some(Value::Map(fields)) = value else {
                return false;
            };
            entries
                .iter()
                .all(|(key, condition)| eval(fields.get(key), condition))
        }
        Condition::Intrinsic { .. } => false,
        Condition::And(children) => children.iter().all(|child| eval(value, child)),
        Condition::Or(children) => children.iter().any(|child| eval(value, child)),
        Condition::Not(inner) => !eval(value, inner),
    }
}
