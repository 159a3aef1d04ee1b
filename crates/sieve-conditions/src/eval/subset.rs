use crate::{
    condition::{ComparisonOp, Condition, Containment, LikePattern, State},
    eval::{MAX_CONDITION_DEPTH, distinct, point},
    value::{Value, range_cmp},
};
use std::{cmp::Ordering, collections::BTreeSet};

// Stand-in for keys a map condition leaves unconstrained.
const IS_UNDEFINED: Condition = Condition::Is(State::Undefined);

/// Prove that every value satisfying `left` also satisfies `right`.
///
/// Sound and incomplete: `true` is a proof of implication, `false` only
/// means no rule applied. Negation is reduced through a fixed set of
/// identities (complement rewrites, contrapositive, De Morgan, per-kind
/// exclusion); negated composite intervals are deliberately left unproven.
#[must_use]
pub fn is_subset(left: &Condition, right: &Condition) -> bool {
    if left.depth() > MAX_CONDITION_DEPTH || right.depth() > MAX_CONDITION_DEPTH {
        return false;
    }

    subset(left, right)
}

pub(crate) fn subset(left: &Condition, right: &Condition) -> bool {
    // constant absorption
    if matches!(right, Condition::Constant(true)) || matches!(left, Condition::Constant(false)) {
        return true;
    }

    if let Condition::Not(inner) = left {
        return negation_subset(inner, right);
    }
    if let Condition::Not(inner) = right
        && subset_of_negation(left, inner)
    {
        return true;
    }

    // composite decomposition; the `any` directions keep falling through
    if let Condition::Or(children) = left {
        return children.iter().all(|child| subset(child, right));
    }
    if let Condition::And(children) = right {
        return children.iter().all(|child| subset(left, child));
    }
    if let Condition::And(children) = left
        && children.iter().any(|child| subset(child, right))
    {
        return true;
    }
    if let Condition::Or(children) = right
        && children.iter().any(|child| subset(left, child))
    {
        return true;
    }

    leaf_subset(left, right)
}

/// `Not(inner) ⊆ right`.
fn negation_subset(inner: &Condition, right: &Condition) -> bool {
    if matches!(right, Condition::Constant(true)) {
        return true;
    }
    if let Some(rewritten) = complement(inner) {
        return subset(&rewritten, right);
    }

    match inner {
        // De Morgan: the negated conjunction is the disjunction of the
        // negated children, so every one of them must imply `right`.
        Condition::And(children) => {
            return children.iter().all(|child| negation_subset(child, right));
        }
        Condition::Or(children) => {
            if children.iter().any(|child| negation_subset(child, right)) {
                return true;
            }
        }
        _ => {}
    }

    // contrapositive
    if let Condition::Not(right_inner) = right
        && subset(right_inner, inner)
    {
        return true;
    }

    match right {
        Condition::And(children) => children.iter().all(|child| negation_subset(inner, child)),
        Condition::Or(children) => children.iter().any(|child| negation_subset(inner, child)),
        _ => false,
    }
}

/// `left ⊆ Not(negated)`: prove `left` excludes everything `negated` accepts.
fn subset_of_negation(left: &Condition, negated: &Condition) -> bool {
    if matches!(left, Condition::Constant(false)) {
        return true;
    }
    if let Some(rewritten) = complement(negated) {
        return subset(left, &rewritten);
    }

    match negated {
        Condition::And(children) => {
            return children
                .iter()
                .any(|child| subset_of_negation(left, child));
        }
        Condition::Or(children) => {
            return children
                .iter()
                .all(|child| subset_of_negation(left, child));
        }
        // double negation
        Condition::Not(inner) => return subset(left, inner),
        _ => {}
    }

    match left {
        Condition::Equal(value) => !point::eval(Some(value), negated),
        Condition::In(values) => values.iter().all(|value| !point::eval(Some(value), negated)),
        Condition::Is(state) => match negated {
            Condition::Is(other) => state.disjoint(*other),
            Condition::Like(_) => !matches!(state, State::Defined | State::String),
            Condition::Comparison { value, .. } => {
                comparison_state(value).is_some_and(|other| state.disjoint(other))
            }
            _ => false,
        },
        Condition::Comparison { op, value } => match negated {
            Condition::Comparison {
                op: other_op,
                value: other_value,
            } => comparison_subset(*op, value, other_op.negated(), other_value),
            Condition::Is(state) => {
                comparison_state(value).is_some_and(|own| own.disjoint(*state))
            }
            _ => false,
        },
        Condition::Like(_) => distinct::like_distinct(left, negated),
        Condition::Map(entries) => match negated {
            Condition::Map(others) => others.iter().any(|(key, condition)| {
                subset_of_negation(entries.get(key).unwrap_or(&IS_UNDEFINED), condition)
            }),
            _ => false,
        },
        _ => false,
    }
}

// Exact complements recognized under a leading Not.
fn complement(condition: &Condition) -> Option<Condition> {
    match condition {
        Condition::Constant(constant) => Some(Condition::Constant(!*constant)),
        Condition::Is(State::Defined) => Some(Condition::Is(State::Undefined)),
        Condition::Is(State::Undefined) => Some(Condition::Is(State::Defined)),
        _ => None,
    }
}

fn leaf_subset(left: &Condition, right: &Condition) -> bool {
    match left {
        // a finite left-hand side point-evaluates the right
        Condition::Equal(value) => point::eval(Some(value), right),
        Condition::In(values) => values.iter().all(|value| point::eval(Some(value), right)),
        Condition::Is(state) => match right {
            Condition::Is(other) => {
                state == other || (*other == State::Defined && *state != State::Undefined)
            }
            _ => false,
        },
        Condition::Comparison { op, value } => match right {
            Condition::Comparison {
                op: other_op,
                value: other_value,
            } => comparison_subset(*op, value, *other_op, other_value),
            Condition::Is(state) => comparison_state(value)
                .is_some_and(|own| own == *state || *state == State::Defined),
            _ => false,
        },
        Condition::Like(pattern) => match right {
            Condition::Is(state) => matches!(state, State::Defined | State::String),
            Condition::Equal(value) => value
                .as_text()
                .is_some_and(|text| pattern.literal() == Some(text)),
            Condition::In(values) => pattern.literal().is_some_and(|literal| {
                values.iter().any(|value| value.as_text() == Some(literal))
            }),
            Condition::Like(other) => pattern.is_subset_of(other),
            Condition::Comparison { op, value } => {
                like_subset_of_comparison(pattern, *op, value)
            }
            _ => false,
        },
        Condition::Contains {
            values,
            containment,
        } => match right {
            Condition::Is(state) => matches!(state, State::Defined | State::List),
            Condition::Contains {
                values: other_values,
                containment: other_containment,
            } => contains_subset(values, *containment, other_values, *other_containment),
            _ => false,
        },
        Condition::Map(entries) => match right {
            Condition::Is(state) => matches!(state, State::Defined | State::Map),
            Condition::Map(others) => others.iter().all(|(key, condition)| {
                subset(entries.get(key).unwrap_or(&IS_UNDEFINED), condition)
            }),
            _ => false,
        },
        Condition::Intrinsic { name, condition } => match right {
            Condition::Intrinsic {
                name: other_name,
                condition: other,
            } => name == other_name && subset(condition, other),
            _ => false,
        },
        _ => false,
    }
}

fn comparison_subset(
    op: ComparisonOp,
    value: &Value,
    other_op: ComparisonOp,
    other_value: &Value,
) -> bool {
    if op.is_lower_bound() != other_op.is_lower_bound() {
        return false;
    }
    let Some(ordering) = range_cmp(value, other_value) else {
        return false;
    };

    // a closed bound only fits inside an open one with strict clearance
    let needs_strict = op.includes_bound() && !other_op.includes_bound();
    if op.is_lower_bound() {
        if needs_strict {
            ordering == Ordering::Greater
        } else {
            ordering != Ordering::Less
        }
    } else if needs_strict {
        ordering == Ordering::Less
    } else {
        ordering != Ordering::Greater
    }
}

const fn comparison_state(value: &Value) -> Option<State> {
    match value {
        Value::Int(_) | Value::Float(_) => Some(State::Number),
        Value::Text(_) => Some(State::String),
        _ => None,
    }
}

fn like_subset_of_comparison(pattern: &LikePattern, op: ComparisonOp, bound: &Value) -> bool {
    let Some(bound) = bound.as_text() else {
        return false;
    };
    if let Some(literal) = pattern.literal() {
        return op.admits(literal.cmp(bound));
    }
    let Some(prefix) = pattern.prefix() else {
        return false;
    };

    match op {
        // every extension of the prefix sorts at or after the prefix itself
        ComparisonOp::Gt => prefix > bound,
        ComparisonOp::Ge => prefix >= bound,
        // an upper bound holds only if the bound cannot extend the prefix
        ComparisonOp::Lt | ComparisonOp::Le => prefix < bound && !bound.starts_with(prefix),
    }
}

fn contains_subset(
    values: &BTreeSet<Value>,
    containment: Containment,
    other_values: &BTreeSet<Value>,
    other_containment: Containment,
) -> bool {
    match (containment, other_containment) {
        (Containment::All, Containment::All) => other_values.is_subset(values),
        (Containment::All, Containment::Any) => !values.is_disjoint(other_values),
        (Containment::Any, Containment::Any) | (Containment::Only, Containment::Only) => {
            values.is_subset(other_values)
        }
        (Containment::Any, Containment::All) => {
            values.len() == 1 && other_values.is_subset(values)
        }
        _ => false,
    }
}
