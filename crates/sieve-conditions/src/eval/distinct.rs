use crate::{
    condition::{Condition, State},
    eval::{MAX_CONDITION_DEPTH, subset::subset},
};
use std::cmp::Ordering;

/// Prove that no value can satisfy both conditions.
///
/// Sound and incomplete, like `is_subset`. Pairs with a `Like` operand get
/// dedicated pattern rules; every other pair uses the default rule: the
/// conditions are reported distinct when neither subsumes the other. That
/// default is a heuristic over the operators this algebra actually pairs,
/// not a theorem; keep it in sync with the evaluator tests when extending.
#[must_use]
pub fn are_distinct(left: &Condition, right: &Condition) -> bool {
    if left.depth() > MAX_CONDITION_DEPTH || right.depth() > MAX_CONDITION_DEPTH {
        return false;
    }

    distinct(left, right)
}

pub(crate) fn distinct(left: &Condition, right: &Condition) -> bool {
    match (left, right) {
        (Condition::Like(_), _) => like_distinct(left, right),
        (_, Condition::Like(_)) => like_distinct(right, left),
        _ => default_distinct(left, right),
    }
}

// `like_side` is a Like condition; callers orient the pair so the pattern
// rules apply from either argument position.
pub(crate) fn like_distinct(like_side: &Condition, other: &Condition) -> bool {
    let Condition::Like(pattern) = like_side else {
        return default_distinct(like_side, other);
    };

    match other {
        Condition::Constant(constant) => !*constant,
        Condition::Is(state) => !matches!(state, State::Defined | State::String),
        Condition::Equal(value) => !value.as_text().is_some_and(|text| pattern.matches(text)),
        Condition::In(values) => !values
            .iter()
            .any(|value| value.as_text().is_some_and(|text| pattern.matches(text))),
        Condition::Comparison { op, value } => {
            // a non-text bound admits no text at all
            let Some(bound) = value.as_text() else {
                return true;
            };
            let Some(prefix) = pattern.prefix() else {
                return false;
            };
            // a prefix shorter than the bound leaves room for an extension
            // on either side of it; length and ordering use the same byte
            // metric
            if prefix.len() < bound.len() {
                return false;
            }
            let ordering = prefix.cmp(bound);
            if op.is_lower_bound() {
                // only a prefix strictly below the bound pins every
                // extension below it as well
                ordering == Ordering::Less
            } else {
                !op.admits(ordering)
            }
        }
        Condition::Like(other_pattern) => !pattern.overlaps(other_pattern),
        Condition::Not(inner) => match inner.as_ref() {
            Condition::Like(other_pattern) => pattern.is_subset_of(other_pattern),
            _ => default_distinct(like_side, other),
        },
        _ => default_distinct(like_side, other),
    }
}

fn default_distinct(left: &Condition, right: &Condition) -> bool {
    !subset(left, right) && !subset(right, left)
}
