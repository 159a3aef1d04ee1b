//! Condition algebra over optionally-present values: a predicate tree
//! model, a point evaluator, and the static `is_subset` / `are_distinct`
//! decision procedures used for permission coverage and subscription
//! pruning.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod condition;
pub mod error;
pub mod eval;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors or evaluator internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        condition::{ComparisonOp, Condition, Containment, LikePattern, State},
        eval::{are_distinct, is_subset, satisfies},
        value::{Float64, Value},
    };
}
