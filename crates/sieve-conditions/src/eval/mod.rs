//! Decision procedures over condition trees.
//!
//! `satisfies` evaluates one condition against one concrete value.
//! `is_subset` and `are_distinct` reason about two conditions statically,
//! with no data in hand. Both static procedures are sound and deliberately
//! incomplete: a `true` answer is a proof, a `false` answer is only
//! "not provable here".

mod distinct;
mod point;
mod subset;

#[cfg(test)]
mod tests;

pub use distinct::are_distinct;
pub use point::satisfies;
pub use subset::is_subset;

///
/// CONSTANTS
///

/// Maximum condition tree depth the evaluators will reason about.
///
/// Depth is measured iteratively before any recursive walk; deeper operands
/// get the conservative `false` answer instead of risking stack exhaustion
/// on hostile input.
pub const MAX_CONDITION_DEPTH: usize = 64;
