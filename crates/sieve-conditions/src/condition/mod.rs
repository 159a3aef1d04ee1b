//! The condition tree: a predicate language over optionally-present values.

mod like;


pub use like::LikePattern;

use crate::{error::PatternError, value::Value};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
    ops::{BitAnd, BitOr},
};

///
/// Intrinsic field names
///
/// Record metadata addressed by `intrinsic` conditions. Callers that carry
/// record context resolve these; a bare value never satisfies them.
///

pub mod intrinsic {
    pub const TABLE: &str = "~table";
    pub const ID: &str = "~id";
    pub const VERSION: &str = "~version";
    pub const DELETED: &str = "~deleted";
}

///
/// State
///
/// Presence and type tests. `Defined` means present, null included;
/// `Undefined` means absent. The remaining states name a concrete variant.
///

#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub enum State {
    #[display("undefined")]
    Undefined,
    #[display("defined")]
    Defined,
    #[display("null")]
    Null,
    #[display("boolean")]
    Boolean,
    #[display("number")]
    Number,
    #[display("string")]
    String,
    #[display("list")]
    List,
    #[display("map")]
    Map,
}

impl State {
    pub(crate) fn matches(self, value: Option<&Value>) -> bool {
        match self {
            Self::Undefined => value.is_none(),
            Self::Defined => value.is_some(),
            Self::Null => matches!(value, Some(Value::Null)),
            Self::Boolean => matches!(value, Some(Value::Bool(_))),
            Self::Number => matches!(value, Some(Value::Int(_) | Value::Float(_))),
            Self::String => matches!(value, Some(Value::Text(_))),
            Self::List => matches!(value, Some(Value::List(_))),
            Self::Map => matches!(value, Some(Value::Map(_))),
        }
    }

    /// No value can satisfy both states at once.
    ///
    /// `Defined` overlaps every present state and `Null` and the typed
    /// states are mutually exclusive, so everything except a `Defined`
    /// pairing is disjoint.
    pub(crate) const fn disjoint(self, other: Self) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) => false,
            (Self::Undefined, _) | (_, Self::Undefined) => true,
            (Self::Defined, _) | (_, Self::Defined) => false,
            (a, b) => a as u8 != b as u8,
        }
    }
}

///
/// ComparisonOp
///
/// `Ge`/`Le` include the bound, `Gt`/`Lt` exclude it.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[display("gt")]
    Gt,
    #[display("ge")]
    Ge,
    #[display("lt")]
    Lt,
    #[display("le")]
    Le,
}

impl ComparisonOp {
    /// The operator describing the complement interval.
    pub(crate) const fn negated(self) -> Self {
        match self {
            Self::Gt => Self::Le,
            Self::Ge => Self::Lt,
            Self::Lt => Self::Ge,
            Self::Le => Self::Gt,
        }
    }

    pub(crate) const fn is_lower_bound(self) -> bool {
        matches!(self, Self::Gt | Self::Ge)
    }

    pub(crate) const fn includes_bound(self) -> bool {
        matches!(self, Self::Ge | Self::Le)
    }

    pub(crate) fn admits(self, ordering: Ordering) -> bool {
        match self {
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
        }
    }
}

///
/// Containment
///
/// How a `contains` condition reads its value set against a list:
/// `All` requires every listed value, `Any` at least one, `Only` forbids
/// anything outside the set.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Containment {
    #[display("all")]
    All,
    #[display("any")]
    Any,
    #[display("only")]
    Only,
}

///
/// Condition
///
/// Pure representation of a predicate over one optionally-present value.
/// Finite, acyclic, immutable; composite nodes own their children. All
/// interpretation lives in `eval`.
///
/// `Drop` is iterative, so holding and discarding an adversarially deep
/// tree is safe. The derived `Clone`, equality, hashing and serde impls
/// still walk the tree recursively; check `depth()` before doing anything
/// beyond evaluating or dropping an untrusted tree. Parsing is bounded
/// separately by the reader (serde_json caps nesting at 128 levels).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Constant(bool),
    Equal(Value),
    In(BTreeSet<Value>),
    Is(State),
    Comparison { op: ComparisonOp, value: Value },
    Like(LikePattern),
    Contains {
        values: BTreeSet<Value>,
        containment: Containment,
    },
    Map(BTreeMap<String, Condition>),
    Intrinsic {
        name: String,
        condition: Box<Condition>,
    },
    And(Vec<Condition>),
    Or(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    #[must_use]
    pub const fn always_true() -> Self {
        Self::Constant(true)
    }

    #[must_use]
    pub const fn always_false() -> Self {
        Self::Constant(false)
    }

    #[must_use]
    pub fn equal(value: impl Into<Value>) -> Self {
        Self::Equal(value.into())
    }

    /// Membership in a non-empty value set.
    #[must_use]
    pub fn in_<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        let values: BTreeSet<Value> = values.into_iter().map(Into::into).collect();
        assert!(!values.is_empty(), "in_ requires at least one value");

        Self::In(values)
    }

    #[must_use]
    pub const fn is(state: State) -> Self {
        Self::Is(state)
    }

    #[must_use]
    pub const fn is_undefined() -> Self {
        Self::Is(State::Undefined)
    }

    #[must_use]
    pub const fn is_defined() -> Self {
        Self::Is(State::Defined)
    }

    #[must_use]
    pub const fn is_null() -> Self {
        Self::Is(State::Null)
    }

    #[must_use]
    pub const fn is_boolean() -> Self {
        Self::Is(State::Boolean)
    }

    #[must_use]
    pub const fn is_number() -> Self {
        Self::Is(State::Number)
    }

    #[must_use]
    pub const fn is_string() -> Self {
        Self::Is(State::String)
    }

    #[must_use]
    pub const fn is_list() -> Self {
        Self::Is(State::List)
    }

    #[must_use]
    pub const fn is_map() -> Self {
        Self::Is(State::Map)
    }

    #[must_use]
    pub fn gt(value: impl Into<Value>) -> Self {
        Self::Comparison {
            op: ComparisonOp::Gt,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn ge(value: impl Into<Value>) -> Self {
        Self::Comparison {
            op: ComparisonOp::Ge,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn lt(value: impl Into<Value>) -> Self {
        Self::Comparison {
            op: ComparisonOp::Lt,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn le(value: impl Into<Value>) -> Self {
        Self::Comparison {
            op: ComparisonOp::Le,
            value: value.into(),
        }
    }

    pub fn like(pattern: impl Into<String>) -> Result<Self, PatternError> {
        Ok(Self::Like(LikePattern::new(pattern)?))
    }

    #[must_use]
    pub fn contains(value: impl Into<Value>) -> Self {
        Self::contains_all([value])
    }

    #[must_use]
    pub fn contains_all<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::contains_with(values, Containment::All)
    }

    #[must_use]
    pub fn contains_any<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::contains_with(values, Containment::Any)
    }

    #[must_use]
    pub fn contains_only<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::contains_with(values, Containment::Only)
    }

    fn contains_with<V: Into<Value>>(
        values: impl IntoIterator<Item = V>,
        containment: Containment,
    ) -> Self {
        let values: BTreeSet<Value> = values.into_iter().map(Into::into).collect();
        assert!(!values.is_empty(), "contains requires at least one value");

        Self::Contains {
            values,
            containment,
        }
    }

    #[must_use]
    pub fn map() -> MapConditionBuilder {
        MapConditionBuilder::new()
    }

    #[must_use]
    pub fn intrinsic(name: impl Into<String>, condition: Self) -> Self {
        Self::Intrinsic {
            name: name.into(),
            condition: Box::new(condition),
        }
    }

    /// Conjunction of a non-empty child list. Order is preserved.
    #[must_use]
    pub fn and(children: Vec<Self>) -> Self {
        assert!(!children.is_empty(), "and requires at least one child");

        Self::And(children)
    }

    /// Disjunction of a non-empty child list. Order is preserved.
    #[must_use]
    pub fn or(children: Vec<Self>) -> Self {
        assert!(!children.is_empty(), "or requires at least one child");

        Self::Or(children)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(condition: Self) -> Self {
        Self::Not(Box::new(condition))
    }

    /// Tree depth, computed with an explicit work stack so adversarially
    /// deep caller-supplied trees can be sized before any recursive walk.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut stack = vec![(self, 1)];

        while let Some((node, depth)) = stack.pop() {
            max = max.max(depth);
            match node {
                Self::And(children) | Self::Or(children) => {
                    for child in children {
                        stack.push((child, depth + 1));
                    }
                }
                Self::Map(entries) => {
                    for child in entries.values() {
                        stack.push((child, depth + 1));
                    }
                }
                Self::Intrinsic { condition, .. } | Self::Not(condition) => {
                    stack.push((condition, depth + 1));
                }
                _ => {}
            }
        }

        max
    }
}

impl BitAnd for Condition {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Condition {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::Or(vec![self, rhs])
    }
}

// The derived drop would recurse once per tree level. Children are drained
// onto a work stack instead; every popped node has already been emptied, so
// its own drop is shallow.
impl Drop for Condition {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        drain_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            drain_children(&mut node, &mut stack);
        }
    }
}

fn drain_children(node: &mut Condition, stack: &mut Vec<Condition>) {
    match node {
        Condition::And(children) | Condition::Or(children) => stack.append(children),
        Condition::Map(entries) => stack.extend(std::mem::take(entries).into_values()),
        Condition::Not(inner)
        | Condition::Intrinsic {
            condition: inner, ..
        } => stack.push(std::mem::replace(inner.as_mut(), Condition::Constant(false))),
        _ => {}
    }
}

///
/// MapConditionBuilder
///
/// Per-key constraints over a map value. Later entries for the same key
/// replace earlier ones.
///

#[derive(Clone, Debug, Default)]
pub struct MapConditionBuilder {
    entries: BTreeMap<String, Condition>,
}

impl MapConditionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains_key(mut self, key: impl Into<String>) -> Self {
        self.entries.insert(key.into(), Condition::is_defined());
        self
    }

    #[must_use]
    pub fn contains(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), Condition::equal(value));
        self
    }

    #[must_use]
    pub fn matches(mut self, key: impl Into<String>, condition: Condition) -> Self {
        self.entries.insert(key.into(), condition);
        self
    }

    #[must_use]
    pub fn build(self) -> Condition {
        Condition::Map(self.entries)
    }
}
