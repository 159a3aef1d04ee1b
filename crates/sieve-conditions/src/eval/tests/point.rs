use super::{like, list, map_value, num};
use crate::{
    condition::{Condition as C, intrinsic},
    eval::satisfies,
    value::Value,
};

fn text(value: &str) -> Value {
    Value::from(value)
}

#[test]
fn constants_ignore_the_value() {
    assert!(satisfies(None, &C::always_true()));
    assert!(satisfies(Some(&Value::Null), &C::always_true()));
    assert!(!satisfies(None, &C::always_false()));
    assert!(!satisfies(Some(&text("x")), &C::always_false()));
}

#[test]
fn equality_and_membership() {
    assert!(satisfies(Some(&text("a")), &C::equal("a")));
    assert!(!satisfies(Some(&text("b")), &C::equal("a")));
    assert!(!satisfies(None, &C::equal("a")));
    assert!(!satisfies(Some(&Value::Int(5)), &C::equal("5")));

    assert!(satisfies(Some(&text("b")), &C::in_(["a", "b"])));
    assert!(!satisfies(Some(&text("c")), &C::in_(["a", "b"])));
    assert!(!satisfies(None, &C::in_(["a", "b"])));
}

#[test]
fn presence_and_type_states() {
    assert!(satisfies(None, &C::is_undefined()));
    assert!(!satisfies(Some(&Value::Null), &C::is_undefined()));

    // null counts as present
    assert!(satisfies(Some(&Value::Null), &C::is_defined()));
    assert!(!satisfies(None, &C::is_defined()));

    assert!(satisfies(Some(&Value::Null), &C::is_null()));
    assert!(satisfies(Some(&Value::Bool(true)), &C::is_boolean()));
    assert!(satisfies(Some(&Value::Int(1)), &C::is_number()));
    assert!(satisfies(Some(&num(1.5)), &C::is_number()));
    assert!(satisfies(Some(&text("x")), &C::is_string()));
    assert!(satisfies(Some(&list(&[])), &C::is_list()));
    assert!(satisfies(Some(&map_value(&[])), &C::is_map()));
    assert!(!satisfies(Some(&text("x")), &C::is_number()));
}

#[test]
fn comparisons_follow_range_order() {
    assert!(satisfies(Some(&Value::Int(6)), &C::gt(5)));
    assert!(!satisfies(Some(&Value::Int(5)), &C::gt(5)));
    assert!(satisfies(Some(&Value::Int(5)), &C::ge(5)));
    assert!(satisfies(Some(&num(4.9)), &C::lt(5)));
    assert!(satisfies(Some(&text("apple")), &C::lt("banana")));

    // type mismatch is unsatisfied, not an error
    assert!(!satisfies(Some(&text("10")), &C::gt(5)));
    assert!(!satisfies(Some(&Value::Null), &C::gt(5)));
    assert!(!satisfies(None, &C::gt(5)));
}

#[test]
fn like_requires_a_matching_string() {
    assert!(satisfies(Some(&text("boat")), &like("bo*")));
    assert!(!satisfies(Some(&text("abode")), &like("bo*")));
    assert!(!satisfies(Some(&Value::Int(5)), &like("5*")));
    assert!(!satisfies(None, &like("*")));
}

#[test]
fn containment_modes() {
    let value = list(&["up", "down"]);
    assert!(satisfies(Some(&value), &C::contains("up")));
    assert!(satisfies(Some(&value), &C::contains_all(["up", "down"])));
    assert!(!satisfies(Some(&value), &C::contains_all(["up", "left"])));
    assert!(satisfies(Some(&value), &C::contains_any(["left", "down"])));
    assert!(!satisfies(Some(&value), &C::contains_any(["left", "right"])));
    assert!(satisfies(Some(&value), &C::contains_only(["up", "down", "left"])));
    assert!(!satisfies(Some(&value), &C::contains_only(["up"])));

    assert!(!satisfies(Some(&text("up")), &C::contains("up")));
    assert!(!satisfies(None, &C::contains("up")));
}

#[test]
fn map_conditions_read_missing_keys_as_undefined() {
    let value = map_value(&[("author", "ann"), ("state", "open")]);

    assert!(satisfies(
        Some(&value),
        &C::map().contains("author", "ann").build()
    ));
    assert!(satisfies(
        Some(&value),
        &C::map()
            .contains_key("state")
            .matches("rating", C::is_undefined())
            .build()
    ));
    assert!(!satisfies(
        Some(&value),
        &C::map().contains_key("rating").build()
    ));
    assert!(!satisfies(Some(&text("x")), &C::map().contains_key("k").build()));
}

#[test]
fn intrinsics_are_never_satisfied_by_a_bare_value() {
    let condition = C::intrinsic(intrinsic::TABLE, C::equal("review"));
    assert!(!satisfies(Some(&text("review")), &condition));
    assert!(!satisfies(None, &condition));
}

#[test]
fn boolean_composites() {
    let range = C::and(vec![C::ge(5), C::le(10)]);
    assert!(satisfies(Some(&Value::Int(7)), &range));
    assert!(!satisfies(Some(&Value::Int(11)), &range));

    let either = C::or(vec![C::equal("a"), C::equal("b")]);
    assert!(satisfies(Some(&text("b")), &either));
    assert!(!satisfies(Some(&text("c")), &either));

    assert!(satisfies(Some(&text("c")), &C::not(C::equal("a"))));
    assert!(satisfies(None, &C::not(C::equal("a"))));
}

#[test]
fn depth_limit_is_conservative() {
    let mut deep = C::always_true();
    for _ in 0..=crate::eval::MAX_CONDITION_DEPTH {
        deep = C::not(C::not(deep));
    }
    assert!(!satisfies(None, &deep));
}
