//! Traversal semantics for object, array, and scalar roots.

use pluck_core::{PluckPath, Value, pluck, pluck_path};

fn greeting() -> Value {
    Value::object([
        (
            "hello",
            Value::object([
                ("who", Value::from("world")),
                ("where", Value::object([("planet", "earth")])),
            ]),
        ),
        ("goodbye", Value::from("cruel fate")),
    ])
}

fn planets() -> Value {
    Value::array([
        Value::object([("planet", "earth")]),
        Value::object([("hello", "world")]),
        Value::object([("goodbye", "x")]),
        Value::object([("hello", "life"), ("goodbye", "y")]),
    ])
}

#[test]
fn object_top_level_key() {
    assert_eq!(pluck(&greeting(), &pluck_path!["goodbye"]), Value::from("cruel fate"));
}

#[test]
fn object_nested_keys() {
    assert_eq!(
        pluck(&greeting(), &pluck_path!["hello", "where", "planet"]),
        Value::from("earth")
    );
}

#[test]
fn object_missing_key_is_undefined() {
    assert!(pluck(&greeting(), &pluck_path!["n/a"]).is_undefined());
    assert!(pluck(&greeting(), &pluck_path!["n/a", "sub"]).is_undefined());
}

#[test]
fn array_direct_index() {
    let root = planets();
    let first = pluck(&root, &pluck_path![0]);
    assert_eq!(first, Value::object([("planet", "earth")]));
    assert!(first.identical(&root.as_array().unwrap()[0]));
}

#[test]
fn array_map_over_key() {
    assert_eq!(
        pluck(&planets(), &pluck_path!["hello"]),
        Value::array([
            Value::Undefined,
            Value::from("world"),
            Value::Undefined,
            Value::from("life"),
        ])
    );
}

#[test]
fn scalar_root_with_property_path() {
    for root in [Value::from(42), Value::from("text"), Value::Bool(true)] {
        assert!(pluck(&root, &pluck_path!["anything"]).is_undefined());
        assert!(pluck(&root, &pluck_path!["a", "b", 3]).is_undefined());
    }
}

#[test]
fn parsed_path_matches_built_path() {
    let parsed: PluckPath = "hello.where.planet".parse().unwrap();
    assert_eq!(pluck(&greeting(), &parsed), Value::from("earth"));
}
