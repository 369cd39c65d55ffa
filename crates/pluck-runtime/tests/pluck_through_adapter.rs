//! Path selection applied to delivered values.

use pluck_core::{PluckPath, Value, pluck_path};
use pluck_harness::fixtures::{greeting, planets, sparse_planets, tick};
use pluck_harness::init_test_logging;
use pluck_runtime::{AdapterConfig, AsyncPluck, NoopDetector, PluckError, Stream, Transformed};

/// Emit `value` on a fresh stream and pluck `path` out of it.
fn pluck_delivered(value: Value, path: &PluckPath) -> Value {
    init_test_logging();
    let stream = Stream::<Value>::new();
    let mut adapter = AsyncPluck::detached();
    adapter.transform(&stream, path).unwrap();
    stream.emit(value);
    adapter.transform(&stream, path).unwrap().into_value()
}

#[test]
fn object_paths() {
    assert_eq!(
        pluck_delivered(greeting(), &pluck_path!["goodbye"]),
        Value::from("cruel fate")
    );
    assert_eq!(
        pluck_delivered(greeting(), &pluck_path!["hello", "where", "planet"]),
        Value::from("earth")
    );
    assert!(pluck_delivered(greeting(), &pluck_path!["n/a"]).is_undefined());
    assert!(pluck_delivered(greeting(), &pluck_path!["n/a", "sub"]).is_undefined());
}

#[test]
fn array_index_and_map_over() {
    assert_eq!(
        pluck_delivered(planets(), &pluck_path![0]),
        Value::object([("planet", "earth")])
    );
    assert_eq!(
        pluck_delivered(planets(), &pluck_path!["hello"]),
        Value::array([
            Value::Undefined,
            Value::from("world"),
            Value::Undefined,
            Value::from("life"),
        ])
    );
}

#[test]
fn map_over_keeps_nullish_elements() {
    assert_eq!(
        pluck_delivered(sparse_planets(), &pluck_path!["name"]),
        Value::array([
            Value::from("earth"),
            Value::Null,
            Value::from("mars"),
            Value::Undefined,
        ])
    );
}

#[test]
fn scalar_with_property_path_is_undefined() {
    assert!(pluck_delivered(Value::from(42), &pluck_path!["length"]).is_undefined());
    assert!(pluck_delivered(Value::from("text"), &pluck_path!["x", "y"]).is_undefined());
}

#[test]
fn index_out_of_range_is_undefined() {
    assert!(pluck_delivered(planets(), &pluck_path![10]).is_undefined());
    assert!(pluck_delivered(planets(), &pluck_path![-1]).is_undefined());
}

#[test]
fn textual_paths() {
    init_test_logging();
    let stream = Stream::<Value>::new();
    let mut adapter = AsyncPluck::detached();
    adapter.transform_str(&stream, "num.val").unwrap();

    stream.emit(tick(4));
    assert_eq!(
        adapter.transform_str(&stream, "num.val").unwrap(),
        Transformed::Changed(Value::from(4))
    );
    assert_eq!(
        adapter.transform_str(&stream, "num.val").unwrap(),
        Transformed::Unchanged(Value::from(4))
    );

    stream.emit(planets());
    assert_eq!(
        adapter.transform_str(&stream, "[3].goodbye").unwrap(),
        Transformed::Changed(Value::from("y"))
    );

    let err = adapter.transform_str(&stream, "[x]").unwrap_err();
    assert!(matches!(err, PluckError::Path(_)));
    assert!(adapter.is_subscribed());
}

#[test]
fn new_delivery_with_equal_content_is_a_change() {
    init_test_logging();
    let stream = Stream::<Value>::new();
    let mut adapter = AsyncPluck::detached();
    let path = pluck_path!["hello"];
    adapter.transform(&stream, &path).unwrap();

    stream.emit(greeting());
    let first = adapter.transform(&stream, &path).unwrap();
    stream.emit(greeting());
    let second = adapter.transform(&stream, &path).unwrap();

    assert!(first.is_changed());
    assert!(second.is_changed());
    assert_eq!(first.value(), second.value());
    assert!(!first.value().identical(second.value()));
}

#[test]
fn scalar_results_stay_unchanged_across_equal_deliveries() {
    init_test_logging();
    let stream = Stream::<Value>::new();
    let mut adapter = AsyncPluck::detached();
    let path = pluck_path!["hello", "who"];
    adapter.transform(&stream, &path).unwrap();

    stream.emit(greeting());
    assert!(adapter.transform(&stream, &path).unwrap().is_changed());
    stream.emit(greeting());
    assert_eq!(
        adapter.transform(&stream, &path).unwrap(),
        Transformed::Unchanged(Value::from("world"))
    );
}

#[test]
fn path_change_without_delivery_recomputes() {
    init_test_logging();
    let stream = Stream::<Value>::new();
    let mut adapter = AsyncPluck::with_config(
        AdapterConfig::default().with_label("path-change"),
        NoopDetector,
    );
    adapter.transform(&stream, &[]).unwrap();
    stream.emit(greeting());

    assert_eq!(
        adapter
            .transform(&stream, &pluck_path!["goodbye"])
            .unwrap()
            .into_value(),
        Value::from("cruel fate")
    );
    assert_eq!(
        adapter
            .transform(&stream, &pluck_path!["hello", "who"])
            .unwrap()
            .into_value(),
        Value::from("world")
    );
    assert_eq!(adapter.config().label, "path-change");
}
