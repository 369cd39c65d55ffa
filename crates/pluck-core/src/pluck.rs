#![forbid(unsafe_code)]

//! Path traversal over [`Value`]s.
//!
//! [`pluck`] walks a value along a path, one segment at a time:
//!
//! | Current value | Segment | Result |
//! |---------------|---------|--------|
//! | null / undefined | any | traversal stops, value kept as-is |
//! | array | index | element at index (undefined when out of range) |
//! | array | key | new array: `e[key]` per element, nullish elements kept |
//! | object | key | property (undefined when missing) |
//! | object | index | property named by the decimal index |
//! | bool / number / string | any | undefined |
//!
//! The traversal never fails. A missing target is a normal `Undefined`
//! value that flows through the remaining segments.

use crate::path::PathSegment;
use crate::value::Value;

/// Walk `root` along `path`.
///
/// The empty path returns a clone of `root` (same identity).
#[must_use]
pub fn pluck(root: &Value, path: &[PathSegment]) -> Value {
    let mut current = root.clone();
    for segment in path {
        if current.is_nullish() {
            break;
        }
        current = step(&current, segment);
    }
    current
}

/// Apply a single segment to a non-nullish value.
#[must_use]
pub fn step(value: &Value, segment: &PathSegment) -> Value {
    match (value, segment) {
        (Value::Array(_), PathSegment::Index(index)) => value.index(*index),
        (Value::Array(items), PathSegment::Key(key)) => Value::array(items.iter().map(|item| {
            if item.is_nullish() {
                item.clone()
            } else {
                item.property(key)
            }
        })),
        (Value::Object(_), PathSegment::Key(key)) => value.property(key),
        (Value::Object(_), PathSegment::Index(index)) => value.index(*index),
        _ => Value::Undefined,
    }
}
