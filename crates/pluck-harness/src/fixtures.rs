#![forbid(unsafe_code)]

use pluck_core::Value;
use serde_json::json;

/// Nested object document.
///
/// `{hello: {who: "world", where: {planet: "earth"}}, goodbye: "cruel fate"}`
#[must_use]
pub fn greeting() -> Value {
    Value::from(json!({
        "hello": {
            "who": "world",
            "where": { "planet": "earth" }
        },
        "goodbye": "cruel fate"
    }))
}

/// Array of heterogeneous objects; only some carry `hello` / `goodbye`.
#[must_use]
pub fn planets() -> Value {
    Value::from(json!([
        { "planet": "earth" },
        { "hello": "world" },
        { "goodbye": "x" },
        { "hello": "life", "goodbye": "y" }
    ]))
}

/// Array mixing nullish entries with objects.
#[must_use]
pub fn sparse_planets() -> Value {
    Value::array([
        Value::object([("name", "earth")]),
        Value::Null,
        Value::object([("name", "mars")]),
        Value::Undefined,
    ])
}

/// One tick of the demo feed: `{num: {val: tick}}`.
#[must_use]
pub fn tick(n: u64) -> Value {
    Value::from(json!({ "num": { "val": n } }))
}
