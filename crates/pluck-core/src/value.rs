#![forbid(unsafe_code)]

//! Dynamic values with reference identity.
//!
//! # Design
//!
//! [`Value`] is the payload carried by every async source. Containers
//! (arrays and objects) live behind an `Rc`, so cloning a `Value` is O(1)
//! and shares the container. That sharing is what gives values an
//! *identity*: two clones of the same array are [`Value::identical`], while
//! two arrays with equal contents built separately are not.
//!
//! | Variant     | Identity                         |
//! |-------------|----------------------------------|
//! | `Undefined` | always identical to `Undefined`  |
//! | `Null`      | always identical to `Null`       |
//! | `Bool`      | by value                         |
//! | `Number`    | by value; `NaN` is identical to `NaN` |
//! | `String`    | by content                       |
//! | `Array`     | by pointer                       |
//! | `Object`    | by pointer                       |
//!
//! `PartialEq` is deep structural equality and is unrelated to identity.
//!
//! # Invariants
//!
//! 1. `a.identical(&a.clone())` holds for every value.
//! 2. `identical` implies `==` for every value except `NaN` numbers.
//! 3. Property access never fails: missing targets yield `Undefined`.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Key-ordered map backing [`Value::Object`].
pub type Object = BTreeMap<String, Value>;

/// A dynamic, cheaply clonable value.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent: a missing key, an out-of-range index, or no value at all.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(Rc<Vec<Value>>),
    Object(Rc<Object>),
}

impl Value {
    /// Build an array value from anything convertible into values.
    #[must_use]
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::Array(Rc::new(items.into_iter().map(Into::into).collect()))
    }

    /// Build an object value from key/value pairs. Later duplicates win.
    #[must_use]
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Object(Rc::new(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True for `Null` and `Undefined`.
    #[must_use]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(&**s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(map) => Some(&**map),
            _ => None,
        }
    }

    /// Short lowercase name of the variant, used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Identity comparison: pointer equality for containers, value equality
    /// for primitives.
    #[must_use]
    pub fn identical(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Property access by name.
    ///
    /// Objects look the key up; arrays accept a canonical decimal key
    /// (`"0"`, `"12"`, but not `"01"`) as an index; every other value
    /// yields `Undefined`.
    #[must_use]
    pub fn property(&self, key: &str) -> Value {
        match self {
            Self::Object(map) => map.get(key).cloned().unwrap_or_default(),
            Self::Array(items) => canonical_index(key)
                .and_then(|i| items.get(i).cloned())
                .unwrap_or_default(),
            _ => Self::Undefined,
        }
    }

    /// Positional access.
    ///
    /// Arrays index directly (negative or out-of-range yields `Undefined`);
    /// objects look up the decimal form of the index as a key.
    #[must_use]
    pub fn index(&self, index: i64) -> Value {
        match self {
            Self::Array(items) => usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i).cloned())
                .unwrap_or_default(),
            Self::Object(map) => map.get(&index.to_string()).cloned().unwrap_or_default(),
            _ => Self::Undefined,
        }
    }
}

/// Largest integer an `f64` represents exactly (2^53 - 1).
#[cfg(feature = "serde")]
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn canonical_index(key: &str) -> Option<usize> {
    let n: usize = key.parse().ok()?;
    (n.to_string() == key).then_some(n)
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(Rc::from(value))
    }
}

impl From<Rc<str>> for Value {
    fn from(value: Rc<str>) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(Rc::new(value))
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Self::Object(Rc::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        write!(f, "{n}")
    }
}

/// Compact JSON-like rendering. `Undefined` prints as `undefined`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => fmt_number(*n, f),
            Self::String(s) => write!(f, "{:?}", &**s),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key:?}:{item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Integral numbers in the exactly-representable range serialize as
/// integers so `3.0` renders as `3`.
#[cfg(feature = "serde")]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Self::Undefined | Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                serializer.serialize_i64(*n as i64)
            }
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, item) in map.iter() {
                    out.serialize_entry(key, item)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::from(s),
            serde_json::Value::Array(items) => Self::array(items),
            serde_json::Value::Object(map) => Self::object(map),
        }
    }
}

#[cfg(feature = "json")]
impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Undefined | Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => {
                Self::Number(serde_json::Number::from(*n as i64))
            }
            Value::Number(n) => serde_json::Number::from_f64(*n).map_or(Self::Null, Self::Number),
            Value::String(s) => Self::String(s.to_string()),
            Value::Array(items) => Self::Array(items.iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_are_identical() {
        let arr = Value::array([1, 2, 3]);
        assert!(arr.identical(&arr.clone()));

        let obj = Value::object([("a", 1)]);
        assert!(obj.identical(&obj.clone()));
    }

    #[test]
    fn equal_containers_are_not_identical() {
        let a = Value::array([1, 2]);
        let b = Value::array([1, 2]);
        assert_eq!(a, b);
        assert!(!a.identical(&b));
    }

    #[test]
    fn primitives_compare_by_value() {
        assert!(Value::from("x").identical(&Value::from(String::from("x"))));
        assert!(Value::from(1).identical(&Value::from(1.0)));
        assert!(!Value::from(1).identical(&Value::from("1")));
        assert!(Value::Null.identical(&Value::Null));
        assert!(!Value::Null.identical(&Value::Undefined));
    }

    #[test]
    fn nan_is_identical_to_itself() {
        let nan = Value::Number(f64::NAN);
        assert!(nan.identical(&Value::Number(f64::NAN)));
        assert_ne!(nan, Value::Number(f64::NAN));
    }

    #[test]
    fn property_on_object_and_array() {
        let obj = Value::object([("k", "v")]);
        assert_eq!(obj.property("k"), Value::from("v"));
        assert!(obj.property("missing").is_undefined());

        let arr = Value::array(["a", "b"]);
        assert_eq!(arr.property("1"), Value::from("b"));
        assert!(arr.property("01").is_undefined());
        assert!(arr.property("length").is_undefined());
    }

    #[test]
    fn index_on_object_uses_decimal_key() {
        let obj = Value::object([("0", "zero")]);
        assert_eq!(obj.index(0), Value::from("zero"));
        assert!(obj.index(1).is_undefined());
    }

    #[test]
    fn index_out_of_range_is_undefined() {
        let arr = Value::array([1]);
        assert!(arr.index(-1).is_undefined());
        assert!(arr.index(5).is_undefined());
    }

    #[test]
    fn scalars_have_no_properties() {
        assert!(Value::from("hello").property("length").is_undefined());
        assert!(Value::from("hello").index(0).is_undefined());
        assert!(Value::from(42).property("x").is_undefined());
        assert!(Value::Bool(true).index(0).is_undefined());
    }

    #[test]
    fn option_converts_none_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn display_is_json_like() {
        let v = Value::object([
            ("a", Value::array([Value::from(1), Value::Null, Value::Undefined])),
            ("b", Value::from("q\"x")),
        ]);
        assert_eq!(v.to_string(), r#"{"a":[1,null,undefined],"b":"q\"x"}"#);
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::from(1).as_bool(), None);

        let obj = Value::object([("b", 2), ("a", 1)]);
        let map = obj.as_object().expect("object");
        assert_eq!(map.keys().map(String::as_str).collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(map.get("a"), Some(&Value::from(1)));
        assert!(Value::array([1]).as_object().is_none());
        assert!(Value::Null.as_object().is_none());
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Undefined.type_name(), "undefined");
        assert_eq!(Value::array(Vec::<Value>::new()).type_name(), "array");
        assert_eq!(Value::object(Vec::<(String, Value)>::new()).type_name(), "object");
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_conversion_keeps_shape() {
        let json = serde_json::json!({"n": 3, "xs": [true, null, "s"]});
        let value = Value::from(json.clone());
        assert_eq!(value.property("n"), Value::from(3));
        assert_eq!(serde_json::Value::from(&value), json);
    }

    #[cfg(feature = "json")]
    #[test]
    fn serialize_integral_numbers_without_fraction() {
        let value = Value::object([("n", Value::from(3)), ("f", Value::from(1.5))]);
        let text = serde_json::to_string(&value).expect("serialize");
        assert_eq!(text, r#"{"f":1.5,"n":3}"#);
    }
}
