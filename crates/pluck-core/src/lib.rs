#![forbid(unsafe_code)]

//! Core: dynamic values, pluck paths, and path traversal.
//!
//! # Role in async-pluck
//! `pluck-core` is the pure half of the workspace. It knows nothing about
//! subscriptions or change detection; it only answers "what does this path
//! select from this value?". The runtime (`pluck-runtime`) feeds it the
//! latest emission of an async source and compares the result's identity.
//!
//! # Primary responsibilities
//! - **Value**: a dynamic value whose containers carry reference identity.
//! - **PluckPath / PathSegment**: property-name and index steps, with a
//!   textual parser (`items[0].name`).
//! - **pluck**: the traversal, with map-over semantics for arrays.
//!
//! # Example
//!
//! ```
//! use pluck_core::{pluck, pluck_path, Value};
//!
//! let planets = Value::array([
//!     Value::object([("name", "earth")]),
//!     Value::object([("name", "mars")]),
//! ]);
//!
//! // A key applied to an array maps over its elements.
//! let names = pluck(&planets, &pluck_path!["name"]);
//! assert_eq!(names, Value::array(["earth", "mars"]));
//!
//! // An index selects one element.
//! let first = pluck(&planets, &pluck_path![0, "name"]);
//! assert_eq!(first, Value::from("earth"));
//! ```

pub mod path;
pub mod pluck;
pub mod value;

pub use path::{PathParseError, PathSegment, PluckPath};
pub use pluck::pluck;
pub use value::{Object, Value};
