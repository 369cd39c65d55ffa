#![forbid(unsafe_code)]

//! Runtime: async sources and the plucking adapter.
//!
//! This crate provides:
//! - [`AsyncPluck`], which binds to one async source, tracks its latest
//!   value, and returns that value plucked along a path with identity-based
//!   change signaling
//! - [`Stream`], [`EventEmitter`], [`Deferred`] producers sharing one
//!   subscribe/cancel contract, plus the [`TaskQueue`] they defer work to
//! - [`ChangeDetector`], the hook a host implements to be told "re-check"
//!
//! # Example
//!
//! ```
//! use pluck_core::{pluck_path, Value};
//! use pluck_runtime::{AsyncPluck, Stream, Transformed};
//!
//! let prices: Stream<Value> = Stream::new();
//! let mut adapter = AsyncPluck::detached();
//! let path = pluck_path!["usd"];
//!
//! // Nothing delivered yet.
//! assert_eq!(adapter.transform(&prices, &path)?, Transformed::Unchanged(Value::Null));
//!
//! prices.emit(Value::object([("usd", 12)]));
//! assert_eq!(adapter.transform(&prices, &path)?, Transformed::Changed(Value::from(12)));
//! assert_eq!(adapter.transform(&prices, &path)?, Transformed::Unchanged(Value::from(12)));
//! # Ok::<(), pluck_runtime::PluckError>(())
//! ```

/// The plucking adapter.
pub mod adapter;
/// Change-detection hook and result marker.
pub mod change_detection;
/// Adapter configuration and environment overrides.
pub mod config;
/// Adapter errors.
pub mod error;
/// Producer primitives and the task queue.
pub mod reactive;
/// The source union and adapter input.
pub mod source;

pub use adapter::AsyncPluck;
pub use change_detection::{ChangeDetector, NoopDetector, Transformed};
pub use config::AdapterConfig;
pub use error::PluckError;
pub use reactive::{Deferred, EventEmitter, Stream, Subscription, TaskQueue};
pub use source::{Input, Source, SourceKind};
