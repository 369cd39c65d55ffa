#![forbid(unsafe_code)]

//! Test harness and reference fixtures for async-pluck.
//!
//! - [`SpyChangeDetector`] counts `mark_for_check` requests
//! - [`fixtures`] holds the reference documents used across test suites
//! - [`init_test_logging`] routes tracing output through the test writer

/// Reference documents.
pub mod fixtures;
/// Change detector that records calls.
pub mod spy;

pub use spy::SpyChangeDetector;

use tracing_subscriber::EnvFilter;

/// Install a test-friendly tracing subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `debug` for the async-pluck crates.
/// Later calls are no-ops.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pluck_runtime=debug,pluck_core=debug"));
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}
