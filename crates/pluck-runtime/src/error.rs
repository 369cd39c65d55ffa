#![forbid(unsafe_code)]

//! Adapter errors.

use std::fmt;

use pluck_core::PathParseError;

/// Errors surfaced by [`AsyncPluck`](crate::AsyncPluck).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluckError {
    /// A non-null input that is not a stream, deferred, or event source.
    UnsupportedSource {
        /// Type name of the rejected value (`"number"`, `"object"`, ...).
        found: &'static str,
    },
    /// A textual path failed to parse.
    Path(PathParseError),
}

impl fmt::Display for PluckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSource { found } => write!(
                f,
                "unsupported source: expected a stream, deferred, or event source, found {found}"
            ),
            Self::Path(err) => write!(f, "invalid pluck path: {err}"),
        }
    }
}

impl std::error::Error for PluckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Path(err) => Some(err),
            Self::UnsupportedSource { .. } => None,
        }
    }
}

impl From<PathParseError> for PluckError {
    fn from(err: PathParseError) -> Self {
        Self::Path(err)
    }
}
