#![forbid(unsafe_code)]

//! Host change-detection hooks and the adapter's result marker.

use pluck_core::Value;

/// Lets the adapter ask its host to re-evaluate.
///
/// Any `Fn()` closure is a detector.
pub trait ChangeDetector {
    /// Request a re-check on the host's next pass.
    fn mark_for_check(&self);
}

impl<F: Fn()> ChangeDetector for F {
    fn mark_for_check(&self) {
        self();
    }
}

/// Detector that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDetector;

impl ChangeDetector for NoopDetector {
    fn mark_for_check(&self) {}
}

/// Result of a transform.
///
/// `Changed` forces the host to treat the value as new. `Unchanged` carries
/// no marker: the host compares as it normally would.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Unchanged(Value),
    Changed(Value),
}

impl Transformed {
    #[must_use]
    pub fn value(&self) -> &Value {
        match self {
            Self::Unchanged(value) | Self::Changed(value) => value,
        }
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Unchanged(value) | Self::Changed(value) => value,
        }
    }

    #[must_use]
    pub const fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}
