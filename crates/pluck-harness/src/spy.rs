#![forbid(unsafe_code)]

use std::cell::Cell;
use std::rc::Rc;

use pluck_runtime::ChangeDetector;

/// Counts `mark_for_check` calls. Clones share the counter, so a test can
/// hand one clone to the adapter and keep another to inspect.
#[derive(Debug, Clone, Default)]
pub struct SpyChangeDetector {
    calls: Rc<Cell<usize>>,
}

impl SpyChangeDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests seen so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Forget earlier requests.
    pub fn reset(&self) {
        self.calls.set(0);
    }
}

impl ChangeDetector for SpyChangeDetector {
    fn mark_for_check(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}
