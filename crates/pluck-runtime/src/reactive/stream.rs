#![forbid(unsafe_code)]

//! Hot push stream with RAII subscriptions.
//!
//! # Design
//!
//! [`Stream<T>`] keeps its subscribers in shared, reference-counted storage
//! (`Rc<RefCell<..>>`). Each subscriber callback is owned by the
//! [`Subscription`] guard handed back from `subscribe()`; the stream only
//! holds a `Weak` to it. Dropping the guard therefore makes the callback
//! unreachable immediately, even in the middle of a notification pass.
//!
//! Unlike a state container, a stream keeps no current value: late
//! subscribers see only emissions that happen after they subscribe.
//!
//! # Performance
//!
//! | Operation     | Complexity                 |
//! |---------------|----------------------------|
//! | `emit()`      | O(S) where S = subscribers |
//! | `subscribe()` | O(1) amortized             |
//! | `complete()`  | O(S)                       |
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: guards stored forever keep their callbacks alive.
//!   Dead weak references are pruned lazily on the next `emit()`.
//! - **Re-entrant emit**: a callback may emit on the same stream; the nested
//!   emission is delivered before the outer pass continues.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A subscriber callback stored as a strong `Rc` in the guard, handed out
/// as `Weak` to the producer.
pub(crate) type CallbackRc<T> = Rc<dyn Fn(&T)>;
pub(crate) type CallbackWeak<T> = Weak<dyn Fn(&T)>;

struct StreamInner<T> {
    subscribers: Vec<CallbackWeak<T>>,
    emissions: u64,
    completed: bool,
}

/// A hot, multi-delivery push stream.
///
/// Cloning a `Stream` creates a new handle to the **same** stream.
///
/// # Invariants
///
/// 1. Subscribers are called in registration order.
/// 2. A dropped [`Subscription`] is never called again.
/// 3. After `complete()`, `emit()` is a no-op and returns `false`.
pub struct Stream<T> {
    inner: Rc<RefCell<StreamInner<T>>>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Stream")
            .field("emissions", &inner.emissions)
            .field("completed", &inner.completed)
            .field("subscriber_count", &inner.subscribers.len())
            .finish()
    }
}

impl<T: 'static> Default for Stream<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Stream<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StreamInner {
                subscribers: Vec::new(),
                emissions: 0,
                completed: false,
            })),
        }
    }

    /// Deliver `value` to every live subscriber, synchronously.
    ///
    /// Returns `false` if the stream has completed.
    pub fn emit(&self, value: T) -> bool {
        let subscribers: Vec<CallbackWeak<T>> = {
            let mut inner = self.inner.borrow_mut();
            if inner.completed {
                return false;
            }
            inner.emissions += 1;
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.clone()
        };

        // Upgrade lazily so a guard dropped mid-pass is honored.
        for weak in &subscribers {
            if let Some(callback) = weak.upgrade() {
                callback(&value);
            }
        }
        true
    }

    /// Subscribe to future emissions.
    ///
    /// Returns a [`Subscription`] guard; dropping it unsubscribes. Subscribing
    /// to a completed stream returns an inert guard.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let mut inner = self.inner.borrow_mut();
        if !inner.completed {
            inner.subscribers.push(Rc::downgrade(&strong));
        }
        Subscription::new(strong)
    }

    /// Complete the stream: drop every subscriber and ignore later emits.
    pub fn complete(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.completed = true;
        inner.subscribers.clear();
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.inner.borrow().completed
    }

    /// Number of accepted `emit()` calls.
    #[must_use]
    pub fn emission_count(&self) -> u64 {
        self.inner.borrow().emissions
    }

    /// Number of registered subscribers, including dead ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// True when both handles refer to the same stream.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// RAII guard for a subscriber callback.
///
/// Holds the only strong reference to the callback. Dropping the guard
/// (or calling [`Subscription::unsubscribe`]) makes the producer's `Weak`
/// fail to upgrade, so the callback is never invoked again.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    /// Type-erased strong reference keeping the callback `Rc` alive.
    _guard: Box<dyn std::any::Any>,
}

impl Subscription {
    pub(crate) fn new<T: 'static>(callback: CallbackRc<T>) -> Self {
        // `Rc<dyn Fn(&T)>` cannot coerce to `Rc<dyn Any>`; box the Rc itself.
        Self {
            _guard: Box::new(callback),
        }
    }

    /// Explicitly unsubscribe. Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
