#![forbid(unsafe_code)]

//! Single-assignment deferred value.
//!
//! A [`Deferred<T>`] resolves at most once. Listeners attached with
//! [`Deferred::then`] are always called asynchronously through the
//! deferred's [`TaskQueue`], including listeners attached after resolution.
//!
//! A deferred cannot be cancelled. Dropping the [`Subscription`] returned by
//! `then()` only stops *listening*: a delivery already queued for that
//! listener finds the callback gone and does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use super::stream::{CallbackRc, CallbackWeak, Subscription};
use super::task_queue::TaskQueue;

struct DeferredInner<T> {
    value: Option<T>,
    listeners: Vec<CallbackWeak<T>>,
}

/// A value that becomes available later, exactly once.
///
/// Cloning a `Deferred` creates a new handle to the same deferred.
pub struct Deferred<T> {
    inner: Rc<RefCell<DeferredInner<T>>>,
    queue: TaskQueue,
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            queue: self.queue.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Deferred")
            .field("resolved", &inner.value.is_some())
            .field("listener_count", &inner.listeners.len())
            .finish()
    }
}

impl<T: Clone + 'static> Deferred<T> {
    /// Create a pending deferred whose deliveries run on `queue`.
    #[must_use]
    pub fn new(queue: &TaskQueue) -> Self {
        Self {
            inner: Rc::new(RefCell::new(DeferredInner {
                value: None,
                listeners: Vec::new(),
            })),
            queue: queue.clone(),
        }
    }

    /// Resolve with `value` and queue delivery to current listeners.
    ///
    /// Returns `false` (and keeps the first value) if already resolved.
    pub fn resolve(&self, value: T) -> bool {
        let listeners = {
            let mut inner = self.inner.borrow_mut();
            if inner.value.is_some() {
                return false;
            }
            inner.value = Some(value.clone());
            std::mem::take(&mut inner.listeners)
        };
        for listener in listeners {
            self.deliver(listener, value.clone());
        }
        true
    }

    /// Listen for the resolved value.
    ///
    /// The callback runs on the task queue once the deferred is resolved
    /// (immediately queued if it already is).
    pub fn then(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let strong: CallbackRc<T> = Rc::new(callback);
        let weak = Rc::downgrade(&strong);
        let resolved = self.inner.borrow().value.clone();
        match resolved {
            Some(value) => self.deliver(weak, value),
            None => {
                let mut inner = self.inner.borrow_mut();
                inner.listeners.retain(|w| w.strong_count() > 0);
                inner.listeners.push(weak);
            }
        }
        Subscription::new(strong)
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.inner.borrow().value.is_some()
    }

    /// The resolved value, if any.
    #[must_use]
    pub fn value(&self) -> Option<T> {
        self.inner.borrow().value.clone()
    }

    /// True when both handles refer to the same deferred.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn deliver(&self, listener: CallbackWeak<T>, value: T) {
        self.queue.schedule(move || {
            if let Some(callback) = listener.upgrade() {
                callback(&value);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn delivery_waits_for_the_queue() {
        let queue = TaskQueue::new();
        let deferred = Deferred::new(&queue);
        let seen = Rc::new(Cell::new(None));
        let seen_clone = Rc::clone(&seen);
        let _sub = deferred.then(move |v: &i32| seen_clone.set(Some(*v)));

        assert!(deferred.resolve(5));
        assert_eq!(seen.get(), None);
        queue.run_until_idle();
        assert_eq!(seen.get(), Some(5));
    }

    #[test]
    fn late_listener_still_gets_value_asynchronously() {
        let queue = TaskQueue::new();
        let deferred = Deferred::new(&queue);
        deferred.resolve("done");
        queue.run_until_idle();

        let seen = Rc::new(Cell::new(""));
        let seen_clone = Rc::clone(&seen);
        let _sub = deferred.then(move |v: &&str| seen_clone.set(v));
        assert_eq!(seen.get(), "");
        queue.run_until_idle();
        assert_eq!(seen.get(), "done");
    }

    #[test]
    fn resolves_only_once() {
        let queue = TaskQueue::new();
        let deferred = Deferred::new(&queue);
        assert!(deferred.resolve(1));
        assert!(!deferred.resolve(2));
        assert_eq!(deferred.value(), Some(1));
        assert!(deferred.is_resolved());
    }

    #[test]
    fn dropped_listener_misses_queued_delivery() {
        let queue = TaskQueue::new();
        let deferred = Deferred::new(&queue);
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let sub = deferred.then(move |_: &i32| hits_clone.set(hits_clone.get() + 1));

        deferred.resolve(1);
        drop(sub);
        assert_eq!(queue.run_until_idle(), 1);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn clones_share_state() {
        let queue = TaskQueue::new();
        let a = Deferred::new(&queue);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        b.resolve(3);
        assert_eq!(a.value(), Some(3));
    }
}
