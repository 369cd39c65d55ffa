#![forbid(unsafe_code)]

//! Event source with optional asynchronous delivery.
//!
//! An [`EventEmitter<T>`] is a [`Stream<T>`] whose emissions can be pushed
//! through a [`TaskQueue`]. In async mode `emit()` only schedules the
//! delivery; subscribers are resolved when the task runs, so a subscription
//! dropped in between receives nothing.

use super::stream::{Stream, Subscription};
use super::task_queue::TaskQueue;

/// Hot event source. Clones share the same subscribers.
pub struct EventEmitter<T> {
    stream: Stream<T>,
    queue: Option<TaskQueue>,
}

impl<T> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            stream: self.stream.clone(),
            queue: self.queue.clone(),
        }
    }
}

impl<T> std::fmt::Debug for EventEmitter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("is_async", &self.queue.is_some())
            .field("stream", &self.stream)
            .finish()
    }
}

impl<T: 'static> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> EventEmitter<T> {
    /// Synchronous emitter: `emit()` delivers before returning.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stream: Stream::new(),
            queue: None,
        }
    }

    /// Asynchronous emitter: each `emit()` is delivered on `queue`.
    #[must_use]
    pub fn with_queue(queue: &TaskQueue) -> Self {
        Self {
            stream: Stream::new(),
            queue: Some(queue.clone()),
        }
    }

    pub fn emit(&self, value: T) {
        match &self.queue {
            None => {
                self.stream.emit(value);
            }
            Some(queue) => {
                let stream = self.stream.clone();
                queue.schedule(move || {
                    stream.emit(value);
                });
            }
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.stream.subscribe(callback)
    }

    #[must_use]
    pub fn is_async(&self) -> bool {
        self.queue.is_some()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.stream.subscriber_count()
    }

    /// True when both handles refer to the same emitter.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.stream.ptr_eq(&other.stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn sync_emitter_delivers_immediately() {
        let emitter = EventEmitter::new();
        let seen = Rc::new(Cell::new(0));
        let seen_clone = Rc::clone(&seen);
        let _sub = emitter.subscribe(move |v: &i32| seen_clone.set(*v));

        emitter.emit(4);
        assert_eq!(seen.get(), 4);
        assert!(!emitter.is_async());
    }

    #[test]
    fn async_emitter_delivers_on_drain() {
        let queue = TaskQueue::new();
        let emitter = EventEmitter::with_queue(&queue);
        let seen = Rc::new(Cell::new(0));
        let seen_clone = Rc::clone(&seen);
        let _sub = emitter.subscribe(move |v: &i32| seen_clone.set(*v));

        emitter.emit(9);
        assert_eq!(seen.get(), 0);
        assert_eq!(queue.run_until_idle(), 1);
        assert_eq!(seen.get(), 9);
    }

    #[test]
    fn unsubscribed_before_drain_sees_nothing() {
        let queue = TaskQueue::new();
        let emitter = EventEmitter::with_queue(&queue);
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let sub = emitter.subscribe(move |_: &i32| hits_clone.set(hits_clone.get() + 1));

        emitter.emit(1);
        drop(sub);
        queue.run_until_idle();
        assert_eq!(hits.get(), 0);
    }
}
