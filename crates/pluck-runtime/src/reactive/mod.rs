#![forbid(unsafe_code)]

//! Async source primitives.
//!
//! Three producer shapes the adapter can subscribe to:
//!
//! - [`Stream`]: hot, multi-delivery, synchronous push.
//! - [`EventEmitter`]: hot, multi-delivery, optionally delivered through a
//!   [`TaskQueue`].
//! - [`Deferred`]: single-assignment; delivery always goes through the queue.
//! - [`Subscription`]: RAII guard shared by all three; dropping it stops
//!   delivery.
//!
//! # Architecture
//!
//! All primitives use `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Callbacks are owned by the [`Subscription`] guard; producers keep only
//! `Weak` references and prune dead ones lazily.
//!
//! # Invariants
//!
//! 1. Callbacks run in registration order.
//! 2. A callback whose guard was dropped is never invoked, even when its
//!    delivery was queued before the drop.
//! 3. No producer borrow is held while a callback runs.

pub mod deferred;
pub mod event_emitter;
pub mod stream;
pub mod task_queue;

pub use deferred::Deferred;
pub use event_emitter::EventEmitter;
pub use stream::{Stream, Subscription};
pub use task_queue::TaskQueue;
