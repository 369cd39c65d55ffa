#![forbid(unsafe_code)]

//! Async sources the adapter can bind to.
//!
//! [`Source`] is a tagged union over the three producer primitives. All of
//! them share one contract: `subscribe(cb)` returns a [`Subscription`] guard,
//! and dropping the guard guarantees `cb` never fires again.
//!
//! [`Input`] is what a consumer actually binds: nothing, a source, or a
//! plain value in the place where a source was expected.

use std::fmt;

use pluck_core::Value;

use crate::reactive::{Deferred, EventEmitter, Stream, Subscription};

/// Which producer primitive a [`Source`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Stream,
    Deferred,
    EventSource,
}

impl SourceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Deferred => "deferred",
            Self::EventSource => "event-source",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A producer of [`Value`]s.
#[derive(Debug, Clone)]
pub enum Source {
    Stream(Stream<Value>),
    Deferred(Deferred<Value>),
    EventSource(EventEmitter<Value>),
}

impl Source {
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Stream(_) => SourceKind::Stream,
            Self::Deferred(_) => SourceKind::Deferred,
            Self::EventSource(_) => SourceKind::EventSource,
        }
    }

    /// Reference identity: both handles point at the same producer.
    #[must_use]
    pub fn same_source(&self, other: &Source) -> bool {
        match (self, other) {
            (Self::Stream(a), Self::Stream(b)) => a.ptr_eq(b),
            (Self::Deferred(a), Self::Deferred(b)) => a.ptr_eq(b),
            (Self::EventSource(a), Self::EventSource(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Register `callback` for every value the producer delivers.
    ///
    /// For a deferred this is `then()`; dropping the guard only stops
    /// listening.
    pub fn subscribe(&self, callback: impl Fn(&Value) + 'static) -> Subscription {
        match self {
            Self::Stream(stream) => stream.subscribe(callback),
            Self::Deferred(deferred) => deferred.then(callback),
            Self::EventSource(emitter) => emitter.subscribe(callback),
        }
    }
}

impl From<Stream<Value>> for Source {
    fn from(stream: Stream<Value>) -> Self {
        Self::Stream(stream)
    }
}

impl From<Deferred<Value>> for Source {
    fn from(deferred: Deferred<Value>) -> Self {
        Self::Deferred(deferred)
    }
}

impl From<EventEmitter<Value>> for Source {
    fn from(emitter: EventEmitter<Value>) -> Self {
        Self::EventSource(emitter)
    }
}

/// What a consumer binds to the adapter.
#[derive(Debug, Clone, Default)]
pub enum Input {
    /// No source bound.
    #[default]
    Null,
    Source(Source),
    /// A plain value where a source was expected. Always rejected.
    Value(Value),
}

impl From<Source> for Input {
    fn from(source: Source) -> Self {
        Self::Source(source)
    }
}

impl From<&Source> for Input {
    fn from(source: &Source) -> Self {
        Self::Source(source.clone())
    }
}

impl From<Option<Source>> for Input {
    fn from(source: Option<Source>) -> Self {
        source.map_or(Self::Null, Self::Source)
    }
}

impl From<Stream<Value>> for Input {
    fn from(stream: Stream<Value>) -> Self {
        Self::Source(stream.into())
    }
}

impl From<&Stream<Value>> for Input {
    fn from(stream: &Stream<Value>) -> Self {
        Self::Source(stream.clone().into())
    }
}

impl From<Deferred<Value>> for Input {
    fn from(deferred: Deferred<Value>) -> Self {
        Self::Source(deferred.into())
    }
}

impl From<&Deferred<Value>> for Input {
    fn from(deferred: &Deferred<Value>) -> Self {
        Self::Source(deferred.clone().into())
    }
}

impl From<EventEmitter<Value>> for Input {
    fn from(emitter: EventEmitter<Value>) -> Self {
        Self::Source(emitter.into())
    }
}

impl From<&EventEmitter<Value>> for Input {
    fn from(emitter: &EventEmitter<Value>) -> Self {
        Self::Source(emitter.clone().into())
    }
}

/// Nullish values mean "no source"; anything else is a misuse.
impl From<Value> for Input {
    fn from(value: Value) -> Self {
        if value.is_nullish() {
            Self::Null
        } else {
            Self::Value(value)
        }
    }
}

impl From<&Value> for Input {
    fn from(value: &Value) -> Self {
        value.clone().into()
    }
}
