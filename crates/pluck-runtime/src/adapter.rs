#![forbid(unsafe_code)]

//! The plucking async adapter.
//!
//! [`AsyncPluck`] binds to one async [`Source`] at a time, remembers the
//! latest value it delivered, and on every [`transform`](AsyncPluck::transform)
//! returns that value narrowed by a pluck path.
//!
//! # Lifecycle
//!
//! ```text
//!   idle ──transform(source)──▶ subscribed ──value──▶ subscribed + latest
//!    ▲                              │                        │
//!    └──── transform(null) / dispose() / drop ◀──────────────┘
//! ```
//!
//! Binding a different source (by reference identity) disposes the old
//! subscription first and starts over with no latest value.
//!
//! # Change signaling
//!
//! The traversal result is compared by identity ([`Value::identical`]) with
//! the last result handed out. A new identity comes back as
//! [`Transformed::Changed`]; the same identity as [`Transformed::Unchanged`].
//! Each delivery calls [`ChangeDetector::mark_for_check`] exactly once.
//!
//! Mapping a key over an array builds a new array every time it runs. To
//! keep that identity stable between deliveries the adapter memoizes the
//! traversal on (delivery version, path); see [`AdapterConfig::memoize`].
//!
//! # Invariants
//!
//! 1. At most one live subscription at any time.
//! 2. After `dispose()` or a source switch, the old source's deliveries never
//!    reach this adapter again.
//! 3. A rejected input leaves the adapter state untouched.
//! 4. No internal borrow is held while the change detector runs.

use std::cell::RefCell;
use std::rc::Rc;

use pluck_core::{PathSegment, PluckPath, Value, pluck};
use tracing::{debug, trace, warn};

use crate::change_detection::{ChangeDetector, NoopDetector, Transformed};
use crate::config::AdapterConfig;
use crate::error::PluckError;
use crate::reactive::Subscription;
use crate::source::{Input, Source, SourceKind};

/// Latest delivered value, shared with the subscription callback.
#[derive(Debug, Default)]
struct Latest {
    value: Option<Value>,
    /// Bumped on every delivery and every reset.
    version: u64,
}

struct ActiveSource {
    source: Source,
    _subscription: Subscription,
}

struct PluckMemo {
    version: u64,
    path: Vec<PathSegment>,
    value: Value,
}

/// Subscribes to an async source and plucks a path out of its latest value.
pub struct AsyncPluck {
    config: AdapterConfig,
    detector: Rc<dyn ChangeDetector>,
    active: Option<ActiveSource>,
    latest: Rc<RefCell<Latest>>,
    last_returned: Option<Value>,
    memo: Option<PluckMemo>,
}

impl std::fmt::Debug for AsyncPluck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncPluck")
            .field("config", &self.config)
            .field("source_kind", &self.source_kind())
            .field("latest", &*self.latest.borrow())
            .field("last_returned", &self.last_returned)
            .finish_non_exhaustive()
    }
}

impl AsyncPluck {
    /// Adapter with default configuration reporting to `detector`.
    #[must_use]
    pub fn new(detector: impl ChangeDetector + 'static) -> Self {
        Self::with_config(AdapterConfig::default(), detector)
    }

    #[must_use]
    pub fn with_config(config: AdapterConfig, detector: impl ChangeDetector + 'static) -> Self {
        Self::with_shared_detector(config, Rc::new(detector))
    }

    /// Adapter sharing a detector with other adapters of the same host.
    #[must_use]
    pub fn with_shared_detector(config: AdapterConfig, detector: Rc<dyn ChangeDetector>) -> Self {
        Self {
            config,
            detector,
            active: None,
            latest: Rc::new(RefCell::new(Latest::default())),
            last_returned: None,
            memo: None,
        }
    }

    /// Adapter whose deliveries request nothing from a host.
    #[must_use]
    pub fn detached() -> Self {
        Self::new(NoopDetector)
    }

    /// Bind `input` and return its latest value plucked along `path`.
    ///
    /// - no source: disposes any subscription and returns `Unchanged(Null)`;
    /// - a source not yet bound: replaces the current subscription;
    /// - no value delivered yet: `Unchanged(Null)`;
    /// - otherwise the plucked value, `Changed` when its identity differs
    ///   from the previous result.
    ///
    /// # Errors
    ///
    /// [`PluckError::UnsupportedSource`] when `input` is a plain value.
    pub fn transform(
        &mut self,
        input: impl Into<Input>,
        path: &[PathSegment],
    ) -> Result<Transformed, PluckError> {
        let source = match input.into() {
            Input::Null => {
                self.dispose();
                return Ok(Transformed::Unchanged(Value::Null));
            }
            Input::Value(value) => {
                let found = value.type_name();
                warn!(label = %self.config.label, found, "rejected unsupported source");
                return Err(PluckError::UnsupportedSource { found });
            }
            Input::Source(source) => source,
        };

        let bound = self
            .active
            .as_ref()
            .is_some_and(|active| active.source.same_source(&source));
        if !bound {
            self.subscribe(source);
        }

        let (raw, version) = {
            let latest = self.latest.borrow();
            (latest.value.clone(), latest.version)
        };
        let Some(raw) = raw else {
            return Ok(Transformed::Unchanged(Value::Null));
        };

        let value = self.evaluate(&raw, version, path);
        Ok(self.settle(value))
    }

    /// [`transform`](Self::transform) with a textual path such as
    /// `"items[0].name"`.
    ///
    /// # Errors
    ///
    /// [`PluckError::Path`] when `path` does not parse (checked before the
    /// input is looked at), or any error of `transform`.
    pub fn transform_str(
        &mut self,
        input: impl Into<Input>,
        path: &str,
    ) -> Result<Transformed, PluckError> {
        let path = PluckPath::parse(path)?;
        self.transform(input, &path)
    }

    /// Drop the current subscription and forget the latest value.
    ///
    /// Idempotent; a no-op when nothing is bound.
    pub fn dispose(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(
                label = %self.config.label,
                kind = %active.source.kind(),
                "disposed subscription"
            );
        }
        let mut latest = self.latest.borrow_mut();
        latest.value = None;
        latest.version += 1;
        self.memo = None;
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn source_kind(&self) -> Option<SourceKind> {
        self.active.as_ref().map(|active| active.source.kind())
    }

    /// The latest value delivered by the bound source, unplucked.
    #[must_use]
    pub fn latest_raw(&self) -> Option<Value> {
        self.latest.borrow().value.clone()
    }

    /// The last result reported as changed.
    #[must_use]
    pub fn last_returned(&self) -> Option<&Value> {
        self.last_returned.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    fn subscribe(&mut self, source: Source) {
        self.dispose();

        let latest = Rc::clone(&self.latest);
        let detector = Rc::clone(&self.detector);
        let label = self.config.label.clone();
        let subscription = source.subscribe(move |value| {
            let version = {
                let mut latest = latest.borrow_mut();
                latest.value = Some(value.clone());
                latest.version += 1;
                latest.version
            };
            trace!(label = %label, version, "value delivered");
            detector.mark_for_check();
        });

        debug!(label = %self.config.label, kind = %source.kind(), "subscribed");
        self.active = Some(ActiveSource {
            source,
            _subscription: subscription,
        });
    }

    fn evaluate(&mut self, raw: &Value, version: u64, path: &[PathSegment]) -> Value {
        if self.config.memoize
            && let Some(memo) = &self.memo
            && memo.version == version
            && memo.path.as_slice() == path
        {
            trace!(label = %self.config.label, version, "pluck memo hit");
            return memo.value.clone();
        }

        let value = pluck(raw, path);
        if self.config.memoize {
            self.memo = Some(PluckMemo {
                version,
                path: path.to_vec(),
                value: value.clone(),
            });
        }
        value
    }

    fn settle(&mut self, value: Value) -> Transformed {
        if let Some(last) = &self.last_returned
            && last.identical(&value)
        {
            return Transformed::Unchanged(value);
        }
        self.last_returned = Some(value.clone());
        Transformed::Changed(value)
    }
}

impl Drop for AsyncPluck {
    fn drop(&mut self) {
        self.dispose();
    }
}
