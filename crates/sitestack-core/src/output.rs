//! Deferred values resolved by the provisioning engine.
//!
//! An [`Output`] is a promise-like handle to an attribute that is only known
//! after the external apply step creates the underlying resource (a generated
//! bucket name, an ARN, a distribution domain). Graph construction wires
//! outputs between resources without ever blocking; the engine later calls
//! [`Output::resolve`] in dependency order, which runs any continuations
//! registered through [`Output::map`].
//!
//! Outputs carry *provenance*: the [`ResourceId`]s of the resources their
//! value derives from. The stack builder turns provenance into dependency
//! edges, so referencing an attribute is what creates an edge.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{SiteStackError, SiteStackResult};
use crate::types::ResourceId;

type Continuation<T> = Box<dyn FnOnce(&T) + Send>;

enum State<T> {
    /// Not yet resolved; continuations run on resolution, in registration
    /// order.
    Pending(Vec<Continuation<T>>),
    /// Resolved; the value never changes afterwards.
    Resolved(T),
}

/// A deferred value with explicit resource provenance.
///
/// Clones share the same underlying state: resolving one handle resolves
/// them all.
pub struct Output<T> {
    state: Arc<Mutex<State<T>>>,
    sources: Vec<ResourceId>,
    label: Option<String>,
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            sources: self.sources.clone(),
            label: self.label.clone(),
        }
    }
}

impl<T> Output<T> {
    /// Create an unresolved output with no resource provenance.
    #[must_use]
    pub fn pending() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Pending(Vec::new()))),
            sources: Vec::new(),
            label: None,
        }
    }

    /// Create an unresolved output derived from the given resources.
    #[must_use]
    pub fn pending_from(sources: impl IntoIterator<Item = ResourceId>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Pending(Vec::new()))),
            sources: sources.into_iter().collect(),
            label: None,
        }
    }

    /// Create an already-resolved output with no resource provenance.
    #[must_use]
    pub fn resolved(value: T) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::Resolved(value))),
            sources: Vec::new(),
            label: None,
        }
    }

    /// Attach a human-readable label (`"siteBucket.bucket"`), used in plan
    /// rendering and error messages.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The resources this value derives from.
    #[must_use]
    pub fn sources(&self) -> &[ResourceId] {
        &self.sources
    }

    /// The label attached to this output, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Whether the value has been resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(&*self.state.lock(), State::Resolved(_))
    }

    /// Token rendered in plan documents while the value is unknown.
    #[must_use]
    pub fn reference_token(&self) -> String {
        self.label
            .as_ref()
            .map_or_else(|| "<computed>".to_owned(), |label| format!("${{{label}}}"))
    }

    fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_owned())
    }
}

impl<T: Clone + Send + 'static> Output<T> {
    /// Clone of the resolved value, or `None` while pending.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        match &*self.state.lock() {
            State::Resolved(value) => Some(value.clone()),
            State::Pending(_) => None,
        }
    }

    /// Resolve the value and run all registered continuations.
    ///
    /// This is the engine-facing half of the deferred-value contract; stack
    /// programs never call it.
    ///
    /// # Errors
    ///
    /// Returns [`SiteStackError::AlreadyResolved`] if the value was resolved
    /// before. The original value is kept.
    pub fn resolve(&self, value: T) -> SiteStackResult<()> {
        let mut guard = self.state.lock();
        let previous = std::mem::replace(&mut *guard, State::Resolved(value.clone()));
        match previous {
            State::Resolved(original) => {
                *guard = State::Resolved(original);
                drop(guard);
                Err(SiteStackError::AlreadyResolved {
                    output: self.display_label(),
                })
            }
            State::Pending(continuations) => {
                drop(guard);
                debug!(
                    output = %self.display_label(),
                    continuations = continuations.len(),
                    "deferred value resolved"
                );
                for continuation in continuations {
                    continuation(&value);
                }
                Ok(())
            }
        }
    }

    /// Derive a new output that resolves with `f(&value)` once this one
    /// resolves.
    ///
    /// `f` runs at most once, synchronously, at resolution time; it is never
    /// evaluated eagerly. The derived output inherits this output's resource
    /// provenance. If this output is already resolved, the derived output
    /// resolves immediately.
    pub fn map<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(&T) -> U + Send + 'static,
    {
        let derived = Output::<U>::pending_from(self.sources.iter().copied());
        let sink = derived.clone();

        let mut guard = self.state.lock();
        match &mut *guard {
            State::Pending(continuations) => {
                continuations.push(Box::new(move |value| {
                    if sink.resolve(f(value)).is_err() {
                        debug!("mapped output was already resolved, dropping value");
                    }
                }));
            }
            State::Resolved(value) => {
                let value = value.clone();
                drop(guard);
                if sink.resolve(f(&value)).is_err() {
                    debug!("mapped output was already resolved, dropping value");
                }
            }
        }

        derived
    }
}

impl<T: fmt::Debug> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.state.lock() {
            State::Resolved(value) => f
                .debug_struct("Output")
                .field("label", &self.label)
                .field("value", value)
                .finish(),
            State::Pending(continuations) => f
                .debug_struct("Output")
                .field("label", &self.label)
                .field("pending_continuations", &continuations.len())
                .finish(),
        }
    }
}

/// Resolved outputs serialize as their value; pending outputs serialize as
/// their reference token, so plan documents stay renderable before apply.
impl<T: Serialize> Serialize for Output<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &*self.state.lock() {
            State::Resolved(value) => value.serialize(serializer),
            State::Pending(_) => serializer.serialize_str(&self.reference_token()),
        }
    }
}
