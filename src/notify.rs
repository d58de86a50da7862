//! Property change notification
//!
//! Every successful property mutation is announced as a [`PropertiesChanged`]
//! event to the subscribers of a [`Signal`]. Delivery is synchronous, in the
//! call stack of the mutation, and carries only the field that changed.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A single property change announcement
#[derive(Debug, Clone, PartialEq)]
pub struct PropertiesChanged {
    /// Name of the object scope the properties belong to
    pub scope: String,
    /// Changed property names mapped to their new values
    pub changed: BTreeMap<String, Value>,
    /// Properties whose values must be re-read (always empty here)
    pub invalidated: Vec<String>,
}

impl PropertiesChanged {
    /// Build an event for exactly one changed property
    pub fn single(scope: &str, field: &str, value: Value) -> Self {
        let mut changed = BTreeMap::new();
        changed.insert(field.to_string(), value);
        Self {
            scope: scope.to_string(),
            changed,
            invalidated: Vec::new(),
        }
    }
}

type Subscriber = Box<dyn Fn(&PropertiesChanged) + Send + Sync>;

/// Typed callback list for [`PropertiesChanged`] events
#[derive(Default)]
pub struct Signal {
    subscribers: Vec<Subscriber>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; it is invoked for every later emission
    pub fn connect<F>(&mut self, callback: F)
    where
        F: Fn(&PropertiesChanged) + Send + Sync + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Deliver an event to every subscriber in registration order
    pub fn emit(&self, event: &PropertiesChanged) {
        tracing::trace!(scope = %event.scope, fields = ?event.changed.keys().collect::<Vec<_>>(), "properties changed");
        for subscriber in &self.subscribers {
            subscriber(event);
        }
    }

    /// Emit a single-field change
    pub fn emit_change(&self, scope: &str, field: &str, value: impl Into<Value>) {
        self.emit(&PropertiesChanged::single(scope, field, value.into()));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Collects emitted events, for tests and tooling that want to inspect them
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    events: std::sync::Arc<std::sync::Mutex<Vec<PropertiesChanged>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe this recorder to a signal
    pub fn attach(&self, signal: &mut Signal) {
        let events = self.events.clone();
        signal.connect(move |event| {
            if let Ok(mut guard) = events.lock() {
                guard.push(event.clone());
            }
        });
    }

    /// Snapshot of everything recorded so far
    pub fn events(&self) -> Vec<PropertiesChanged> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
