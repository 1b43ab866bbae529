#![forbid(unsafe_code)]

//! Reactive object graphs.
//!
//! [`ReactiveObject`] is the observed form of a plain JSON object: an ordered
//! table from key to [`ReactiveField`]. Nested objects are observed bottom-up
//! before the field holding them is defined, so every key at every depth has
//! its own field and dependency.
//!
//! # Invariants
//!
//! 1. Exactly one field exists per key; redefining a key replaces the field
//!    (and its dependency) in place, keeping the key's position.
//! 2. Arrays are stored as plain values and never intercepted.
//! 3. No `RefCell` borrow of the field table is held while a field is read
//!    or written, so subscriber callbacks may freely touch the same object.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::dep::Dependency;
use super::field::ReactiveField;
use super::subscriber::{PropertySource, Subscriber};
use super::value::Value;
use crate::config::ReactiveConfig;
use crate::error::{ReactiveError, Result};

struct ObjectInner {
    fields: RefCell<IndexMap<String, ReactiveField>>,
    config: ReactiveConfig,
}

/// Handle to an observed object. Clones share the same fields.
#[derive(Clone)]
pub struct ReactiveObject {
    inner: Rc<ObjectInner>,
}

impl Default for ReactiveObject {
    fn default() -> Self {
        Self::new()
    }
}

impl ReactiveObject {
    /// An empty object using the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReactiveConfig::default())
    }

    #[must_use]
    pub fn with_config(config: ReactiveConfig) -> Self {
        Self {
            inner: Rc::new(ObjectInner {
                fields: RefCell::new(IndexMap::new()),
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ReactiveConfig {
        &self.inner.config
    }

    /// Install a reactive field for `key` holding `initial`, with a fresh
    /// dependency. An existing field for `key` is replaced.
    pub fn define_reactive(
        &self,
        key: impl Into<String>,
        initial: impl Into<Value>,
    ) -> ReactiveField {
        let key = key.into();
        let dep = Dependency::new(self.inner.config.notify_policy);
        let field = ReactiveField::new(key.clone(), initial.into(), dep);
        tracing::trace!(message = "reactive.define", key = key.as_str());
        self.inner.fields.borrow_mut().insert(key, field.clone());
        field
    }

    /// The field installed for `key`, if any.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<ReactiveField> {
        self.inner.fields.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.fields.borrow().contains_key(key)
    }

    /// Keys in definition order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.inner.fields.borrow().keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.fields.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.fields.borrow().is_empty()
    }

    /// Tracked read of `key`.
    pub fn get(&self, key: &str) -> Result<Value> {
        self.field(key)
            .map(|field| field.get())
            .ok_or_else(|| ReactiveError::unknown(key))
    }

    /// Write `key`, notifying its subscribers.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        let field = self.field(key).ok_or_else(|| ReactiveError::unknown(key))?;
        field.set(value)
    }

    /// Construct a [`Subscriber`] on `key` of this object.
    pub fn watch(
        &self,
        key: impl Into<String>,
        callback: impl Fn(&dyn PropertySource, &Value) -> Result<()> + 'static,
    ) -> Result<Subscriber> {
        Subscriber::new(Rc::new(self.clone()), key, callback)
    }

    /// Untracked JSON snapshot of the whole graph.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let fields: Vec<ReactiveField> = self.inner.fields.borrow().values().cloned().collect();
        let map = fields
            .iter()
            .map(|field| (field.key().to_string(), field.peek().to_json()))
            .collect();
        serde_json::Value::Object(map)
    }

    /// Whether two handles refer to the same object.
    #[must_use]
    pub fn ptr_eq(&self, other: &ReactiveObject) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PropertySource for ReactiveObject {
    fn read(&self, key: &str) -> Result<Value> {
        self.get(key)
    }

    fn write(&self, key: &str, value: Value) -> Result<()> {
        self.set(key, value)
    }
}

impl fmt::Debug for ReactiveObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<ReactiveField> = self.inner.fields.borrow().values().cloned().collect();
        let mut map = f.debug_map();
        for field in &fields {
            map.entry(&field.key(), &field.peek());
        }
        map.finish()
    }
}

/// Observe `json` with the default configuration.
#[must_use]
pub fn observe(json: serde_json::Value) -> Value {
    observe_with(json, &ReactiveConfig::default())
}

pub(crate) fn observe_with(json: serde_json::Value, config: &ReactiveConfig) -> Value {
    use serde_json::Value as Json;
    match json {
        Json::Object(map) => {
            let object = ReactiveObject::with_config(config.clone());
            for (key, child) in map {
                let child = observe_with(child, config);
                object.define_reactive(key, child);
            }
            Value::Object(object)
        }
        Json::Array(items) => Value::from(items),
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => Value::Number(n),
        Json::String(s) => Value::String(s),
    }
}
