#![forbid(unsafe_code)]

//! A single intercepted property.
//!
//! # Invariants
//!
//! 1. A tracked read ([`ReactiveField::get`]) registers the active subscriber,
//!    if any, every time it runs. Registration is not deduplicated.
//! 2. A write stores the new value only when it differs
//!    ([`Value::same_value`]), but always notifies the dependency.
//! 3. The value cell is never borrowed across a notification, so callbacks
//!    can read the field they were triggered by.
//!
//! # Failure Modes
//!
//! - Subscriber failure during notification: the stored value is already
//!   updated; the error is returned to the writer.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::collector;
use super::dep::Dependency;
use super::value::Value;
use crate::error::Result;

struct FieldInner {
    key: String,
    value: RefCell<Value>,
    dep: Dependency,
}

/// Handle to one reactive property. Clones share the value and dependency.
#[derive(Clone)]
pub struct ReactiveField {
    inner: Rc<FieldInner>,
}

impl ReactiveField {
    pub(crate) fn new(key: String, value: Value, dep: Dependency) -> Self {
        Self {
            inner: Rc::new(FieldInner {
                key,
                value: RefCell::new(value),
                dep,
            }),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Tracked read.
    #[must_use]
    pub fn get(&self) -> Value {
        tracing::trace!(message = "reactive.get", key = self.key());
        collector::track(&self.inner.dep);
        self.inner.value.borrow().clone()
    }

    /// Untracked read.
    #[must_use]
    pub fn peek(&self) -> Value {
        self.inner.value.borrow().clone()
    }

    /// Write and notify.
    pub fn set(&self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        {
            let mut slot = self.inner.value.borrow_mut();
            if !slot.same_value(&value) {
                tracing::debug!(message = "reactive.set", key = self.key(), value = %value);
                *slot = value;
            }
        }
        self.inner.dep.notify()
    }

    #[must_use]
    pub fn dependency(&self) -> &Dependency {
        &self.inner.dep
    }
}

impl fmt::Debug for ReactiveField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveField")
            .field("key", &self.inner.key)
            .field("value", &self.peek())
            .field("dep", &self.inner.dep)
            .finish()
    }
}
