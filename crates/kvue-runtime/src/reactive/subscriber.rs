#![forbid(unsafe_code)]

//! Units of recomputation bound to one `(source, key)` pair.
//!
//! Constructing a [`Subscriber`] is what wires it into the graph: the
//! constructor makes itself the active collector, reads `source[key]` once,
//! and the read registers it with that field's dependency. There is no other
//! way to subscribe.
//!
//! # Invariants
//!
//! 1. Construction performs exactly one read of the target key.
//! 2. The collector slot is restored when construction ends, whether the
//!    read succeeded, failed, or panicked.
//! 3. `recompute` reads without collecting, so recomputation never adds
//!    registrations.
//!
//! The key is a single flat property name; dotted paths are not resolved.

use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::collector;
use super::value::Value;
use crate::error::Result;

static NEXT_SUBSCRIBER_ID: AtomicU64 = AtomicU64::new(1);

/// Something a subscriber can read its key from.
///
/// The source is also the receiver handed to the subscriber's callback.
pub trait PropertySource {
    /// Tracked read of `key`.
    fn read(&self, key: &str) -> Result<Value>;

    /// Write `key`, notifying its subscribers.
    fn write(&self, key: &str, value: Value) -> Result<()>;
}

type Callback = dyn Fn(&dyn PropertySource, &Value) -> Result<()>;

struct SubscriberInner {
    id: u64,
    source: Rc<dyn PropertySource>,
    key: String,
    callback: Box<Callback>,
}

/// Handle to a subscriber. Clones are the same subscriber.
#[derive(Clone)]
pub struct Subscriber {
    inner: Rc<SubscriberInner>,
}

impl Subscriber {
    /// Create a subscriber on `source[key]` and register it by reading the
    /// key once.
    ///
    /// Fails when the read fails (for example an unknown key); the
    /// subscriber is then not returned, although registrations made before
    /// the failure stay in place.
    pub fn new(
        source: Rc<dyn PropertySource>,
        key: impl Into<String>,
        callback: impl Fn(&dyn PropertySource, &Value) -> Result<()> + 'static,
    ) -> Result<Self> {
        let subscriber = Self {
            inner: Rc::new(SubscriberInner {
                id: NEXT_SUBSCRIBER_ID.fetch_add(1, Ordering::Relaxed),
                source,
                key: key.into(),
                callback: Box::new(callback),
            }),
        };
        {
            let _collecting = collector::collect_for(&subscriber);
            subscriber.inner.source.read(&subscriber.inner.key)?;
        }
        tracing::trace!(
            message = "reactive.subscriber.created",
            subscriber = subscriber.inner.id,
            key = subscriber.inner.key.as_str()
        );
        Ok(subscriber)
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The source this subscriber reads from.
    #[must_use]
    pub fn source(&self) -> &Rc<dyn PropertySource> {
        &self.inner.source
    }

    /// Re-read the key and hand the value to the callback, with the source
    /// as receiver.
    pub fn recompute(&self) -> Result<()> {
        let source = self.inner.source.as_ref();
        let value = source.read(&self.inner.key)?;
        (self.inner.callback)(source, &value)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Subscriber) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.inner.id)
            .field("key", &self.inner.key)
            .finish_non_exhaustive()
    }
}
