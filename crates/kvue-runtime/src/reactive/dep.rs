#![forbid(unsafe_code)]

//! Per-field subscriber registry.
//!
//! # Invariants
//!
//! 1. `add_subscriber` always appends; the same subscriber may appear many
//!    times and is then recomputed once per registration.
//! 2. `notify` visits subscribers in registration order, over a snapshot
//!    taken when the notification starts. Subscribers registered while a
//!    notification is running are first visited by the next one.
//! 3. Notification is synchronous and re-entrant: a callback that writes
//!    another field runs that field's notification to completion first.
//!
//! # Failure Modes
//!
//! | Policy | On a failing recompute |
//! |--------|------------------------|
//! | [`NotifyPolicy::FailFast`] | Later subscribers are skipped; the error is returned. |
//! | [`NotifyPolicy::Isolate`] | Failure is logged and collected; every subscriber runs; a `Cascade` error is returned. |

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use smallvec::SmallVec;

use super::subscriber::Subscriber;
use crate::config::NotifyPolicy;
use crate::error::{ReactiveError, Result};

static NEXT_DEP_ID: AtomicU64 = AtomicU64::new(1);

type SubscriberList = SmallVec<[Subscriber; 4]>;

struct DepInner {
    id: u64,
    policy: NotifyPolicy,
    subscribers: RefCell<SubscriberList>,
}

/// Handle to a dependency. Clones share the subscriber list.
#[derive(Clone)]
pub struct Dependency {
    inner: Rc<DepInner>,
}

impl Dependency {
    #[must_use]
    pub fn new(policy: NotifyPolicy) -> Self {
        Self {
            inner: Rc::new(DepInner {
                id: NEXT_DEP_ID.fetch_add(1, Ordering::Relaxed),
                policy,
                subscribers: RefCell::new(SmallVec::new()),
            }),
        }
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    #[must_use]
    pub fn policy(&self) -> NotifyPolicy {
        self.inner.policy
    }

    /// Append `subscriber` unconditionally.
    pub fn add_subscriber(&self, subscriber: Subscriber) {
        tracing::trace!(
            message = "reactive.subscribe",
            dep = self.inner.id,
            subscriber = subscriber.id(),
            key = subscriber.key()
        );
        self.inner.subscribers.borrow_mut().push(subscriber);
    }

    /// Number of registrations (duplicates included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.subscribers.borrow().is_empty()
    }

    /// Snapshot of the registrations, in order.
    #[must_use]
    pub fn subscribers(&self) -> Vec<Subscriber> {
        self.inner.subscribers.borrow().iter().cloned().collect()
    }

    /// Recompute every registered subscriber.
    pub fn notify(&self) -> Result<()> {
        let snapshot: SubscriberList = self.inner.subscribers.borrow().clone();
        tracing::trace!(
            message = "reactive.notify",
            dep = self.inner.id,
            subscribers = snapshot.len()
        );
        match self.inner.policy {
            NotifyPolicy::FailFast => {
                for subscriber in &snapshot {
                    subscriber.recompute()?;
                }
                Ok(())
            }
            NotifyPolicy::Isolate => {
                let mut failures = Vec::new();
                for subscriber in &snapshot {
                    if let Err(err) = subscriber.recompute() {
                        tracing::warn!(
                            message = "reactive.notify.failed",
                            dep = self.inner.id,
                            subscriber = subscriber.id(),
                            key = subscriber.key(),
                            error = %err
                        );
                        failures.push(err);
                    }
                }
                if failures.is_empty() {
                    Ok(())
                } else {
                    Err(ReactiveError::Cascade { failures })
                }
            }
        }
    }
}

impl fmt::Debug for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dependency")
            .field("id", &self.inner.id)
            .field("policy", &self.inner.policy)
            .field("subscribers", &self.len())
            .finish()
    }
}
