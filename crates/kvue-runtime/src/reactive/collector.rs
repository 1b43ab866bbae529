#![forbid(unsafe_code)]

//! The active-subscriber slot.
//!
//! Dependency collection is implicit: while a [`Subscriber`] is being
//! constructed it sits in a thread-local slot, and every tracked field read
//! registers whatever is in that slot. The slot is only ever written through
//! [`CollectGuard`], which puts the previous occupant back on drop, so an
//! early return or a panic during the initial read cannot leave a stale
//! subscriber behind.
//!
//! At most one subscriber is collecting at a time on a thread. Reactive
//! handles are `!Send`, so other threads never observe this slot.

use std::cell::RefCell;

use super::dep::Dependency;
use super::subscriber::Subscriber;

thread_local! {
    static ACTIVE: RefCell<Option<Subscriber>> = const { RefCell::new(None) };
}

/// RAII guard restoring the previous slot content on drop.
#[must_use = "dropping the guard ends dependency collection"]
pub(crate) struct CollectGuard {
    previous: Option<Subscriber>,
}

impl Drop for CollectGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        // The slot may already be gone during thread teardown.
        let _ = ACTIVE.try_with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Make `subscriber` the collector until the guard drops.
pub(crate) fn collect_for(subscriber: &Subscriber) -> CollectGuard {
    let previous = ACTIVE.with(|slot| slot.replace(Some(subscriber.clone())));
    if let Some(previous) = &previous {
        tracing::warn!(
            message = "reactive.collector.nested",
            outer = previous.id(),
            inner = subscriber.id()
        );
    }
    CollectGuard { previous }
}

/// Register the active subscriber, if any, with `dep`.
pub(crate) fn track(dep: &Dependency) {
    let active = ACTIVE.with(|slot| slot.borrow().clone());
    if let Some(subscriber) = active {
        dep.add_subscriber(subscriber);
    }
}

/// The subscriber currently collecting dependencies on this thread.
#[must_use]
pub fn active_subscriber() -> Option<Subscriber> {
    ACTIVE.with(|slot| slot.borrow().clone())
}

/// Run `f` with collection suspended: reads inside `f` register nothing.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    let _guard = CollectGuard {
        previous: ACTIVE.with(|slot| slot.replace(None)),
    };
    f()
}
