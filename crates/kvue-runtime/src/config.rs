#![forbid(unsafe_code)]

//! Engine configuration.
//!
//! A [`ReactiveConfig`] is consulted when an object graph is observed: every
//! [`Dependency`](crate::reactive::Dependency) created for that graph records
//! the notify policy in force at that moment.

use crate::reactive::Value;

/// What a dependency does when one of its subscribers fails to recompute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NotifyPolicy {
    /// Stop at the first failure and hand it to the writer. Remaining
    /// subscribers are not recomputed.
    #[default]
    FailFast,
    /// Recompute every subscriber, then report all failures together as
    /// [`ReactiveError::Cascade`](crate::ReactiveError::Cascade).
    Isolate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ReactiveConfig {
    pub notify_policy: NotifyPolicy,
}

impl ReactiveConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_notify_policy(mut self, policy: NotifyPolicy) -> Self {
        self.notify_policy = policy;
        self
    }

    /// Make `json` reactive under this configuration.
    ///
    /// Objects become [`ReactiveObject`](crate::reactive::ReactiveObject)s,
    /// recursively; arrays and scalars are returned as plain values.
    #[must_use]
    pub fn observe(&self, json: serde_json::Value) -> Value {
        crate::reactive::object::observe_with(json, self)
    }
}
