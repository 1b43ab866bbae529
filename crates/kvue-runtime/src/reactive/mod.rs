#![forbid(unsafe_code)]

//! Dependency-tracking reactivity for KVue.
//!
//! This module turns plain JSON data into an observable graph:
//!
//! - [`ReactiveObject`]: observed object, an ordered table of fields.
//! - [`ReactiveField`]: one intercepted property with its value and
//!   [`Dependency`].
//! - [`Dependency`]: per-field list of subscribers to recompute on write.
//! - [`Subscriber`]: a callback bound to one `(source, key)` pair.
//! - [`collector`]: the thread-local "currently constructing" subscriber slot
//!   through which reads register dependencies.
//!
//! # Architecture
//!
//! Everything is `Rc<..>`-shared and single-threaded. Registration is
//! implicit: [`Subscriber::new`] occupies the collector slot while it reads
//! its key once, and [`ReactiveField::get`] appends whatever occupies the
//! slot to its dependency. Writes go through [`ReactiveField::set`], which
//! always calls [`Dependency::notify`]; notification recomputes each
//! subscriber synchronously before the write returns.
//!
//! # Invariants
//!
//! 1. Reads outside subscriber construction never register anything.
//! 2. Every construction registers once per tracked read, without dedup;
//!    a field notifies once per registration.
//! 3. A write notifies even when the value is unchanged.
//! 4. Arrays are plain values: element mutation is invisible.
//! 5. Subscribers are notified in registration order.
//!
//! # Failure Modes
//!
//! - Unknown key: [`ReactiveError::UnknownProperty`](crate::ReactiveError).
//! - Failing callback: handled by the dependency's
//!   [`NotifyPolicy`](crate::NotifyPolicy).
//! - Write cycles (a callback writing a field that re-triggers it) recurse
//!   without bound.

pub mod collector;
pub mod dep;
pub mod field;
pub mod object;
pub mod subscriber;
pub mod value;

pub use collector::{active_subscriber, untracked};
pub use dep::Dependency;
pub use field::ReactiveField;
pub use object::{ReactiveObject, observe};
pub use subscriber::{PropertySource, Subscriber};
pub use value::Value;
