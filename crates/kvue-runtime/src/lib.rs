#![forbid(unsafe_code)]

//! Reactivity engine for KVue.
//!
//! See [`reactive`] for the data model. The crate root re-exports the types
//! most callers need.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kvue_runtime::reactive::observe;
//! use serde_json::json;
//!
//! let data = observe(json!({"name": "Kai"}));
//! let data = data.as_object().unwrap();
//!
//! let seen = Rc::new(RefCell::new(String::new()));
//! let sink = Rc::clone(&seen);
//! let _sub = data
//!     .watch("name", move |_, value| {
//!         *sink.borrow_mut() = value.to_string();
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! data.set("name", "Mo").unwrap();
//! assert_eq!(*seen.borrow(), "Mo");
//! ```

pub mod config;
pub mod error;
pub mod reactive;

pub use config::{NotifyPolicy, ReactiveConfig};
pub use error::{ReactiveError, Result};
pub use reactive::{
    Dependency, PropertySource, ReactiveField, ReactiveObject, Subscriber, Value, observe,
    untracked,
};
