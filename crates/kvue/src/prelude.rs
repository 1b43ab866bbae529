#![forbid(unsafe_code)]

//! Common imports.
//!
//! ```
//! use kvue::prelude::*;
//! ```

pub use crate::{KVue, KVueError, Options};
pub use kvue_compiler::{Binding, CompileReport, Compiler};
pub use kvue_dom::{Document, Node, NodeType};
pub use kvue_runtime::{NotifyPolicy, PropertySource, ReactiveError, ReactiveObject, Value};
