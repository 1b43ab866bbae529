#![forbid(unsafe_code)]

//! Template compiler for KVue.
//!
//! Walks a [`kvue_dom::Node`] tree, finds `{{ name }}` interpolations in text
//! nodes and `v-` directives on elements, and binds each to a property of a
//! [`PropertySource`](kvue_runtime::PropertySource) so the tree follows the
//! data.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use kvue_compiler::Compiler;
//! use kvue_dom::Node;
//! use kvue_runtime::{PropertySource, observe};
//! use serde_json::json;
//!
//! let data = observe(json!({"name": "Kai"})).as_object().cloned().unwrap();
//! let root = Node::element("div").with_child(Node::element("p").with_text("Hello {{name}}"));
//!
//! let source: Rc<dyn PropertySource> = Rc::new(data.clone());
//! Compiler::new(source).compile(&root).unwrap();
//! assert_eq!(root.text_content(), "Hello Kai");
//!
//! data.set("name", "Mo").unwrap();
//! assert_eq!(root.text_content(), "Hello Mo");
//! ```

pub mod compiler;
pub mod error;
pub mod interpolation;
pub mod registry;

pub use compiler::{Binding, CompileReport, Compiler, DEFAULT_PREFIX};
pub use error::{CompileError, Result};
pub use interpolation::Interpolation;
pub use registry::{Directive, DirectiveRegistry, Updater, UpdaterRegistry};
