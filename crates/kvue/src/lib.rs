#![forbid(unsafe_code)]

//! KVue: minimal reactive data binding.
//!
//! A [`KVue`] instance observes a JSON data object and compiles a subtree of
//! a [`Document`](kvue_dom::Document): `{{ name }}` interpolations and the
//! `v-text`/`v-html` directives are painted once and repainted on every
//! write to the property they name.
//!
//! | Crate | Role |
//! |-------|------|
//! | [`kvue_dom`] | in-memory node tree and selectors |
//! | [`kvue_runtime`] | observed data, dependencies, subscribers |
//! | [`kvue_compiler`] | tree walk, directives, updaters |
//!
//! # Example
//!
//! ```
//! use kvue::prelude::*;
//! use serde_json::json;
//!
//! let doc = Document::with_root(
//!     Node::element("div")
//!         .with_attr("id", "app")
//!         .with_child(Node::element("p").with_text("Hello {{name}}"))
//!         .with_child(Node::element("div").with_attr("v-html", "bio")),
//! );
//!
//! let options = Options::new(json!({"name": "Kai", "bio": "<b>hi</b>"})).with_el("#app");
//! let vm = KVue::new(options, &doc).unwrap();
//! assert_eq!(doc.to_html(), r#"<div id="app"><p>Hello Kai</p><div v-html="bio"><b>hi</b></div></div>"#);
//!
//! vm.set("name", "Mo").unwrap();
//! assert!(doc.to_html().contains("<p>Hello Mo</p>"));
//! ```

pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod options;
pub mod prelude;
pub mod vm;

pub use error::{KVueError, Result};
pub use options::Options;
pub use vm::KVue;

pub use kvue_compiler;
pub use kvue_dom;
pub use kvue_runtime;
