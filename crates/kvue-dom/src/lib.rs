#![forbid(unsafe_code)]

//! In-memory host node tree for KVue.
//!
//! The template compiler never owns nodes: it walks a [`Document`] supplied
//! by the caller, holds [`Node`] handles for every binding it creates, and
//! pushes values into them through [`Node::set_text_content`] and
//! [`Node::set_inner_html`].
//!
//! # Example
//!
//! ```
//! use kvue_dom::{Document, Node, NodeType};
//!
//! let doc = Document::with_root(
//!     Node::element("div")
//!         .with_attr("id", "app")
//!         .with_child(Node::element("p").with_text("Hello {{name}}")),
//! );
//!
//! let app = doc.query_selector("#app").unwrap().unwrap();
//! assert_eq!(app.node_type(), NodeType::Element);
//! assert_eq!(app.text_content(), "Hello {{name}}");
//! ```

pub mod document;
pub mod error;
pub mod node;
pub mod selector;

pub use document::Document;
pub use error::{DomError, Result};
pub use node::{Attribute, Node, NodeType};
pub use selector::Selector;
