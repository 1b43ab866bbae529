#![forbid(unsafe_code)]

//! Directive and updater tables.
//!
//! Both registries are closed maps from a name to a handler. The compiler
//! looks names up here instead of resolving them dynamically, so the set of
//! supported directives and modes is exactly what has been registered.
//!
//! | Directive | Binds with mode | Updater effect |
//! |-----------|-----------------|----------------|
//! | `text`    | `text`          | [`Node::set_text_content`] |
//! | `html`    | `html`          | [`Node::set_inner_html`] (not sanitized) |

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use kvue_dom::Node;
use kvue_runtime::Value;

use crate::compiler::{Binding, Compiler};
use crate::error::Result;

/// Pushes a value into a node.
pub type Updater = dyn Fn(&Node, &Value);

/// Handles one directive attribute: `(compiler, node, expression)`.
///
/// Returns the binding it created, if any.
pub type Directive = dyn Fn(&Compiler, &Node, &str) -> Result<Option<Binding>>;

pub const TEXT: &str = "text";
pub const HTML: &str = "html";

#[derive(Clone, Default)]
pub struct UpdaterRegistry {
    updaters: IndexMap<String, Rc<Updater>>,
}

impl UpdaterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the `text` and `html` updaters.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TEXT, |node, value| node.set_text_content(value.to_string()));
        registry.register(HTML, |node, value| node.set_inner_html(value.to_string()));
        registry
    }

    /// Register `updater` for `mode`, replacing any previous one.
    pub fn register(&mut self, mode: impl Into<String>, updater: impl Fn(&Node, &Value) + 'static) {
        self.updaters.insert(mode.into(), Rc::new(updater));
    }

    #[must_use]
    pub fn get(&self, mode: &str) -> Option<Rc<Updater>> {
        self.updaters.get(mode).cloned()
    }

    #[must_use]
    pub fn contains(&self, mode: &str) -> bool {
        self.updaters.contains_key(mode)
    }

    /// Registered modes, in registration order.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.updaters.keys().map(String::as_str)
    }
}

impl fmt::Debug for UpdaterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.modes()).finish()
    }
}

#[derive(Clone, Default)]
pub struct DirectiveRegistry {
    directives: IndexMap<String, Rc<Directive>>,
}

impl DirectiveRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding `text` and `html`, each binding with the mode of
    /// the same name.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(TEXT, |compiler, node, expr| {
            compiler.bind(node, expr, TEXT).map(Some)
        });
        registry.register(HTML, |compiler, node, expr| {
            compiler.bind(node, expr, HTML).map(Some)
        });
        registry
    }

    /// Register `directive` under `name` (without the prefix), replacing any
    /// previous one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        directive: impl Fn(&Compiler, &Node, &str) -> Result<Option<Binding>> + 'static,
    ) {
        self.directives.insert(name.into(), Rc::new(directive));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Rc<Directive>> {
        self.directives.get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(String::as_str)
    }
}

impl fmt::Debug for DirectiveRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
