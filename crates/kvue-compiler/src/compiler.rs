#![forbid(unsafe_code)]

//! Tree walk and binding.
//!
//! [`Compiler::compile`] visits the descendants of a root node in document
//! order. Each child is classified before its own children are visited:
//!
//! | Child | Action |
//! |-------|--------|
//! | Element | every `prefix`-named attribute is dispatched to the [`DirectiveRegistry`] |
//! | Text containing `{{ .. }}` | bound in `text` mode, rendering into the original text |
//! | Anything else | ignored |
//!
//! The child list of a node is re-read after the node itself is processed,
//! so content installed by a directive is what the walk descends into: the
//! elements and interpolations of `v-html` markup are bound like any other.
//! Markup installed by later writes is not compiled.
//!
//! # Binding
//!
//! [`Compiler::bind`] paints the node once with the current value, then
//! constructs a [`Subscriber`] whose callback repaints on every write. A mode
//! without an updater still subscribes, with a callback that does nothing.
//!
//! # Failure Modes
//!
//! - Unknown directive, mode without updater, non-matching text: skipped.
//! - Expression naming a missing property: [`CompileError::Bind`]; the walk
//!   stops and bindings made so far stay live.

use std::rc::Rc;

use kvue_dom::{Node, NodeType};
use kvue_runtime::{PropertySource, Subscriber, Value};

use crate::error::{CompileError, Result};
use crate::interpolation::Interpolation;
use crate::registry::{self, DirectiveRegistry, Updater, UpdaterRegistry};

pub const DEFAULT_PREFIX: &str = "v-";

/// One live node-to-property binding.
#[derive(Clone, Debug)]
pub struct Binding {
    node: Node,
    expression: String,
    mode: String,
    subscriber: Subscriber,
}

impl Binding {
    #[must_use]
    pub fn node(&self) -> &Node {
        &self.node
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    #[must_use]
    pub fn subscriber(&self) -> &Subscriber {
        &self.subscriber
    }
}

/// Bindings created by one [`Compiler::compile`] call, in document order.
#[derive(Clone, Debug, Default)]
pub struct CompileReport {
    bindings: Vec<Binding>,
}

impl CompileReport {
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.bindings.iter()
    }

    /// Bindings whose expression is `expression`.
    pub fn for_expression<'a>(&'a self, expression: &'a str) -> impl Iterator<Item = &'a Binding> {
        self.bindings
            .iter()
            .filter(move |binding| binding.expression == expression)
    }

    #[must_use]
    pub fn into_bindings(self) -> Vec<Binding> {
        self.bindings
    }
}

impl<'a> IntoIterator for &'a CompileReport {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

/// Walks a node tree and binds it to a view model.
pub struct Compiler {
    vm: Rc<dyn PropertySource>,
    prefix: String,
    directives: DirectiveRegistry,
    updaters: UpdaterRegistry,
}

impl Compiler {
    /// A compiler with the `v-` prefix and the built-in `text`/`html`
    /// directives and updaters.
    #[must_use]
    pub fn new(vm: Rc<dyn PropertySource>) -> Self {
        Self {
            vm,
            prefix: DEFAULT_PREFIX.to_string(),
            directives: DirectiveRegistry::with_defaults(),
            updaters: UpdaterRegistry::with_defaults(),
        }
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_directives(mut self, directives: DirectiveRegistry) -> Self {
        self.directives = directives;
        self
    }

    #[must_use]
    pub fn with_updaters(mut self, updaters: UpdaterRegistry) -> Self {
        self.updaters = updaters;
        self
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub fn vm(&self) -> &Rc<dyn PropertySource> {
        &self.vm
    }

    pub fn directives_mut(&mut self) -> &mut DirectiveRegistry {
        &mut self.directives
    }

    pub fn updaters_mut(&mut self) -> &mut UpdaterRegistry {
        &mut self.updaters
    }

    /// Bind every interpolation and directive below `root`.
    pub fn compile(&self, root: &Node) -> Result<CompileReport> {
        let mut report = CompileReport::default();
        self.compile_children(root, &mut report)?;
        tracing::debug!(message = "compile.done", bindings = report.len());
        Ok(report)
    }

    fn compile_children(&self, parent: &Node, report: &mut CompileReport) -> Result<()> {
        for child in parent.child_nodes() {
            match child.node_type() {
                NodeType::Element => self.compile_element(&child, report)?,
                NodeType::Text => {
                    let text = child.text_content();
                    if let Some(interpolation) = Interpolation::find(&text) {
                        self.compile_text(&child, interpolation, report)?;
                    }
                }
                NodeType::Comment | NodeType::Document => {}
            }
            self.compile_children(&child, report)?;
        }
        Ok(())
    }

    fn compile_element(&self, node: &Node, report: &mut CompileReport) -> Result<()> {
        tracing::debug!(message = "compile.element", tag = %node.node_name());
        for attr in node.attributes() {
            let Some(name) = attr.name.strip_prefix(self.prefix.as_str()) else {
                continue;
            };
            let Some(directive) = self.directives.get(name) else {
                tracing::trace!(message = "compile.directive.unknown", directive = name);
                continue;
            };
            if let Some(binding) = directive(self, node, &attr.value)? {
                report.bindings.push(binding);
            }
        }
        Ok(())
    }

    fn compile_text(
        &self,
        node: &Node,
        interpolation: Interpolation,
        report: &mut CompileReport,
    ) -> Result<()> {
        tracing::debug!(message = "compile.text", expression = interpolation.expression());
        let expression = interpolation.expression().to_string();
        let updater = self.updaters.get(registry::TEXT).map(|text| {
            Rc::new(move |node: &Node, value: &Value| {
                text(node, &Value::from(interpolation.render(&value.to_string())));
            }) as Rc<Updater>
        });
        let binding = self.bind_with(node, &expression, registry::TEXT, updater)?;
        report.bindings.push(binding);
        Ok(())
    }

    /// Paint `node` with `vm[expression]` through the `mode` updater and keep
    /// it painted on every write.
    pub fn bind(&self, node: &Node, expression: &str, mode: &str) -> Result<Binding> {
        self.bind_with(node, expression, mode, self.updaters.get(mode))
    }

    fn bind_with(
        &self,
        node: &Node,
        expression: &str,
        mode: &str,
        updater: Option<Rc<Updater>>,
    ) -> Result<Binding> {
        tracing::trace!(
            message = "compile.bind",
            expression,
            mode,
            updater = updater.is_some()
        );
        if let Some(update) = &updater {
            let value = self
                .vm
                .read(expression)
                .map_err(|err| CompileError::bind(expression, mode, err))?;
            update(node, &value);
        }

        let target = node.clone();
        let subscriber = Subscriber::new(Rc::clone(&self.vm), expression, move |_, value| {
            if let Some(update) = &updater {
                update(&target, value);
            }
            Ok(())
        })
        .map_err(|err| CompileError::bind(expression, mode, err))?;

        Ok(Binding {
            node: node.clone(),
            expression: expression.to_string(),
            mode: mode.to_string(),
            subscriber,
        })
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("prefix", &self.prefix)
            .field("directives", &self.directives)
            .field("updaters", &self.updaters)
            .finish_non_exhaustive()
    }
}
