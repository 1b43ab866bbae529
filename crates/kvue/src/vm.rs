#![forbid(unsafe_code)]

//! The `KVue` instance.
//!
//! Construction runs three steps in order:
//!
//! 1. observe `options.data` into a [`ReactiveObject`] graph;
//! 2. record every top-level key in the forwarding table, which only reports
//!    what was forwarded: `get`/`set` reach `data` for any key;
//! 3. resolve `options.el` in the document and compile that subtree against
//!    the instance.
//!
//! A missing `el`, or a selector that matches nothing, skips step 3 without
//! error. An invalid selector is an error.
//!
//! # Lifetime
//!
//! Bindings keep the instance alive through their subscribers and the
//! instance keeps the bindings alive through its fields. There is no teardown:
//! both live as long as any handle to either does.

use std::rc::Rc;

use indexmap::IndexSet;
use kvue_compiler::{CompileReport, Compiler};
use kvue_dom::{Document, Node};
use kvue_runtime::{PropertySource, ReactiveObject, Subscriber, Value};

use crate::error::{KVueError, Result, json_kind};
use crate::options::Options;

/// Receiver seen by compiled bindings: forwards every property access to
/// `data`.
struct ViewModel {
    data: ReactiveObject,
    /// Top-level keys present at construction. Reporting only: it backs
    /// `proxied_keys` and the mount event, and access to a key outside it
    /// still reaches `data` after a `kvue.forward.miss` trace.
    forwarded: IndexSet<String>,
}

impl PropertySource for ViewModel {
    fn read(&self, key: &str) -> kvue_runtime::Result<Value> {
        if !self.forwarded.contains(key) {
            tracing::trace!(message = "kvue.forward.miss", key);
        }
        self.data.get(key)
    }

    fn write(&self, key: &str, value: Value) -> kvue_runtime::Result<()> {
        if !self.forwarded.contains(key) {
            tracing::trace!(message = "kvue.forward.miss", key);
        }
        self.data.set(key, value)
    }
}

pub struct KVue {
    vm: Rc<ViewModel>,
    options: Options,
    el: Option<Node>,
    report: CompileReport,
}

impl KVue {
    /// Observe the data and compile the `el` subtree of `document`.
    pub fn new(options: Options, document: &Document) -> Result<Self> {
        Self::with_compiler(options, document, |_| {})
    }

    /// Like [`KVue::new`], letting `configure` register extra directives or
    /// updaters before compilation.
    pub fn with_compiler(
        options: Options,
        document: &Document,
        configure: impl FnOnce(&mut Compiler),
    ) -> Result<Self> {
        if !options.data.is_object() {
            return Err(KVueError::DataNotObject {
                kind: json_kind(&options.data),
            });
        }
        let observed = options.reactive_config().observe(options.data.clone());
        let data = observed
            .as_object()
            .cloned()
            .ok_or(KVueError::DataNotObject {
                kind: observed.kind(),
            })?;
        let forwarded: IndexSet<String> = data.keys().into_iter().collect();
        let vm = Rc::new(ViewModel { data, forwarded });

        let el = match options.el.as_deref() {
            Some(selector) => document.query_selector(selector)?,
            None => None,
        };

        let report = match &el {
            Some(root) => {
                let source: Rc<dyn PropertySource> = vm.clone();
                let mut compiler = Compiler::new(source).with_prefix(options.directive_prefix.as_str());
                configure(&mut compiler);
                compiler.compile(root)?
            }
            None => {
                tracing::debug!(
                    message = "kvue.mount.skipped",
                    el = options.el.as_deref().unwrap_or_default()
                );
                CompileReport::default()
            }
        };
        tracing::info!(
            message = "kvue.mounted",
            keys = vm.forwarded.len(),
            bindings = report.len()
        );

        Ok(Self {
            vm,
            options,
            el,
            report,
        })
    }

    /// Tracked read of a data property.
    pub fn get(&self, key: &str) -> Result<Value> {
        Ok(self.vm.read(key)?)
    }

    /// Write a data property and run its subscribers.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        Ok(self.vm.write(key, value.into())?)
    }

    /// Subscribe `callback` to `key`, with this instance as receiver.
    pub fn watch(
        &self,
        key: impl Into<String>,
        callback: impl Fn(&dyn PropertySource, &Value) -> kvue_runtime::Result<()> + 'static,
    ) -> Result<Subscriber> {
        let source: Rc<dyn PropertySource> = self.vm.clone();
        Ok(Subscriber::new(source, key, callback)?)
    }

    #[must_use]
    pub fn data(&self) -> &ReactiveObject {
        &self.vm.data
    }

    /// Keys forwarded at construction, in data order.
    pub fn proxied_keys(&self) -> impl Iterator<Item = &str> {
        self.vm.forwarded.iter().map(String::as_str)
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Root of the compiled subtree, if `el` matched.
    #[must_use]
    pub fn el(&self) -> Option<&Node> {
        self.el.as_ref()
    }

    /// Bindings created while compiling `el`.
    #[must_use]
    pub fn bindings(&self) -> &CompileReport {
        &self.report
    }

    /// Untracked snapshot of the data.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        self.vm.data.to_json()
    }
}

impl PropertySource for KVue {
    fn read(&self, key: &str) -> kvue_runtime::Result<Value> {
        self.vm.read(key)
    }

    fn write(&self, key: &str, value: Value) -> kvue_runtime::Result<()> {
        self.vm.write(key, value)
    }
}

impl std::fmt::Debug for KVue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KVue")
            .field("el", &self.options.el)
            .field("data", &self.vm.data)
            .field("bindings", &self.report.len())
            .finish_non_exhaustive()
    }
}
