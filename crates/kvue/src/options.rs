#![forbid(unsafe_code)]

//! Construction options.
//!
//! Options are plain data and can be built in code or loaded from JSON or
//! TOML. `data` is required; a source without it is rejected with a
//! missing-field error. The other fields take their defaults:
//!
//! | Field | Default |
//! |-------|---------|
//! | `el` | none (nothing is compiled) |
//! | `directive_prefix` | `"v-"` |
//! | `notify_policy` | `"fail-fast"` |
//!
//! ```toml
//! el = "#app"
//! notify_policy = "isolate"
//!
//! [data]
//! name = "Kai"
//! ```

use kvue_compiler::DEFAULT_PREFIX;
use kvue_runtime::{NotifyPolicy, ReactiveConfig};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Initial data. Must be an object.
    pub data: serde_json::Value,
    /// Selector of the subtree to compile.
    #[serde(default)]
    pub el: Option<String>,
    #[serde(default = "default_prefix")]
    pub directive_prefix: String,
    #[serde(default)]
    pub notify_policy: NotifyPolicy,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Options {
    #[must_use]
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            data,
            el: None,
            directive_prefix: default_prefix(),
            notify_policy: NotifyPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_el(mut self, selector: impl Into<String>) -> Self {
        self.el = Some(selector.into());
        self
    }

    #[must_use]
    pub fn with_directive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.directive_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_notify_policy(mut self, policy: NotifyPolicy) -> Self {
        self.notify_policy = policy;
        self
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reactive configuration derived from these options.
    #[must_use]
    pub fn reactive_config(&self) -> ReactiveConfig {
        ReactiveConfig::new().with_notify_policy(self.notify_policy)
    }
}
