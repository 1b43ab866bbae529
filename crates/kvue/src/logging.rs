#![forbid(unsafe_code)]

//! Console logging for applications embedding KVue.
//!
//! The filter is read from `KVUE_LOG`, then `RUST_LOG`, using the usual
//! `EnvFilter` directive syntax (`kvue_runtime=debug,kvue_compiler=trace`).
//! Without either variable only warnings and errors are shown.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

pub const ENV_VAR: &str = "KVUE_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

fn filter() -> EnvFilter {
    [ENV_VAR, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn try_init() -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(true).compact())
        .with(filter())
        .try_init()
}

/// Install the global subscriber, keeping any that is already installed.
pub fn init() {
    let _ = try_init();
}
