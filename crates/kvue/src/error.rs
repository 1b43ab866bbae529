#![forbid(unsafe_code)]

use kvue_compiler::CompileError;
use kvue_dom::DomError;
use kvue_runtime::ReactiveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KVueError>;

#[derive(Debug, Error)]
pub enum KVueError {
    /// `Options::data` was not a JSON object.
    #[error("data must be an object, got {kind}")]
    DataNotObject { kind: &'static str },

    #[error(transparent)]
    Selector(#[from] DomError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Reactive(#[from] ReactiveError),

    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML options: {0}")]
    Toml(#[from] toml::de::Error),
}

impl KVueError {
    /// The reactive failure underneath, whether raised directly or while
    /// compiling a binding.
    #[must_use]
    pub fn reactive(&self) -> Option<&ReactiveError> {
        match self {
            Self::Reactive(err) => Some(err),
            Self::Compile(err) => Some(err.reactive()),
            _ => None,
        }
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
