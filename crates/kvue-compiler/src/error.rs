#![forbid(unsafe_code)]

use kvue_runtime::ReactiveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// Initial paint or subscriber construction failed for a binding.
    #[error("cannot bind `{expression}` with mode `{mode}`: {source}")]
    Bind {
        expression: String,
        mode: String,
        #[source]
        source: ReactiveError,
    },
}

impl CompileError {
    pub(crate) fn bind(expression: &str, mode: &str, source: ReactiveError) -> Self {
        Self::Bind {
            expression: expression.to_string(),
            mode: mode.to_string(),
            source,
        }
    }

    /// The reactive error underneath, if any.
    #[must_use]
    pub fn reactive(&self) -> &ReactiveError {
        match self {
            Self::Bind { source, .. } => source,
        }
    }
}
