#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReactiveError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReactiveError {
    #[error("unknown reactive property: {key}")]
    UnknownProperty { key: String },

    #[error("subscriber callback failed: {message}")]
    Callback { message: String },

    #[error("{} subscriber(s) failed during notification", failures.len())]
    Cascade { failures: Vec<ReactiveError> },
}

impl ReactiveError {
    #[must_use]
    pub fn unknown(key: impl Into<String>) -> Self {
        Self::UnknownProperty { key: key.into() }
    }

    #[must_use]
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback {
            message: message.into(),
        }
    }
}
