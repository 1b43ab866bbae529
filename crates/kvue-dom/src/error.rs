#![forbid(unsafe_code)]

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector {
        selector: String,
        reason: &'static str,
    },
}

impl DomError {
    #[must_use]
    pub fn invalid_selector(selector: &str, reason: &'static str) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason,
        }
    }
}
