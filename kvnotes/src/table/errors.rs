use std::error::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("conditional check failed")]
    ConditionalCheckFailed,

    #[error("malformed item: {reason}")]
    MalformedItem {
        reason: String,
    },

    #[error("table backend error: {0}")]
    Backend(#[source] Box<dyn Error + Send + Sync>),
}

#[derive(Debug, Error)]
pub enum TableSetupError {
    #[error("table backend \"{0}\" is not compiled in")]
    BackendNotCompiled(&'static str),
}
