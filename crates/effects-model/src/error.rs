//! Error types for the effects data model.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A selection key that is not of the form `<id>__S<star>`.
    #[error("invalid group key '{0}' (expected <id>__S<star>)")]
    InvalidGroupKey(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
