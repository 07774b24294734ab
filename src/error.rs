//! Error types for the Vantage management registry

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the Vantage management registry
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid argument (empty namespace, key, value, or a builder with no target)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Name already bound on the management server
    #[error("Name '{name}' is already bound")]
    DuplicateName { name: String },

    /// Name not bound on the management server
    #[error("Name '{name}' is not bound")]
    NotBound { name: String },

    /// The reserved 'type' property was set after being disabled
    #[error("The 'type' property can't be set once it has been disabled")]
    TypeDisabled,

    /// Attribute not exposed by the bound object
    #[error("Object '{name}' exposes no attribute '{attribute}'")]
    UnknownAttribute { name: String, attribute: String },
}

impl Error {
    /// Shorthand for an `InvalidArgument` error.
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}
