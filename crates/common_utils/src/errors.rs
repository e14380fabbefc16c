//! Error contexts shared by the workspace crates

/// `Result` whose error side is an [`error_stack::Report`] over the context `E`
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Raised when bytes or strings cannot be turned into a typed value
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    /// Deserializing a struct from JSON failed
    #[error("Failed to parse struct: {0}")]
    StructParseFailure(&'static str),
    /// The string names no variant of the enum
    #[error("Failed to parse enum: {0}")]
    EnumParseFailure(&'static str),
}

/// Configuration values rejected after loading
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A value is present but unusable
    #[error("{message}")]
    InvalidValue {
        /// Operator facing explanation
        message: String,
    },
}

/// HMAC key handling failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// An HMAC keyed with no bytes authenticates nothing
    #[error("Signing key is empty")]
    EmptyKey,
}
