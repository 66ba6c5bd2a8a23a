//! Crate error types with exit codes

use thiserror::Error;

/// Main error type for errtype operations
///
/// These are failures of the factory and its tooling, not the error values
/// the factory produces (see [`crate::factory::ErrorInstance`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrtypeError {
    /// Configuration Error - missing or invalid catalog
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Definition Error - an error type definition is malformed
    #[error("Definition error: {message}")]
    Definition { message: String },

    /// Reserved Key Error - metadata tried to shadow a fixed instance field
    #[error("Metadata key '{key}' is reserved")]
    ReservedKey { key: String },

    /// Metadata Error - metadata could not be parsed or is not a scalar
    #[error("Metadata error: {message}")]
    Metadata { message: String },

    /// Unknown Code Error - no error type is defined for the requested key
    #[error("Unknown error code: {code}")]
    UnknownCode { code: String },
}

impl ErrtypeError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Definition { .. } => 2,
            Self::ReservedKey { .. } | Self::Metadata { .. } => 3,
            Self::UnknownCode { .. } => 4,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a definition error
    #[inline]
    pub fn definition<S: Into<String>>(message: S) -> Self {
        Self::Definition {
            message: message.into(),
        }
    }

    /// Create a reserved key error
    #[inline]
    pub fn reserved_key<S: Into<String>>(key: S) -> Self {
        Self::ReservedKey { key: key.into() }
    }

    /// Create a metadata error
    #[inline]
    pub fn metadata<S: Into<String>>(message: S) -> Self {
        Self::Metadata {
            message: message.into(),
        }
    }

    /// Create an unknown code error
    #[inline]
    pub fn unknown_code<S: Into<String>>(code: S) -> Self {
        Self::UnknownCode { code: code.into() }
    }
}
