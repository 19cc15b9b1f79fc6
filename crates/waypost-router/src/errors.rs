//! Router errors
//!
//! Guard construction failures pass through unchanged as
//! [`RouterError::Guard`]; the rest cover loading and validating route
//! configuration.

use serde::{Deserialize, Serialize};
use waypost_guards::GuardError;

/// Error type for route table and configuration operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum RouterError {
    /// A guard could not be built
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// Configuration is well-formed but semantically invalid
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the invalid configuration
        message: String,
    },

    /// Configuration file could not be read
    #[error("IO error: {message}")]
    Io {
        /// Error message describing the IO failure
        message: String,
    },

    /// Configuration file could not be parsed
    #[error("Parse error: {message}")]
    Parse {
        /// Error message describing the parse failure
        message: String,
    },
}

impl RouterError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }
}

impl From<toml::de::Error> for RouterError {
    fn from(err: toml::de::Error) -> Self {
        Self::parse(err.to_string())
    }
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string())
    }
}

/// Standard Result type for router operations
pub type Result<T> = std::result::Result<T, RouterError>;
