//! Guard construction errors
//!
//! Evaluating a guard is infallible; building one from its descriptor is not.
//! Every failure the factory can report lives here so callers of the
//! redirect resolver see a single error type.

use serde::{Deserialize, Serialize};

/// Errors raised while turning a [`GuardCondition`](crate::GuardCondition) into a guard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum GuardError {
    /// Descriptor is structurally present but unusable (e.g. empty target)
    #[error("Malformed {kind} condition: {reason}")]
    MalformedCondition {
        /// Condition kind as it appears in configuration
        kind: String,
        /// What is wrong with it
        reason: String,
    },

    /// A `custom` condition names a guard nobody registered
    #[error("Unknown guard: {name}")]
    UnknownGuard {
        /// Registered name that was looked up
        name: String,
    },

    /// A registered custom guard rejected its parameters
    #[error("Invalid parameters for guard {name}: {reason}")]
    InvalidParams {
        /// Registered name of the custom guard
        name: String,
        /// Why the parameters were rejected
        reason: String,
    },
}

impl GuardError {
    /// Create a malformed condition error
    pub fn malformed(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedCondition {
            kind: kind.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown guard error
    pub fn unknown_guard(name: impl Into<String>) -> Self {
        Self::UnknownGuard { name: name.into() }
    }

    /// Create an invalid parameters error
    pub fn invalid_params(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Standard Result type for guard construction
pub type Result<T> = std::result::Result<T, GuardError>;
