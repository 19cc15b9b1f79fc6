//! Guard condition descriptors
//!
//! A condition is plain data: it says which guard to build and with what
//! parameters. It carries no behavior of its own; see [`crate::factory`].

use crate::errors::{GuardError, Result};
use serde::{Deserialize, Serialize};

/// Descriptor for one guard in a route's `only_if` chain.
///
/// Serialized with an internal `kind` tag:
///
/// ```toml
/// only_if = { kind = "require_flag", flag = "authenticated", redirect_to = "/login" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum GuardCondition {
    /// Redirect unless `flag` is set
    RequireFlag {
        /// Flag that must be present
        flag: String,
        /// Destination when the flag is missing
        redirect_to: String,
    },
    /// Redirect when `flag` is set
    ForbidFlag {
        /// Flag that must be absent
        flag: String,
        /// Destination when the flag is present
        redirect_to: String,
    },
    /// Applies only when `key` has a value; redirects when it differs from `equals`
    RequireValue {
        /// Context key to read
        key: String,
        /// Expected value
        equals: String,
        /// Destination on mismatch
        redirect_to: String,
    },
    /// Always redirect
    Always {
        /// Destination
        redirect_to: String,
    },
    /// Guard registered on the factory by name
    Custom {
        /// Registered name
        name: String,
        /// Free-form parameters passed to the registered constructor
        #[serde(default)]
        params: serde_json::Value,
    },
}

impl GuardCondition {
    /// Convenience constructor for [`GuardCondition::RequireFlag`]
    pub fn require_flag(flag: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        Self::RequireFlag {
            flag: flag.into(),
            redirect_to: redirect_to.into(),
        }
    }

    /// Convenience constructor for [`GuardCondition::ForbidFlag`]
    pub fn forbid_flag(flag: impl Into<String>, redirect_to: impl Into<String>) -> Self {
        Self::ForbidFlag {
            flag: flag.into(),
            redirect_to: redirect_to.into(),
        }
    }

    /// Convenience constructor for [`GuardCondition::RequireValue`]
    pub fn require_value(
        key: impl Into<String>,
        equals: impl Into<String>,
        redirect_to: impl Into<String>,
    ) -> Self {
        Self::RequireValue {
            key: key.into(),
            equals: equals.into(),
            redirect_to: redirect_to.into(),
        }
    }

    /// Convenience constructor for [`GuardCondition::Always`]
    pub fn always(redirect_to: impl Into<String>) -> Self {
        Self::Always {
            redirect_to: redirect_to.into(),
        }
    }

    /// Convenience constructor for [`GuardCondition::Custom`] without parameters
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom {
            name: name.into(),
            params: serde_json::Value::Null,
        }
    }

    /// Convenience constructor for [`GuardCondition::Custom`] with parameters
    pub fn custom_with(name: impl Into<String>, params: serde_json::Value) -> Self {
        Self::Custom {
            name: name.into(),
            params,
        }
    }

    /// The `kind` tag as it appears in configuration
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequireFlag { .. } => "require_flag",
            Self::ForbidFlag { .. } => "forbid_flag",
            Self::RequireValue { .. } => "require_value",
            Self::Always { .. } => "always",
            Self::Custom { .. } => "custom",
        }
    }

    /// Check the descriptor's own fields.
    ///
    /// Only structural checks happen here; whether a `custom` name is
    /// registered is the factory's business.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::RequireFlag { flag, redirect_to } | Self::ForbidFlag { flag, redirect_to } => {
                non_empty(self.kind(), "flag", flag)?;
                non_empty(self.kind(), "redirect_to", redirect_to)
            }
            Self::RequireValue {
                key, redirect_to, ..
            } => {
                non_empty(self.kind(), "key", key)?;
                non_empty(self.kind(), "redirect_to", redirect_to)
            }
            Self::Always { redirect_to } => non_empty(self.kind(), "redirect_to", redirect_to),
            Self::Custom { name, .. } => non_empty(self.kind(), "name", name),
        }
    }
}

fn non_empty(kind: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GuardError::malformed(
            kind,
            format!("{field} must not be empty"),
        ));
    }
    Ok(())
}
