//! Router configuration
//!
//! Routes and the initial navigation state, loaded from TOML or JSON:
//!
//! ```toml
//! [context]
//! flags = ["authenticated"]
//! values = { role = "viewer" }
//!
//! [[routes]]
//! path = "/admin/*"
//! redirect_to = "/login"
//! only_if = [
//!     { kind = "require_flag", flag = "authenticated", redirect_to = "/login" },
//!     { kind = "require_value", key = "role", equals = "admin", redirect_to = "/forbidden" },
//! ]
//! ```

use crate::errors::{Result, RouterError};
use crate::table::{RouteEntry, RouteTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use waypost_guards::{ContextSnapshot, GuardContext, GuardFactory};

/// Loaded router configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Routes in registration order
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
    /// Initial navigation state
    #[serde(default)]
    pub context: ContextSnapshot,
}

impl RouterConfig {
    /// Load configuration from a file; `.json` files parse as JSON, anything
    /// else as TOML. The result is validated before it is returned.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RouterError::io(format!("Failed to read {}: {e}", path.display()))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };

        debug!(
            path = %path.display(),
            routes = config.routes.len(),
            "Loaded router configuration"
        );
        Ok(config)
    }

    /// Parse and validate TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON configuration
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate route patterns and guard descriptors.
    ///
    /// Custom guard names are not checked here since registration happens
    /// on the factory at runtime.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for entry in &self.routes {
            validate_pattern(entry.path())?;

            if !seen.insert(entry.path()) {
                return Err(RouterError::config(format!(
                    "Duplicate route path: {}",
                    entry.path()
                )));
            }

            for condition in &entry.descriptor().guards() {
                condition.validate().map_err(|e| {
                    RouterError::config(format!("Route {}: {e}", entry.path()))
                })?;
            }
        }

        Ok(())
    }

    /// Build every configured guard once against `factory`.
    ///
    /// Catches what [`validate`](Self::validate) cannot: custom guards the
    /// factory has no constructor for, or whose parameters it rejects. The
    /// first failure is returned as [`RouterError::Guard`].
    pub fn check_guards<F: GuardFactory>(&self, factory: F) -> Result<()> {
        for entry in &self.routes {
            for condition in &entry.descriptor().guards() {
                factory.build(condition)?;
            }
        }
        Ok(())
    }

    /// Route table built from the configured routes
    pub fn route_table(&self) -> RouteTable {
        self.routes.iter().cloned().collect()
    }

    /// Fresh navigation context seeded from the configured state
    pub fn guard_context(&self) -> GuardContext {
        GuardContext::from_snapshot(self.context.clone())
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if !pattern.starts_with('/') {
        return Err(RouterError::config(format!(
            "Route path must start with '/': {pattern:?}"
        )));
    }

    let body = pattern.strip_suffix("/*").unwrap_or(pattern);
    if body.contains('*') {
        return Err(RouterError::config(format!(
            "Wildcard is only allowed as a trailing '/*': {pattern:?}"
        )));
    }

    if body.contains(|c: char| c == '?' || c == '#') {
        return Err(RouterError::config(format!(
            "Route path must not contain a query or fragment: {pattern:?}"
        )));
    }

    Ok(())
}
