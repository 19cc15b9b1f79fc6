//! `waypost resolve`

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use waypost_guards::ContextGuardFactory;
use waypost_router::RouterConfig;

/// Parse a `KEY=VALUE` argument
pub fn parse_key_value(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))?;
    if key.is_empty() {
        return Err(format!("empty key in {raw:?}"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Load `config`, apply the extra navigation state and resolve `path`
pub fn run(
    config: &Path,
    flags: &[String],
    values: &[(String, String)],
    path: &str,
) -> Result<String> {
    let config = RouterConfig::load_from_file(config)
        .with_context(|| format!("loading route configuration {}", config.display()))?;

    let context = config.guard_context();
    for flag in flags {
        context.set_flag(flag.as_str());
    }
    for (key, value) in values {
        context.set_value(key.as_str(), value.as_str());
    }
    debug!(?flags, values = values.len(), path, "Resolving navigation");

    let factory = ContextGuardFactory::new(context);
    let resolved = config
        .route_table()
        .resolve(path, &factory)
        .with_context(|| format!("resolving {path}"))?;

    Ok(resolved)
}
