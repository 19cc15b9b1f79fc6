//! `waypost check`

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::Path;
use tracing::warn;
use waypost_guards::GuardCondition;
use waypost_router::RouterConfig;

/// Load and validate `config`, returning a per-route summary
pub fn run(config: &Path) -> Result<String> {
    let loaded = RouterConfig::load_from_file(config)
        .with_context(|| format!("loading route configuration {}", config.display()))?;

    let mut custom = BTreeSet::new();
    let mut summary = format!("{}: {} route(s)", config.display(), loaded.routes.len());

    for entry in &loaded.routes {
        let guards = entry.descriptor().guards();
        let kinds: Vec<&str> = guards.iter().map(GuardCondition::kind).collect();
        for condition in &guards {
            if let GuardCondition::Custom { name, .. } = condition {
                custom.insert(name.clone());
            }
        }

        write!(summary, "\n  {} [{}]", entry.path(), kinds.join(", "))?;
        if let Some(fallback) = entry.descriptor().fallback() {
            write!(summary, " -> {fallback}")?;
        }
    }

    if !custom.is_empty() {
        warn!(
            guards = ?custom,
            "Custom guards must be registered by the embedding application"
        );
        let names: Vec<&str> = custom.iter().map(String::as_str).collect();
        write!(summary, "\ncustom guards: {}", names.join(", "))?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_summary() {
        let file = temp(
            r#"
[[routes]]
path = "/dashboard"
redirect_to = "/login"
only_if = [
    { kind = "require_flag", flag = "authenticated", redirect_to = "/login" },
    { kind = "custom", name = "beta" },
]

[[routes]]
path = "/about"
"#,
        );

        let summary = run(file.path()).unwrap();
        assert!(summary.contains("2 route(s)"));
        assert!(summary.contains("/dashboard [require_flag, custom] -> /login"));
        assert!(summary.contains("/about []"));
        assert!(summary.contains("custom guards: beta"));
    }

    #[test]
    fn test_invalid_config_fails() {
        let file = temp("[[routes]]\npath = \"about\"\n");
        let err = run(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("must start with '/'"));
    }
}
