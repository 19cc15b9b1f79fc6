//! Route configuration loaded from disk and resolved end to end.

use assert_matches::assert_matches;
use std::io::Write;
use waypost_guards::{ContextGuardFactory, GuardError, RequireFlagGuard, RouteGuard};
use waypost_router::{RouterConfig, RouterError};

const ROUTES_TOML: &str = r#"
[context]
flags = ["authenticated"]

[[routes]]
path = "/login"
only_if = { kind = "forbid_flag", flag = "authenticated", redirect_to = "/dashboard" }

[[routes]]
path = "/dashboard"
redirect_to = "/login"
only_if = [
    { kind = "require_flag", flag = "authenticated", redirect_to = "/login" },
    { kind = "custom", name = "beta", params = { cohort = "early" } },
]

[[routes]]
path = "/admin/*"
only_if = { kind = "require_value", key = "role", equals = "admin", redirect_to = "/forbidden" }
"#;

fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn factory_for(config: &RouterConfig) -> ContextGuardFactory {
    ContextGuardFactory::new(config.guard_context()).with_guard("beta", |ctx, params| {
        let cohort = params
            .get("cohort")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| GuardError::invalid_params("beta", "missing cohort"))?;
        let guard: Box<dyn RouteGuard> = Box::new(RequireFlagGuard::new(
            ctx.clone(),
            format!("beta:{cohort}"),
            "/waitlist",
        ));
        Ok(guard)
    })
}

#[test]
fn loads_toml_and_resolves() {
    let file = write_temp(".toml", ROUTES_TOML);
    let config = RouterConfig::load_from_file(file.path()).unwrap();
    let table = config.route_table();
    let factory = factory_for(&config);
    let context = factory.context().clone();

    assert_eq!(table.len(), 3);

    // authenticated users bounce off the login page
    assert_eq!(table.resolve("/login", &factory).unwrap(), "/dashboard");

    // authenticated but not in the beta cohort
    assert_eq!(table.resolve("/dashboard", &factory).unwrap(), "/waitlist");

    context.set_flag("beta:early");
    assert_eq!(table.resolve("/dashboard", &factory).unwrap(), "/login");

    // role guard is inert until a role is known
    assert_eq!(table.resolve("/admin/users", &factory).unwrap(), "/admin/users");
    context.set_value("role", "viewer");
    assert_eq!(table.resolve("/admin/users", &factory).unwrap(), "/forbidden");
    context.set_value("role", "admin");
    assert_eq!(table.resolve("/admin/users", &factory).unwrap(), "/admin/users");

    // unrouted paths pass through
    assert_eq!(table.resolve("/about", &factory).unwrap(), "/about");
}

#[test]
fn loads_json() {
    let json = r#"{
        "routes": [
            { "path": "/settings", "only_if": [], "redirect_to": "/login" }
        ]
    }"#;
    let file = write_temp(".json", json);
    let config = RouterConfig::load_from_file(file.path()).unwrap();
    let factory = ContextGuardFactory::new(config.guard_context());

    assert_eq!(
        config.route_table().resolve("/settings", &factory).unwrap(),
        "/login"
    );
}

#[test]
fn unregistered_custom_guard_surfaces_as_error() {
    let config = RouterConfig::from_toml_str(ROUTES_TOML).unwrap();
    let factory = ContextGuardFactory::new(config.guard_context());

    let err = config.route_table().resolve("/dashboard", &factory).unwrap_err();
    assert_eq!(err, GuardError::unknown_guard("beta"));

    assert_matches!(
        config.check_guards(&factory),
        Err(RouterError::Guard(GuardError::UnknownGuard { name })) if name == "beta"
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = RouterConfig::load_from_file(&dir.path().join("routes.toml"));
    assert_matches!(
        result,
        Err(RouterError::Io { message }) if message.contains("routes.toml")
    );
}
