//! Redirect resolution for a single route.
//!
//! The resolver captures a route's normalized guard list, its fallback and
//! the path being navigated to, then answers [`RedirectResolver::path`] by
//! walking the guards in order:
//!
//! ```text
//! current_path → route.redirect_to (if non-empty) → first firing guard
//! ```
//!
//! Guards are built fresh on every call and dropped right after being
//! queried. Once a guard fires, no later guard is built.

use crate::route::{GuardList, RouteDescriptor};
use tracing::{debug, trace, warn};
use waypost_guards::{GuardFactory, Result};

/// Immutable redirect resolver for one route and one candidate path
#[derive(Debug, Clone)]
pub struct RedirectResolver<F> {
    guards: GuardList,
    default_target: String,
    current_path: String,
    factory: F,
}

impl<F: GuardFactory> RedirectResolver<F> {
    /// Capture `route` and `current_path`; guards are normalized here, once
    pub fn new(route: &RouteDescriptor, current_path: impl Into<String>, factory: F) -> Self {
        let current_path = current_path.into();
        let default_target = route
            .fallback()
            .map_or_else(|| current_path.clone(), str::to_owned);

        Self {
            guards: route.guards(),
            default_target,
            current_path,
            factory,
        }
    }

    /// Resolve the redirect destination.
    ///
    /// Returns the first firing guard's destination, otherwise the route's
    /// non-empty `redirect_to`, otherwise the current path. A guard that
    /// cannot be built aborts evaluation with the factory's error.
    pub fn path(&self) -> Result<String> {
        let mut redirect_to = self.default_target.clone();

        for (index, condition) in self.guards.iter().enumerate() {
            let guard = self.factory.build(condition).map_err(|e| {
                warn!(
                    index,
                    kind = condition.kind(),
                    current_path = %self.current_path,
                    error = %e,
                    "Route guard construction failed"
                );
                e
            })?;

            trace!(index, kind = condition.kind(), "Evaluating route guard");

            if guard.fires() {
                redirect_to = guard.redirect_destination();
                debug!(
                    index,
                    kind = condition.kind(),
                    current_path = %self.current_path,
                    redirect_to = %redirect_to,
                    "Route guard requested redirect"
                );
                return Ok(redirect_to);
            }
        }

        debug!(
            current_path = %self.current_path,
            redirect_to = %redirect_to,
            guards = self.guards.len(),
            "No route guard fired, using default target"
        );
        Ok(redirect_to)
    }

    /// The path being navigated to
    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Target returned when no guard fires
    pub fn default_target(&self) -> &str {
        &self.default_target
    }

    /// Normalized guard sequence
    pub fn guards(&self) -> &GuardList {
        &self.guards
    }
}

/// Create a redirect resolver for `route` navigated to at `current_path`
///
/// # Example
/// ```rust
/// use waypost_guards::{ContextGuardFactory, GuardCondition, GuardContext};
/// use waypost_router::{create_redirect_resolver, RouteDescriptor};
///
/// let context = GuardContext::new();
/// let factory = ContextGuardFactory::new(context.clone());
/// let route = RouteDescriptor::new(GuardCondition::require_flag("authenticated", "/login"));
///
/// let resolver = create_redirect_resolver(&route, "/dashboard", &factory);
/// assert_eq!(resolver.path().unwrap(), "/login");
///
/// context.set_flag("authenticated");
/// assert_eq!(resolver.path().unwrap(), "/dashboard");
/// ```
pub fn create_redirect_resolver<F: GuardFactory>(
    route: &RouteDescriptor,
    current_path: impl Into<String>,
    factory: F,
) -> RedirectResolver<F> {
    RedirectResolver::new(route, current_path, factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypost_guards::{
        ContextGuardFactory, GuardCondition, GuardContext, GuardError, RouteGuard,
    };

    /// Applies and wants to redirect, but only records the decision
    struct AuditOnlyGuard;

    impl RouteGuard for AuditOnlyGuard {
        fn is_valid(&self) -> bool {
            true
        }

        fn wants_redirect(&self) -> bool {
            true
        }

        fn redirect_destination(&self) -> String {
            "/audited".to_string()
        }

        fn fires(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_default_is_current_path() {
        let factory = ContextGuardFactory::default();
        let route = RouteDescriptor::default();
        let resolver = create_redirect_resolver(&route, "/dashboard", &factory);

        assert_eq!(resolver.default_target(), "/dashboard");
        assert_eq!(resolver.path().unwrap(), "/dashboard");
    }

    #[test]
    fn test_route_redirect_overrides_current_path() {
        let factory = ContextGuardFactory::default();
        let route = RouteDescriptor::default().with_redirect_to("/login");
        let resolver = create_redirect_resolver(&route, "/dashboard", &factory);

        assert_eq!(resolver.path().unwrap(), "/login");
        assert_eq!(resolver.current_path(), "/dashboard");
    }

    #[test]
    fn test_guard_overrides_route_redirect() {
        let factory = ContextGuardFactory::default();
        let route = RouteDescriptor::new(vec![
            GuardCondition::forbid_flag("banned", "/banned"),
            GuardCondition::require_flag("verified", "/verify"),
        ])
        .with_redirect_to("/login");
        let resolver = create_redirect_resolver(&route, "/dashboard", &factory);

        assert_eq!(resolver.guards().len(), 2);
        assert_eq!(resolver.path().unwrap(), "/verify");
    }

    #[test]
    fn test_reevaluates_on_every_call() {
        let context = GuardContext::new();
        let factory = ContextGuardFactory::new(context.clone());
        let route = RouteDescriptor::new(GuardCondition::require_flag("authenticated", "/login"));
        let resolver = create_redirect_resolver(&route, "/dashboard", &factory);

        assert_eq!(resolver.path().unwrap(), "/login");
        assert_eq!(resolver.path().unwrap(), "/login");

        context.set_flag("authenticated");
        assert_eq!(resolver.path().unwrap(), "/dashboard");
    }

    #[test]
    fn test_factory_error_propagates_unchanged() {
        let factory = ContextGuardFactory::default();
        let route = RouteDescriptor::new(GuardCondition::custom("missing"));
        let resolver = create_redirect_resolver(&route, "/dashboard", &factory);

        assert_eq!(
            resolver.path(),
            Err(GuardError::unknown_guard("missing"))
        );
    }

    #[test]
    fn test_guard_decides_through_fires() {
        let factory = ContextGuardFactory::default().with_guard("audit", |_, _| {
            let guard: Box<dyn RouteGuard> = Box::new(AuditOnlyGuard);
            Ok(guard)
        });
        let route = RouteDescriptor::new(vec![
            GuardCondition::custom("audit"),
            GuardCondition::always("/maintenance"),
        ]);
        let resolver = create_redirect_resolver(&route, "/dashboard", &factory);

        assert_eq!(resolver.path().unwrap(), "/maintenance");
    }

    #[test]
    fn test_error_after_firing_guard_is_never_reached() {
        let factory = ContextGuardFactory::default();
        let route = RouteDescriptor::new(vec![
            GuardCondition::always("/maintenance"),
            GuardCondition::custom("missing"),
        ]);
        let resolver = create_redirect_resolver(&route, "/dashboard", &factory);

        assert_eq!(resolver.path().unwrap(), "/maintenance");
    }
}
