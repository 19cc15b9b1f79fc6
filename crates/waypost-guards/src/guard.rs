//! Route guard trait and the built-in guard kinds.
//!
//! A guard answers three questions about the current navigation state:
//! does it apply at all, does it want to redirect, and where to. Built-in
//! guards hold a handle to the [`GuardContext`] and read it on every query.

use crate::context::GuardContext;

/// Capability set every guard exposes to the redirect resolver
pub trait RouteGuard {
    /// Whether this guard's preconditions currently hold
    fn is_valid(&self) -> bool;

    /// Whether, given validity, this guard requests a redirect
    fn wants_redirect(&self) -> bool;

    /// Where to go when both of the above are true
    fn redirect_destination(&self) -> String;

    /// Both [`is_valid`](Self::is_valid) and [`wants_redirect`](Self::wants_redirect),
    /// queried in that order and short-circuiting.
    fn fires(&self) -> bool {
        self.is_valid() && self.wants_redirect()
    }
}

impl<G: RouteGuard + ?Sized> RouteGuard for Box<G> {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn wants_redirect(&self) -> bool {
        (**self).wants_redirect()
    }

    fn redirect_destination(&self) -> String {
        (**self).redirect_destination()
    }

    fn fires(&self) -> bool {
        (**self).fires()
    }
}

/// Redirects while a flag is missing (e.g. not logged in)
#[derive(Debug, Clone)]
pub struct RequireFlagGuard {
    context: GuardContext,
    flag: String,
    redirect_to: String,
}

impl RequireFlagGuard {
    /// Create a guard over `context`
    pub fn new(
        context: GuardContext,
        flag: impl Into<String>,
        redirect_to: impl Into<String>,
    ) -> Self {
        Self {
            context,
            flag: flag.into(),
            redirect_to: redirect_to.into(),
        }
    }
}

impl RouteGuard for RequireFlagGuard {
    fn is_valid(&self) -> bool {
        true
    }

    fn wants_redirect(&self) -> bool {
        !self.context.has_flag(&self.flag)
    }

    fn redirect_destination(&self) -> String {
        self.redirect_to.clone()
    }
}

/// Redirects while a flag is set (e.g. already logged in, keep off `/login`)
#[derive(Debug, Clone)]
pub struct ForbidFlagGuard {
    context: GuardContext,
    flag: String,
    redirect_to: String,
}

impl ForbidFlagGuard {
    /// Create a guard over `context`
    pub fn new(
        context: GuardContext,
        flag: impl Into<String>,
        redirect_to: impl Into<String>,
    ) -> Self {
        Self {
            context,
            flag: flag.into(),
            redirect_to: redirect_to.into(),
        }
    }
}

impl RouteGuard for ForbidFlagGuard {
    fn is_valid(&self) -> bool {
        true
    }

    fn wants_redirect(&self) -> bool {
        self.context.has_flag(&self.flag)
    }

    fn redirect_destination(&self) -> String {
        self.redirect_to.clone()
    }
}

/// Compares a context value against an expected one.
///
/// Only valid while the key has a value at all; an absent key means the
/// guard has nothing to say and the chain moves on.
#[derive(Debug, Clone)]
pub struct RequireValueGuard {
    context: GuardContext,
    key: String,
    equals: String,
    redirect_to: String,
}

impl RequireValueGuard {
    /// Create a guard over `context`
    pub fn new(
        context: GuardContext,
        key: impl Into<String>,
        equals: impl Into<String>,
        redirect_to: impl Into<String>,
    ) -> Self {
        Self {
            context,
            key: key.into(),
            equals: equals.into(),
            redirect_to: redirect_to.into(),
        }
    }
}

impl RouteGuard for RequireValueGuard {
    fn is_valid(&self) -> bool {
        self.context.has_value(&self.key)
    }

    fn wants_redirect(&self) -> bool {
        self.context
            .value(&self.key)
            .is_some_and(|current| current != self.equals)
    }

    fn redirect_destination(&self) -> String {
        self.redirect_to.clone()
    }
}

/// Unconditional redirect
#[derive(Debug, Clone)]
pub struct AlwaysGuard {
    redirect_to: String,
}

impl AlwaysGuard {
    /// Create an unconditional guard
    pub fn new(redirect_to: impl Into<String>) -> Self {
        Self {
            redirect_to: redirect_to.into(),
        }
    }
}

impl RouteGuard for AlwaysGuard {
    fn is_valid(&self) -> bool {
        true
    }

    fn wants_redirect(&self) -> bool {
        true
    }

    fn redirect_destination(&self) -> String {
        self.redirect_to.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_flag_guard() {
        let ctx = GuardContext::new();
        let guard = RequireFlagGuard::new(ctx.clone(), "authenticated", "/login");

        assert!(guard.is_valid());
        assert!(guard.wants_redirect());
        assert!(guard.fires());
        assert_eq!(guard.redirect_destination(), "/login");

        ctx.set_flag("authenticated");
        assert!(!guard.fires());
    }

    #[test]
    fn test_forbid_flag_guard() {
        let ctx = GuardContext::new();
        let guard = ForbidFlagGuard::new(ctx.clone(), "authenticated", "/home");
        assert!(!guard.fires());

        ctx.set_flag("authenticated");
        assert!(guard.fires());
        assert_eq!(guard.redirect_destination(), "/home");
    }

    #[test]
    fn test_require_value_guard_invalid_without_key() {
        let ctx = GuardContext::new();
        let guard = RequireValueGuard::new(ctx.clone(), "role", "admin", "/denied");

        assert!(!guard.is_valid());
        assert!(!guard.fires());

        ctx.set_value("role", "viewer");
        assert!(guard.is_valid());
        assert!(guard.fires());

        ctx.set_value("role", "admin");
        assert!(guard.is_valid());
        assert!(!guard.wants_redirect());
    }

    #[test]
    fn test_boxed_guard_delegates() {
        let guard: Box<dyn RouteGuard> = Box::new(AlwaysGuard::new("/maintenance"));
        assert!(guard.fires());
        assert_eq!(guard.redirect_destination(), "/maintenance");
    }

    struct MutedGuard;

    impl RouteGuard for MutedGuard {
        fn is_valid(&self) -> bool {
            true
        }

        fn wants_redirect(&self) -> bool {
            true
        }

        fn redirect_destination(&self) -> String {
            "/muted".to_string()
        }

        fn fires(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_boxed_guard_keeps_fires_override() {
        let guard: Box<dyn RouteGuard> = Box::new(MutedGuard);
        assert!(guard.is_valid() && guard.wants_redirect());
        assert!(!guard.fires());
    }
}
