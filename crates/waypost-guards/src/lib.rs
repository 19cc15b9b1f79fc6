//! # Waypost Guards
//!
//! Route guard primitives: condition descriptors, the guard capability set
//! consumed by the redirect resolver, the factory that connects the two, and
//! the shared navigation context guards read from.

pub mod condition;
pub mod context;
pub mod errors;
pub mod factory;
pub mod guard;
pub mod prelude;

pub use condition::GuardCondition;
pub use context::{ContextSnapshot, GuardContext};
pub use errors::{GuardError, Result};
pub use factory::{ContextGuardFactory, CustomGuardFn, GuardFactory};
pub use guard::{AlwaysGuard, ForbidFlagGuard, RequireFlagGuard, RequireValueGuard, RouteGuard};
