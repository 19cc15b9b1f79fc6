//! Waypost Guards prelude.
//!
//! Curated re-exports for defining and building guards.

pub use crate::condition::GuardCondition;
pub use crate::context::GuardContext;
pub use crate::errors::GuardError;
pub use crate::factory::{ContextGuardFactory, GuardFactory};
pub use crate::guard::RouteGuard;
