//! Guard factory
//!
//! Turns [`GuardCondition`] descriptors into [`RouteGuard`] instances. All
//! shape-dependent dispatch happens here so the redirect resolver only ever
//! sees the uniform guard capability set.

use crate::condition::GuardCondition;
use crate::context::GuardContext;
use crate::errors::{GuardError, Result};
use crate::guard::{
    AlwaysGuard, ForbidFlagGuard, RequireFlagGuard, RequireValueGuard, RouteGuard,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Builds guards from condition descriptors
pub trait GuardFactory {
    /// Build a fresh guard for one evaluation
    fn build(&self, condition: &GuardCondition) -> Result<Box<dyn RouteGuard>>;
}

impl<F: GuardFactory + ?Sized> GuardFactory for &F {
    fn build(&self, condition: &GuardCondition) -> Result<Box<dyn RouteGuard>> {
        (**self).build(condition)
    }
}

impl<F: GuardFactory + ?Sized> GuardFactory for Arc<F> {
    fn build(&self, condition: &GuardCondition) -> Result<Box<dyn RouteGuard>> {
        (**self).build(condition)
    }
}

/// Constructor for a `custom` guard registered by name
pub type CustomGuardFn =
    Arc<dyn Fn(&GuardContext, &serde_json::Value) -> Result<Box<dyn RouteGuard>> + Send + Sync>;

/// Default factory: built-in kinds over a shared [`GuardContext`], plus a
/// registry of named custom guards.
#[derive(Clone, Default)]
pub struct ContextGuardFactory {
    context: GuardContext,
    custom: HashMap<String, CustomGuardFn>,
}

impl ContextGuardFactory {
    /// Create a factory whose guards read `context`
    pub fn new(context: GuardContext) -> Self {
        Self {
            context,
            custom: HashMap::new(),
        }
    }

    /// The context guards built by this factory observe
    pub fn context(&self) -> &GuardContext {
        &self.context
    }

    /// Register a custom guard constructor under `name`, replacing any previous one
    pub fn register<F>(&mut self, name: impl Into<String>, constructor: F)
    where
        F: Fn(&GuardContext, &serde_json::Value) -> Result<Box<dyn RouteGuard>>
            + Send
            + Sync
            + 'static,
    {
        self.custom.insert(name.into(), Arc::new(constructor));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_guard<F>(mut self, name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&GuardContext, &serde_json::Value) -> Result<Box<dyn RouteGuard>>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, constructor);
        self
    }

    /// Whether a custom guard is registered under `name`
    pub fn is_registered(&self, name: &str) -> bool {
        self.custom.contains_key(name)
    }

    /// Registered custom guard names, sorted
    pub fn registered_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ContextGuardFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextGuardFactory")
            .field("context", &self.context)
            .field("custom", &self.registered_names())
            .finish()
    }
}

impl GuardFactory for ContextGuardFactory {
    fn build(&self, condition: &GuardCondition) -> Result<Box<dyn RouteGuard>> {
        condition.validate()?;
        trace!(kind = condition.kind(), "Building route guard");

        let guard: Box<dyn RouteGuard> = match condition {
            GuardCondition::RequireFlag { flag, redirect_to } => Box::new(RequireFlagGuard::new(
                self.context.clone(),
                flag.as_str(),
                redirect_to.as_str(),
            )),
            GuardCondition::ForbidFlag { flag, redirect_to } => Box::new(ForbidFlagGuard::new(
                self.context.clone(),
                flag.as_str(),
                redirect_to.as_str(),
            )),
            GuardCondition::RequireValue {
                key,
                equals,
                redirect_to,
            } => Box::new(RequireValueGuard::new(
                self.context.clone(),
                key.as_str(),
                equals.as_str(),
                redirect_to.as_str(),
            )),
            GuardCondition::Always { redirect_to } => {
                Box::new(AlwaysGuard::new(redirect_to.as_str()))
            }
            GuardCondition::Custom { name, params } => {
                let constructor = self
                    .custom
                    .get(name)
                    .ok_or_else(|| GuardError::unknown_guard(name.as_str()))?;
                constructor(&self.context, params)?
            }
        };

        Ok(guard)
    }
}
