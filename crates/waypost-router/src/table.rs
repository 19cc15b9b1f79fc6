//! Route table
//!
//! Maps navigation paths to route descriptors. Patterns are either exact
//! paths (`/settings`) or prefix wildcards ending in `/*` (`/admin/*`, which
//! matches `/admin` and anything below it). Lookup prefers an exact match,
//! then the longest matching wildcard; ties keep the earliest entry.

use crate::redirect::{create_redirect_resolver, RedirectResolver};
use crate::route::{OnlyIf, RouteDescriptor};
use serde::{Deserialize, Serialize};
use tracing::trace;
use waypost_guards::{GuardFactory, Result};

const WILDCARD_SUFFIX: &str = "/*";

/// One route pattern and its descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRouteEntry", into = "RawRouteEntry")]
pub struct RouteEntry {
    path: String,
    descriptor: RouteDescriptor,
}

/// Flat on-disk shape of a [`RouteEntry`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRouteEntry {
    path: String,
    #[serde(default)]
    only_if: OnlyIf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    redirect_to: Option<String>,
}

impl From<RawRouteEntry> for RouteEntry {
    fn from(raw: RawRouteEntry) -> Self {
        let mut descriptor = RouteDescriptor::new(raw.only_if);
        if let Some(redirect_to) = raw.redirect_to {
            descriptor = descriptor.with_redirect_to(redirect_to);
        }
        Self {
            path: raw.path,
            descriptor,
        }
    }
}

impl From<RouteEntry> for RawRouteEntry {
    fn from(entry: RouteEntry) -> Self {
        Self {
            path: entry.path,
            only_if: entry.descriptor.only_if().clone(),
            redirect_to: entry.descriptor.redirect_to().map(str::to_owned),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Specificity {
    Wildcard(usize),
    Exact,
}

impl RouteEntry {
    /// Create an entry for `path`
    pub fn new(path: impl Into<String>, descriptor: RouteDescriptor) -> Self {
        Self {
            path: path.into(),
            descriptor,
        }
    }

    /// Pattern as written
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Route descriptor
    pub fn descriptor(&self) -> &RouteDescriptor {
        &self.descriptor
    }

    /// Whether the pattern is a prefix wildcard
    pub fn is_wildcard(&self) -> bool {
        self.path.ends_with(WILDCARD_SUFFIX)
    }

    fn specificity(&self, path: &str) -> Option<Specificity> {
        match self.path.strip_suffix(WILDCARD_SUFFIX) {
            Some(prefix) => {
                let matches = prefix.is_empty()
                    || path == prefix
                    || path
                        .strip_prefix(prefix)
                        .is_some_and(|rest| rest.starts_with('/'));
                matches.then_some(Specificity::Wildcard(prefix.len()))
            }
            None => (self.path == path).then_some(Specificity::Exact),
        }
    }
}

/// Ordered collection of routes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RouteEntry>,
}

impl RouteTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a route
    pub fn push(&mut self, entry: RouteEntry) {
        self.routes.push(entry);
    }

    /// Builder-style route registration
    pub fn with_route(mut self, path: impl Into<String>, descriptor: RouteDescriptor) -> Self {
        self.push(RouteEntry::new(path, descriptor));
        self
    }

    /// Number of routes
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Routes in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, RouteEntry> {
        self.routes.iter()
    }

    /// Find the route for a navigation path.
    ///
    /// Query strings and fragments are ignored for matching.
    pub fn lookup(&self, path: &str) -> Option<&RouteEntry> {
        let path = strip_query(path);
        let mut best: Option<(Specificity, &RouteEntry)> = None;

        for entry in &self.routes {
            let Some(specificity) = entry.specificity(path) else {
                continue;
            };
            if best.map_or(true, |(current, _)| specificity > current) {
                best = Some((specificity, entry));
            }
        }

        best.map(|(_, entry)| entry)
    }

    /// Resolver for the route matching `current_path`, if any
    pub fn resolver_for<F: GuardFactory>(
        &self,
        current_path: &str,
        factory: F,
    ) -> Option<RedirectResolver<F>> {
        self.lookup(current_path)
            .map(|entry| create_redirect_resolver(entry.descriptor(), current_path, factory))
    }

    /// Resolve where navigating to `current_path` should end up.
    ///
    /// Paths with no matching route resolve to themselves.
    pub fn resolve<F: GuardFactory>(&self, current_path: &str, factory: F) -> Result<String> {
        match self.resolver_for(current_path, factory) {
            Some(resolver) => resolver.path(),
            None => {
                trace!(current_path, "No route matched, keeping current path");
                Ok(current_path.to_owned())
            }
        }
    }
}

impl FromIterator<RouteEntry> for RouteTable {
    fn from_iter<I: IntoIterator<Item = RouteEntry>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteEntry;
    type IntoIter = std::slice::Iter<'a, RouteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn strip_query(path: &str) -> &str {
    path.find(|c: char| c == '?' || c == '#').map_or(path, |end| &path[..end])
}
