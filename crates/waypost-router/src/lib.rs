//! # Waypost Router
//!
//! Redirect resolution for guarded routes. A [`RedirectResolver`] evaluates a
//! route's guard chain in order against the path being navigated to; a
//! [`RouteTable`] picks the route for a path; [`RouterConfig`] loads both the
//! routes and the initial navigation state from disk.

pub mod config;
pub mod errors;
pub mod redirect;
pub mod route;
pub mod table;

pub use config::RouterConfig;
pub use errors::{Result, RouterError};
pub use redirect::{create_redirect_resolver, RedirectResolver};
pub use route::{GuardList, OnlyIf, RouteDescriptor};
pub use table::{RouteEntry, RouteTable};
