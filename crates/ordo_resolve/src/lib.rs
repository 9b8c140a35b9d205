//! Dependency ordering for named plugins.
//!
//! `ordo_resolve` takes a mapping of plugin names to descriptors and yields
//! the descriptors back in an order where every plugin follows the plugins it
//! depends on.
//!
//! - [`deps`] - Dependency metadata and the annotation helpers
//! - [`resolver`] - The resolver and its lazy [`Resolution`](resolver::Resolution)
//! - [`error`] - Failures reported when no valid order exists
//! - [`group`] - An in-memory collection of named descriptors
//!
//! # Dependency Strengths
//!
//! - **Required** (hard): the named plugin is always emitted first.
//! - **Used** (soft): the named plugin is emitted first when that is possible,
//!   but its absence or an ordering conflict never blocks resolution.
//!
//! # Example
//!
//! ```
//! use ordo_resolve::deps::Descriptor;
//! use ordo_resolve::resolver::resolve_dependencies;
//!
//! let plugins = [
//!     ("db", Descriptor::new("database pool")),
//!     ("auth", Descriptor::new("sessions").requires(["db"]).uses(["cache"])),
//!     ("cache", Descriptor::new("redis cache")),
//! ];
//!
//! let order: Vec<String> = resolve_dependencies(plugins)
//!     .map(|item| item.map(|(name, _)| name))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(order, ["cache", "db", "auth"]);
//! ```

/// Dependency metadata attached to plugin descriptors.
pub mod deps;

/// Errors raised when plugins cannot be ordered.
pub mod error;

/// In-memory collection of named plugin descriptors.
pub mod group;

/// Two-tier topological sort over plugin descriptors.
pub mod resolver;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::deps::{Dependencies, Dependent, Descriptor, mark_required, mark_used};
    pub use crate::error::{ResolveError, Unsatisfied};
    pub use crate::group::PluginGroup;
    pub use crate::resolver::{MissingPolicy, Resolution, Resolver, resolve_dependencies};
}
