//! Dependency-ordered loading of named plugins.
//!
//! See [`ordo_resolve`] for the annotator and the resolver.

pub use ordo_internal::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use ordo_internal::prelude::*;
}
