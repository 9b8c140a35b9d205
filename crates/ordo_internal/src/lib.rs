//! # Ordo Internal Library
//!
//! Re-exports the core Ordo crates for convenience.

/// Dependency annotation and resolution.
pub use ordo_resolve;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use ordo_resolve::prelude::*;
}
