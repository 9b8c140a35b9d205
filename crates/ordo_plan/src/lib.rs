//! Load-order planning for plugin manifests.
//!
//! Reads a JSON manifest of plugins and their dependencies, resolves it with
//! [`ordo_resolve`], and reports the order in rounds.
//!
//! ```text
//! manifest.json ──▶ Manifest ──▶ PluginGroup ──▶ Resolution ──▶ Plan
//! ```
//!
//! # Example
//!
//! ```
//! use ordo_plan::Manifest;
//!
//! let manifest = Manifest::from_json(r#"{
//!     "plugins": [
//!         { "name": "web", "requires": ["auth"] },
//!         { "name": "auth", "uses": ["cache"] },
//!         { "name": "cache" }
//!     ]
//! }"#).unwrap();
//!
//! let plan = manifest.plan().unwrap();
//! assert_eq!(plan.names().collect::<Vec<_>>(), ["cache", "auth", "web"]);
//! ```

mod logging;
mod manifest;
mod plan;

pub use logging::{TracingConfig, TracingFormat};
pub use manifest::{Manifest, ManifestError, PluginEntry};
pub use plan::{Plan, PlannedPlugin};
