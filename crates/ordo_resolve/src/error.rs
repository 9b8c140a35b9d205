//! Error types for dependency resolution.

use core::fmt;

/// A plugin left unresolved, with the required names still blocking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsatisfied {
    /// The stuck plugin.
    pub plugin: String,
    /// Required plugin names that never became resolved, sorted.
    pub missing: Vec<String>,
    /// The subset of `missing` that is not in the plugin mapping, sorted.
    ///
    /// Always empty unless the resolver uses
    /// [`MissingPolicy::Strict`](crate::resolver::MissingPolicy::Strict).
    pub unregistered: Vec<String>,
}

impl fmt::Display for Unsatisfied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (needs {}", self.plugin, self.missing.join(", "))?;
        if !self.unregistered.is_empty() {
            write!(f, "; not registered: {}", self.unregistered.join(", "))?;
        }
        write!(f, ")")
    }
}

/// Error raised when no further plugin can be emitted.
///
/// Resolution never recovers from either variant: the remaining plugins are
/// not yielded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The remaining plugins depend on each other (or on plugins stuck behind
    /// such a cycle), so none of them can go first.
    #[error("could not resolve dependencies between plugins: {}", join(.0))]
    DependencyCycle(Vec<Unsatisfied>),

    /// At least one stuck plugin requires a name that is not in the mapping.
    ///
    /// Lists every stuck plugin, including cycle members and plugins blocked
    /// behind an unregistered one; [`Unsatisfied::unregistered`] tells them
    /// apart. Only produced by a resolver using
    /// [`MissingPolicy::Strict`](crate::resolver::MissingPolicy::Strict).
    #[error("plugins require dependencies that were never registered: {}", join(.0))]
    UnknownDependency(Vec<Unsatisfied>),
}

impl ResolveError {
    /// Returns every stuck plugin, sorted by name.
    #[must_use]
    pub fn stuck(&self) -> &[Unsatisfied] {
        match self {
            ResolveError::DependencyCycle(stuck) | ResolveError::UnknownDependency(stuck) => stuck,
        }
    }

    /// Returns the stuck plugins that require names absent from the mapping.
    pub fn unregistered(&self) -> impl Iterator<Item = &Unsatisfied> {
        self.stuck()
            .iter()
            .filter(|stuck| !stuck.unregistered.is_empty())
    }
}

fn join(stuck: &[Unsatisfied]) -> String {
    stuck
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
