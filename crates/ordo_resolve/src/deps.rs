//! Dependency metadata for plugin descriptors.
//!
//! A plugin declares two kinds of dependencies by name:
//!
//! - **required** plugins must be emitted before it
//! - **used** plugins should be emitted before it when possible
//!
//! Metadata lives in a [`Dependencies`] value reachable through the
//! [`Dependent`] trait, so any descriptor type can carry it. [`Descriptor`]
//! is a ready-made wrapper for payloads that do not want to implement the
//! trait themselves.
//!
//! # Example
//!
//! ```
//! use ordo_resolve::deps::{Dependent, Descriptor, mark_required, mark_used};
//!
//! let auth = Descriptor::new("auth");
//! let auth = mark_required(auth, ["db"]);
//! let auth = mark_used(auth, ["cache", "metrics"]);
//!
//! assert!(auth.dependencies().required().contains("db"));
//! assert_eq!(auth.dependencies().used().len(), 2);
//! ```

use hashbrown::HashSet;

// ─────────────────────────────────────────────────────────────────────────────
// Dependencies
// ─────────────────────────────────────────────────────────────────────────────

/// Hard and soft dependency names declared by a plugin.
///
/// Both sets are unordered and deduplicated. A name may appear in both sets,
/// in which case the hard constraint dominates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    /// Plugins that must be emitted before this one.
    required: HashSet<String>,
    /// Plugins that should be emitted before this one when possible.
    used: HashSet<String>,
}

impl Dependencies {
    /// Creates empty dependency metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the names of hard dependencies.
    #[must_use]
    pub fn required(&self) -> &HashSet<String> {
        &self.required
    }

    /// Returns the names of soft dependencies.
    #[must_use]
    pub fn used(&self) -> &HashSet<String> {
        &self.used
    }

    /// Returns true if neither hard nor soft dependencies are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.used.is_empty()
    }

    /// Adds hard dependencies. Names already present are ignored.
    ///
    /// # Panics
    ///
    /// If any name is empty.
    pub fn add_required<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_names(&mut self.required, names);
    }

    /// Adds soft dependencies. Names already present are ignored.
    ///
    /// # Panics
    ///
    /// If any name is empty.
    pub fn add_used<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_names(&mut self.used, names);
    }
}

fn extend_names<I, S>(set: &mut HashSet<String>, names: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for name in names {
        let name = name.into();
        assert!(!name.is_empty(), "plugin dependency names must not be empty");
        set.insert(name);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dependent Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A plugin descriptor that carries [`Dependencies`].
///
/// The resolver only ever reads a descriptor through this trait; the rest of
/// the descriptor is opaque to it.
///
/// # Example
///
/// ```
/// use ordo_resolve::deps::{Dependencies, Dependent, mark_required};
///
/// struct Migration {
///     version: u32,
///     deps: Dependencies,
/// }
///
/// impl Dependent for Migration {
///     fn dependencies(&self) -> &Dependencies {
///         &self.deps
///     }
///
///     fn dependencies_mut(&mut self) -> &mut Dependencies {
///         &mut self.deps
///     }
/// }
///
/// let migration = mark_required(
///     Migration { version: 2, deps: Dependencies::new() },
///     ["initial_schema"],
/// );
/// assert_eq!(migration.version, 2);
/// assert_eq!(migration.dependencies().required().len(), 1);
/// ```
pub trait Dependent {
    /// Returns the attached dependency metadata.
    fn dependencies(&self) -> &Dependencies;

    /// Returns the attached dependency metadata for modification.
    fn dependencies_mut(&mut self) -> &mut Dependencies;
}

impl Dependent for Dependencies {
    fn dependencies(&self) -> &Dependencies {
        self
    }

    fn dependencies_mut(&mut self) -> &mut Dependencies {
        self
    }
}

/// Lets annotation helpers work in place on borrowed descriptors.
impl<D: Dependent + ?Sized> Dependent for &mut D {
    fn dependencies(&self) -> &Dependencies {
        (**self).dependencies()
    }

    fn dependencies_mut(&mut self) -> &mut Dependencies {
        (**self).dependencies_mut()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Annotation Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Adds hard dependencies to a descriptor and returns it.
///
/// Calls accumulate: marking a descriptor twice unions the names. Names are
/// not checked against any plugin mapping here.
///
/// # Panics
///
/// If any name is empty.
pub fn mark_required<D, I, S>(mut descriptor: D, names: I) -> D
where
    D: Dependent,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    descriptor.dependencies_mut().add_required(names);
    descriptor
}

/// Adds soft dependencies to a descriptor and returns it.
///
/// Same contract as [`mark_required`], for the `used` set.
///
/// # Panics
///
/// If any name is empty.
pub fn mark_used<D, I, S>(mut descriptor: D, names: I) -> D
where
    D: Dependent,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    descriptor.dependencies_mut().add_used(names);
    descriptor
}

// ─────────────────────────────────────────────────────────────────────────────
// Descriptor
// ─────────────────────────────────────────────────────────────────────────────

/// A plugin payload paired with its dependency metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptor<T> {
    payload: T,
    dependencies: Dependencies,
}

impl<T> Descriptor<T> {
    /// Wraps a payload with no dependencies.
    #[must_use]
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            dependencies: Dependencies::new(),
        }
    }

    /// Adds hard dependencies.
    ///
    /// # Panics
    ///
    /// If any name is empty.
    #[must_use]
    pub fn requires<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        mark_required(self, names)
    }

    /// Adds soft dependencies.
    ///
    /// # Panics
    ///
    /// If any name is empty.
    #[must_use]
    pub fn uses<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        mark_used(self, names)
    }

    /// Returns the payload.
    #[must_use]
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Returns the payload for modification.
    #[must_use]
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Consumes the descriptor, returning the payload.
    #[must_use]
    pub fn into_payload(self) -> T {
        self.payload
    }
}

impl<T> Dependent for Descriptor<T> {
    fn dependencies(&self) -> &Dependencies {
        &self.dependencies
    }

    fn dependencies_mut(&mut self) -> &mut Dependencies {
        &mut self.dependencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_dependencies_are_empty() {
        let deps = Dependencies::new();
        assert!(deps.is_empty());
        assert!(deps.required().is_empty());
        assert!(deps.used().is_empty());
    }

    #[test]
    fn mark_required_is_idempotent() {
        let once = mark_required(Dependencies::new(), ["x"]);
        let twice = mark_required(mark_required(Dependencies::new(), ["x"]), ["x"]);

        assert_eq!(once, twice);
        assert_eq!(twice.required().len(), 1);
    }

    #[test]
    fn mark_required_accumulates() {
        let deps = mark_required(Dependencies::new(), ["a"]);
        let deps = mark_required(deps, ["b", "c"]);

        assert_eq!(deps.required().len(), 3);
        assert!(deps.used().is_empty());
    }

    #[test]
    fn mark_used_only_touches_used_set() {
        let deps = mark_used(Dependencies::new(), ["a", "b"]);

        assert!(deps.required().is_empty());
        assert!(deps.used().contains("a"));
        assert!(deps.used().contains("b"));
    }

    #[test]
    fn name_may_be_both_required_and_used() {
        let deps = mark_used(mark_required(Dependencies::new(), ["a"]), ["a"]);

        assert!(deps.required().contains("a"));
        assert!(deps.used().contains("a"));
    }

    #[test]
    fn mark_through_mutable_reference() {
        let mut descriptor = Descriptor::new(7_u8);
        mark_required(&mut descriptor, ["db"]);
        mark_used(&mut descriptor, ["cache"]);

        assert!(descriptor.dependencies().required().contains("db"));
        assert!(descriptor.dependencies().used().contains("cache"));
        assert_eq!(*descriptor.payload(), 7);
    }

    #[test]
    fn descriptor_builder_methods() {
        let descriptor = Descriptor::new("auth")
            .requires(["db"])
            .uses(["cache"])
            .requires(["config"]);

        assert_eq!(descriptor.dependencies().required().len(), 2);
        assert_eq!(descriptor.dependencies().used().len(), 1);
        assert_eq!(descriptor.into_payload(), "auth");
    }

    #[test]
    fn descriptor_payload_mut() {
        let mut descriptor = Descriptor::new(String::from("a"));
        descriptor.payload_mut().push('b');
        assert_eq!(descriptor.payload(), "ab");
    }

    #[test]
    #[should_panic(expected = "must not be empty")]
    fn empty_name_panics() {
        let _ = mark_required(Dependencies::new(), [""]);
    }
}
