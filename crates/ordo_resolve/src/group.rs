//! In-memory collection of named plugin descriptors.
//!
//! [`PluginGroup`] is the bookkeeping side of plugin loading: callers
//! register descriptors under unique names, adjust the set, and then hand the
//! whole group to a [`Resolver`] to obtain a load order.
//!
//! # Example
//!
//! ```
//! use ordo_resolve::deps::{Descriptor, mark_used};
//! use ordo_resolve::group::PluginGroup;
//!
//! let mut group = PluginGroup::new()
//!     .add("db", Descriptor::new("database"))
//!     .add("auth", Descriptor::new("sessions").requires(["db"]))
//!     .add("debug_toolbar", Descriptor::new("toolbar"))
//!     .disable("debug_toolbar");
//!
//! if let Some(auth) = group.get_mut("auth") {
//!     mark_used(auth, ["cache"]);
//! }
//!
//! let order: Vec<String> = group
//!     .resolve()
//!     .map(|item| item.map(|(name, _)| name))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(order, ["db", "auth"]);
//! ```

use crate::deps::Dependent;
use crate::resolver::{Resolution, Resolver};

/// Named plugin descriptors, kept in insertion order.
///
/// Insertion order is only kept for inspection; it has no effect on the
/// resolved order.
#[derive(Debug, Clone)]
pub struct PluginGroup<D> {
    plugins: Vec<(String, D)>,
}

impl<D> Default for PluginGroup<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> PluginGroup<D> {
    /// Creates an empty group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Adds a plugin to the group.
    ///
    /// # Panics
    ///
    /// If a plugin with the same name is already in the group. Use
    /// [`insert()`](Self::insert) to replace an existing plugin.
    #[must_use]
    pub fn add(mut self, name: impl Into<String>, descriptor: D) -> Self {
        let name = name.into();
        assert!(
            !self.contains(&name),
            "Plugin '{name}' was added twice. Remove it first or use insert() to replace it."
        );
        self.plugins.push((name, descriptor));
        self
    }

    /// Inserts a plugin, returning the descriptor it replaced, if any.
    ///
    /// A replaced plugin keeps its position in the group.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: D) -> Option<D> {
        let name = name.into();
        match self.position(&name) {
            Some(index) => Some(core::mem::replace(&mut self.plugins[index].1, descriptor)),
            None => {
                self.plugins.push((name, descriptor));
                None
            }
        }
    }

    /// Removes a plugin from the group by name.
    ///
    /// If the plugin is not found, this is a no-op.
    #[must_use]
    pub fn disable(mut self, name: &str) -> Self {
        self.remove(name);
        self
    }

    /// Removes a plugin, returning its descriptor.
    pub fn remove(&mut self, name: &str) -> Option<D> {
        let index = self.position(name)?;
        Some(self.plugins.remove(index).1)
    }

    /// Returns the descriptor registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&D> {
        self.plugins
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Returns the descriptor registered under `name` for modification.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut D> {
        self.plugins
            .iter_mut()
            .find(|(existing, _)| existing == name)
            .map(|(_, descriptor)| descriptor)
    }

    /// Returns true if a plugin is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Returns the registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of plugins in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Returns true if the group contains no plugins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.plugins.iter().position(|(existing, _)| existing == name)
    }
}

impl<D: Dependent> PluginGroup<D> {
    /// Resolves the group with the default [`Resolver`].
    pub fn resolve(self) -> Resolution<D> {
        self.resolve_with(&Resolver::default())
    }

    /// Resolves the group with the given resolver.
    pub fn resolve_with(self, resolver: &Resolver) -> Resolution<D> {
        resolver.resolve(self.plugins)
    }
}

/// Later entries replace earlier ones with the same name.
impl<K: Into<String>, D> FromIterator<(K, D)> for PluginGroup<D> {
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        let mut group = Self::new();
        group.extend(iter);
        group
    }
}

/// Later entries replace earlier ones with the same name.
impl<K: Into<String>, D> Extend<(K, D)> for PluginGroup<D> {
    fn extend<I: IntoIterator<Item = (K, D)>>(&mut self, iter: I) {
        for (name, descriptor) in iter {
            self.insert(name, descriptor);
        }
    }
}

impl<D> IntoIterator for PluginGroup<D> {
    type Item = (String, D);
    type IntoIter = std::vec::IntoIter<(String, D)>;

    fn into_iter(self) -> Self::IntoIter {
        self.plugins.into_iter()
    }
}
