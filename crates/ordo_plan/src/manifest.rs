//! JSON plugin manifests.

use crate::plan::Plan;
use ordo_resolve::deps::Descriptor;
use ordo_resolve::error::ResolveError;
use ordo_resolve::group::PluginGroup;
use ordo_resolve::resolver::{MissingPolicy, Resolver};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Descriptor built from a manifest entry; the payload is its description.
pub(crate) type ManifestDescriptor = Descriptor<Option<String>>;

/// Errors loading or planning a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON or has the wrong shape.
    #[error("invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share a name.
    #[error("plugin '{0}' is declared more than once")]
    DuplicatePlugin(String),

    /// An entry has an empty name or lists an empty dependency name.
    #[error("plugin '{0}' has an empty name or dependency name")]
    EmptyName(String),

    /// The plugins cannot be ordered.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// A single plugin declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginEntry {
    /// Unique plugin name.
    pub name: String,
    /// Free-form description, carried through to the plan.
    #[serde(default)]
    pub description: Option<String>,
    /// Plugins that must load first.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Plugins that should load first when present.
    #[serde(default)]
    pub uses: Vec<String>,
}

/// A set of plugin declarations plus resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Reject required plugins that are not declared.
    #[serde(default)]
    pub strict: bool,
    /// The declared plugins.
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

impl Manifest {
    /// Parses a manifest from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded manifest");
        Self::from_json(&text)
    }

    /// Returns the resolver matching the manifest settings.
    #[must_use]
    pub fn resolver(&self) -> Resolver {
        let policy = if self.strict {
            MissingPolicy::Strict
        } else {
            MissingPolicy::Lenient
        };
        Resolver::new().with_policy(policy)
    }

    /// Converts the declarations into a [`PluginGroup`].
    ///
    /// Validation errors are reported here instead of panicking in the
    /// annotation helpers.
    pub(crate) fn into_group(self) -> Result<PluginGroup<ManifestDescriptor>, ManifestError> {
        let mut group = PluginGroup::new();
        for entry in self.plugins {
            let has_empty = entry.name.is_empty()
                || entry.requires.iter().any(String::is_empty)
                || entry.uses.iter().any(String::is_empty);
            if has_empty {
                return Err(ManifestError::EmptyName(entry.name));
            }
            // PluginGroup::add panics on duplicates; a manifest reports them instead.
            if group.contains(&entry.name) {
                return Err(ManifestError::DuplicatePlugin(entry.name));
            }

            let descriptor = Descriptor::new(entry.description)
                .requires(entry.requires)
                .uses(entry.uses);
            group.insert(entry.name, descriptor);
        }
        Ok(group)
    }

    /// Resolves the manifest into a load plan.
    pub fn plan(self) -> Result<Plan, ManifestError> {
        let resolver = self.resolver();
        let group = self.into_group()?;
        tracing::info!(
            plugins = group.len(),
            policy = ?resolver.policy(),
            "planning plugin load order"
        );
        Plan::resolve(group, &resolver)
    }
}
