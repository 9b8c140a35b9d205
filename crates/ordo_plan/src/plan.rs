//! Resolved load plans.

use crate::manifest::{ManifestDescriptor, ManifestError};
use core::fmt;
use ordo_resolve::group::PluginGroup;
use ordo_resolve::resolver::Resolver;

/// A plugin in a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPlugin {
    /// Plugin name.
    pub name: String,
    /// Description from the manifest, if any.
    pub description: Option<String>,
}

/// Plugins grouped by resolution round.
///
/// Plugins in the same round do not depend on each other; every round only
/// depends on earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    rounds: Vec<Vec<PlannedPlugin>>,
}

impl Plan {
    pub(crate) fn resolve(
        group: PluginGroup<ManifestDescriptor>,
        resolver: &Resolver,
    ) -> Result<Self, ManifestError> {
        let mut resolution = group.resolve_with(resolver);
        let mut rounds = Vec::new();

        while let Some(batch) = resolution.next_batch() {
            let round: Vec<PlannedPlugin> = batch?
                .into_iter()
                .map(|(name, descriptor)| PlannedPlugin {
                    name,
                    description: descriptor.into_payload(),
                })
                .collect();
            rounds.push(round);
        }

        Ok(Self { rounds })
    }

    /// Returns the plugins grouped by round.
    #[must_use]
    pub fn rounds(&self) -> &[Vec<PlannedPlugin>] {
        &self.rounds
    }

    /// Returns the plugin names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rounds.iter().flatten().map(|plugin| plugin.name.as_str())
    }

    /// Returns the total number of plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rounds.iter().map(Vec::len).sum()
    }

    /// Returns true if the plan contains no plugins.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

/// One line per plugin: position, round, name and description.
impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut position = 0;
        for (round, plugins) in self.rounds.iter().enumerate() {
            for plugin in plugins {
                position += 1;
                write!(f, "{position:>3}. [round {}] {}", round + 1, plugin.name)?;
                if let Some(description) = &plugin.description {
                    write!(f, " - {description}")?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
