//! Two-tier topological sort over plugin descriptors.
//!
//! Resolution proceeds in rounds. Each round emits every remaining plugin
//! whose dependencies are already resolved:
//!
//! 1. Prefer plugins whose required **and** used dependencies are resolved.
//! 2. If there are none, fall back to plugins whose required dependencies
//!    are resolved, ignoring used ones.
//! 3. If there are still none, the remaining plugins can never be emitted
//!    and resolution fails with a [`ResolveError`].
//!
//! Rounds are computed lazily: [`Resolution`] only evaluates the next round
//! once the previous one has been consumed.
//!
//! # Example
//!
//! ```
//! use ordo_resolve::deps::Descriptor;
//! use ordo_resolve::error::ResolveError;
//! use ordo_resolve::resolver::resolve_dependencies;
//!
//! let plugins = [
//!     ("a", Descriptor::new(()).requires(["c"])),
//!     ("b", Descriptor::new(()).requires(["a"])),
//!     ("c", Descriptor::new(()).requires(["b"])),
//! ];
//!
//! let result: Result<Vec<_>, _> = resolve_dependencies(plugins).collect();
//! assert!(matches!(result, Err(ResolveError::DependencyCycle(_))));
//! ```

use crate::deps::Dependent;
use crate::error::{ResolveError, Unsatisfied};
use core::iter::FusedIterator;
use hashbrown::{HashMap, HashSet};
use std::collections::VecDeque;

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How a dependency name that is absent from the plugin mapping is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MissingPolicy {
    /// The name counts as already resolved, making the dependency optional.
    ///
    /// Applies to both required and used names.
    #[default]
    Lenient,
    /// The name is never resolved. Plugins that require it get stuck and
    /// resolution fails with [`ResolveError::UnknownDependency`].
    ///
    /// A plugin that only uses an absent name is never soft-ready, so it is
    /// emitted in a round where the hard-only fallback applies.
    Strict,
}

/// Dependency resolver configuration.
///
/// The resolver holds no state between calls; every call to
/// [`resolve()`](Self::resolve) starts from scratch.
///
/// # Example
///
/// ```
/// use ordo_resolve::deps::Descriptor;
/// use ordo_resolve::error::ResolveError;
/// use ordo_resolve::resolver::Resolver;
///
/// let plugins = [("auth", Descriptor::new(()).requires(["db"]))];
///
/// let result: Result<Vec<_>, _> = Resolver::strict().resolve(plugins).collect();
/// assert!(matches!(result, Err(ResolveError::UnknownDependency(_))));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolver {
    policy: MissingPolicy,
}

impl Resolver {
    /// Creates a resolver with the [`MissingPolicy::Lenient`] policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver with the [`MissingPolicy::Strict`] policy.
    #[must_use]
    pub fn strict() -> Self {
        Self::new().with_policy(MissingPolicy::Strict)
    }

    /// Sets how absent required names are treated.
    #[must_use]
    pub fn with_policy(mut self, policy: MissingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured policy.
    #[must_use]
    pub fn policy(&self) -> MissingPolicy {
        self.policy
    }

    /// Starts resolving the given plugin mapping.
    ///
    /// If a name occurs more than once, the last descriptor wins. No work
    /// beyond indexing the input happens until the returned sequence is
    /// consumed.
    pub fn resolve<K, D, I>(&self, plugins: I) -> Resolution<D>
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Dependent,
    {
        let descriptors: HashMap<String, D> = plugins
            .into_iter()
            .map(|(name, descriptor)| (name.into(), descriptor))
            .collect();
        let known: HashSet<String> = descriptors.keys().cloned().collect();

        let pending = descriptors
            .iter()
            .map(|(name, descriptor)| {
                let deps = descriptor.dependencies();
                let required = deps
                    .required()
                    .iter()
                    .filter(|dep| match self.policy {
                        MissingPolicy::Strict => true,
                        MissingPolicy::Lenient => {
                            let present = known.contains(dep.as_str());
                            if !present {
                                tracing::debug!(
                                    plugin = %name,
                                    dependency = %dep,
                                    "required plugin not registered, treating as satisfied"
                                );
                            }
                            present
                        }
                    })
                    .cloned()
                    .collect();
                let used = deps
                    .used()
                    .iter()
                    .filter(|dep| match self.policy {
                        MissingPolicy::Strict => true,
                        MissingPolicy::Lenient => known.contains(dep.as_str()),
                    })
                    .cloned()
                    .collect();
                (name.clone(), Pending { required, used })
            })
            .collect();

        Resolution {
            descriptors,
            pending,
            resolved: HashSet::new(),
            known,
            ready: VecDeque::new(),
            rounds: 0,
            phase: Phase::Running,
        }
    }
}

/// Resolves a plugin mapping with the default [`Resolver`].
///
/// Required names absent from the mapping are treated as satisfied; use
/// [`Resolver::strict()`] to reject them instead.
///
/// # Example
///
/// ```
/// use ordo_resolve::deps::Descriptor;
/// use ordo_resolve::resolver::resolve_dependencies;
///
/// let plugins = [
///     ("b", Descriptor::new(2).requires(["a"])),
///     ("a", Descriptor::new(1)),
/// ];
///
/// let payloads: Vec<i32> = resolve_dependencies(plugins)
///     .map(|item| item.map(|(_, descriptor)| descriptor.into_payload()))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(payloads, [1, 2]);
/// ```
pub fn resolve_dependencies<K, D, I>(plugins: I) -> Resolution<D>
where
    I: IntoIterator<Item = (K, D)>,
    K: Into<String>,
    D: Dependent,
{
    Resolver::new().resolve(plugins)
}

// ─────────────────────────────────────────────────────────────────────────────
// Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Dependencies of a plugin not yet emitted, restricted to what can matter.
#[derive(Debug)]
struct Pending {
    required: HashSet<String>,
    used: HashSet<String>,
}

/// Lifecycle of a [`Resolution`]: `Running` → `Done` or `Running` → `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Running,
    Done,
    Failed,
}

/// A lazily computed dependency order.
///
/// Yields `(name, descriptor)` pairs; every plugin appears exactly once, after
/// all of the plugins it requires. Within a round, plugins are yielded in
/// ascending name order, though callers should only rely on the dependency
/// ordering.
///
/// When no more plugins can be emitted, a single [`ResolveError`] is yielded
/// and the sequence ends. Collecting into `Result<Vec<_>, _>` therefore never
/// produces a silently truncated order.
///
/// The sequence is single-pass: to start over, resolve the original mapping
/// again.
#[derive(Debug)]
pub struct Resolution<D> {
    /// Descriptors not yet handed out.
    descriptors: HashMap<String, D>,
    /// Plugins not yet emitted.
    pending: HashMap<String, Pending>,
    /// Plugins already emitted (or queued in `ready`).
    resolved: HashSet<String>,
    /// Every name in the input mapping.
    known: HashSet<String>,
    /// The current round, not yet consumed.
    ready: VecDeque<(String, D)>,
    rounds: usize,
    phase: Phase,
}

impl<D> Resolution<D> {
    /// Returns the number of plugins not yet yielded.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.ready.len() + self.pending.len()
    }

    /// Returns the number of rounds computed so far.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Yields the rest of the current round, or computes and yields the next one.
    ///
    /// Returns `None` once every plugin has been yielded, or after an error
    /// has been returned.
    pub fn next_batch(&mut self) -> Option<Result<Vec<(String, D)>, ResolveError>> {
        if self.ready.is_empty() {
            if let Err(err) = self.advance()? {
                return Some(Err(err));
            }
        }
        Some(Ok(self.ready.drain(..).collect()))
    }

    /// Computes the next round into `ready`.
    ///
    /// Returns `None` when there is nothing left to compute.
    fn advance(&mut self) -> Option<Result<(), ResolveError>> {
        if self.phase != Phase::Running {
            return None;
        }

        if self.pending.is_empty() {
            self.phase = Phase::Done;
            tracing::debug!(rounds = self.rounds, "dependency resolution complete");
            return None;
        }

        let mut batch = self.ready_names(true);
        let relaxed = batch.is_empty();
        if relaxed {
            batch = self.ready_names(false);
        }

        if batch.is_empty() {
            self.phase = Phase::Failed;
            let err = self.stuck_error();
            tracing::warn!(error = %err, "dependency resolution failed");
            return Some(Err(err));
        }

        batch.sort_unstable();
        self.rounds += 1;
        tracing::debug!(
            round = self.rounds,
            relaxed,
            plugins = ?batch,
            "resolved plugin batch"
        );

        for name in batch {
            self.pending.remove(&name);
            self.resolved.insert(name.clone());
            if let Some(descriptor) = self.descriptors.remove(&name) {
                self.ready.push_back((name, descriptor));
            }
        }

        Some(Ok(()))
    }

    /// Names of pending plugins whose required (and, if `honor_used`, used)
    /// dependencies are all resolved.
    fn ready_names(&self, honor_used: bool) -> Vec<String> {
        self.pending
            .iter()
            .filter(|(_, deps)| {
                deps.required.is_subset(&self.resolved)
                    && (!honor_used || deps.used.is_subset(&self.resolved))
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Describes why the pending plugins are stuck.
    ///
    /// Every pending plugin is listed; the error is `UnknownDependency` as soon
    /// as one of them requires a name absent from the mapping.
    fn stuck_error(&self) -> ResolveError {
        let mut stuck: Vec<Unsatisfied> = self
            .pending
            .iter()
            .map(|(name, deps)| {
                let mut missing: Vec<String> = deps
                    .required
                    .difference(&self.resolved)
                    .cloned()
                    .collect();
                missing.sort_unstable();

                let unregistered = missing
                    .iter()
                    .filter(|dep| !self.known.contains(dep.as_str()))
                    .cloned()
                    .collect();

                Unsatisfied {
                    plugin: name.clone(),
                    missing,
                    unregistered,
                }
            })
            .collect();
        stuck.sort_unstable_by(|a, b| a.plugin.cmp(&b.plugin));

        if stuck.iter().any(|s| !s.unregistered.is_empty()) {
            ResolveError::UnknownDependency(stuck)
        } else {
            ResolveError::DependencyCycle(stuck)
        }
    }
}

impl<D> Iterator for Resolution<D> {
    type Item = Result<(String, D), ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(Ok(item));
            }
            if let Err(err) = self.advance()? {
                return Some(Err(err));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.phase {
            // One extra slot for a possible error.
            Phase::Running => (self.ready.len(), Some(self.remaining() + 1)),
            Phase::Done | Phase::Failed => (self.ready.len(), Some(self.ready.len())),
        }
    }
}

impl<D> FusedIterator for Resolution<D> {}
