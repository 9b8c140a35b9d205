//! Tests for resolving plugin mappings end to end.
//!
//! These cover the documented scenarios:
//! - Linear hard and soft chains
//! - Soft cycles that must not block resolution
//! - Hard cycles that must fail
//! - Single-plugin and empty inputs
//! - Missing-dependency policies


use ordo_resolve::deps::{Dependencies, Dependent, mark_required, mark_used};
use ordo_resolve::error::{ResolveError, Unsatisfied};
use ordo_resolve::group::PluginGroup;
use ordo_resolve::resolver::{MissingPolicy, Resolver, resolve_dependencies};
use test_utils::{plugin, position, resolved_names};

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn line_of_hard_and_soft_dependencies() {
    let plugins = [
        plugin("A", &[], &[]),
        plugin("B", &["A"], &[]),
        plugin("C", &[], &["A", "B"]),
    ];

    let order: Vec<&str> = resolve_dependencies(plugins)
        .map(|item| item.map(|(_, descriptor)| *descriptor.payload()))
        .collect::<Result<_, _>>()
        .expect("resolution should succeed");

    assert_eq!(order, ["A", "B", "C"]);
}

#[test]
fn soft_cycle_is_broken_by_hard_dependencies() {
    let plugins = [
        plugin("A", &[], &[]),
        plugin("B", &[], &["A", "C"]),
        plugin("C", &["A", "B"], &[]),
    ];

    let order = resolved_names(resolve_dependencies(plugins)).expect("resolution should succeed");
    assert_eq!(order, ["A", "B", "C"]);
}

#[test]
fn hard_cycle_fails() {
    let plugins = [
        plugin("A", &["C"], &[]),
        plugin("B", &["A"], &[]),
        plugin("C", &["B"], &[]),
    ];

    let err = resolved_names(resolve_dependencies(plugins)).unwrap_err();
    assert_eq!(
        err,
        ResolveError::DependencyCycle(vec![
            Unsatisfied {
                plugin: "A".to_string(),
                missing: vec!["C".to_string()],
                unregistered: Vec::new(),
            },
            Unsatisfied {
                plugin: "B".to_string(),
                missing: vec!["A".to_string()],
                unregistered: Vec::new(),
            },
            Unsatisfied {
                plugin: "C".to_string(),
                missing: vec!["B".to_string()],
                unregistered: Vec::new(),
            },
        ])
    );
}

#[test]
fn single_plugin() {
    let order = resolved_names(resolve_dependencies([plugin("only", &[], &[])]))
        .expect("resolution should succeed");
    assert_eq!(order, ["only"]);
}

#[test]
fn empty_mapping() {
    let plugins: Vec<(String, Dependencies)> = Vec::new();
    let order = resolved_names(resolve_dependencies(plugins)).expect("resolution should succeed");
    assert!(order.is_empty());
}

#[test]
fn pure_soft_cycle_still_resolves() {
    let plugins = [plugin("A", &[], &["B"]), plugin("B", &[], &["A"])];

    let order = resolved_names(resolve_dependencies(plugins)).expect("resolution should succeed");
    assert_eq!(order.len(), 2);
}

// ─────────────────────────────────────────────────────────────────────────────
// Ordering Guarantees
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn diamond_respects_every_edge() {
    let plugins = [
        plugin("app", &["auth", "storage"], &[]),
        plugin("auth", &["config"], &["cache"]),
        plugin("storage", &["config"], &[]),
        plugin("config", &[], &[]),
        plugin("cache", &[], &["config"]),
    ];

    let order = resolved_names(resolve_dependencies(plugins)).expect("resolution should succeed");
    assert_eq!(order.len(), 5);
    assert!(position(&order, "config") < position(&order, "auth"));
    assert!(position(&order, "config") < position(&order, "storage"));
    assert!(position(&order, "config") < position(&order, "cache"));
    assert!(position(&order, "cache") < position(&order, "auth"));
    assert!(position(&order, "auth") < position(&order, "app"));
    assert!(position(&order, "storage") < position(&order, "app"));
}

#[test]
fn hard_dependency_dominates_soft_on_same_name() {
    let plugins = [plugin("a", &["b"], &["b"]), plugin("b", &[], &["a"])];

    let order = resolved_names(resolve_dependencies(plugins)).expect("resolution should succeed");
    assert_eq!(order, ["b", "a"]);
}

#[test]
fn plugins_before_a_cycle_are_still_yielded() {
    let plugins = [
        plugin("base", &[], &[]),
        plugin("x", &["base", "y"], &[]),
        plugin("y", &["x"], &[]),
    ];
    let mut resolution = resolve_dependencies(plugins);

    let (first, _) = resolution.next().expect("first item").expect("base resolves");
    assert_eq!(first, "base");

    let err = resolution.next().expect("error item").unwrap_err();
    assert!(matches!(err, ResolveError::DependencyCycle(_)));
    assert!(resolution.next().is_none());
}

#[test]
fn resolution_can_be_restarted_from_the_original_mapping() {
    let plugins = vec![plugin("a", &[], &[]), plugin("b", &["a"], &[])];

    let mut partial = resolve_dependencies(plugins.clone());
    let _ = partial.next();
    drop(partial);

    let order = resolved_names(resolve_dependencies(plugins)).expect("resolution should succeed");
    assert_eq!(order, ["a", "b"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Missing Dependencies
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lenient_policy_allows_missing_required_plugin() {
    let plugins = [plugin("auth", &["db"], &[]), plugin("web", &["auth"], &[])];

    let resolver = Resolver::new().with_policy(MissingPolicy::Lenient);
    let order = resolved_names(resolver.resolve(plugins)).expect("resolution should succeed");
    assert_eq!(order, ["auth", "web"]);
}

#[test]
fn strict_policy_reports_missing_required_plugin() {
    let plugins = [
        plugin("auth", &["db", "config"], &[]),
        plugin("config", &[], &[]),
        plugin("web", &["auth", "templates"], &[]),
    ];

    let err = resolved_names(Resolver::strict().resolve(plugins)).unwrap_err();
    assert_eq!(
        err,
        ResolveError::UnknownDependency(vec![
            Unsatisfied {
                plugin: "auth".to_string(),
                missing: vec!["db".to_string()],
                unregistered: vec!["db".to_string()],
            },
            Unsatisfied {
                plugin: "web".to_string(),
                missing: vec!["auth".to_string(), "templates".to_string()],
                unregistered: vec!["templates".to_string()],
            },
        ])
    );
}

#[test]
fn strict_policy_still_reports_true_cycles_as_cycles() {
    let plugins = [plugin("a", &["b"], &[]), plugin("b", &["a"], &[])];

    let err = resolved_names(Resolver::strict().resolve(plugins)).unwrap_err();
    assert!(matches!(err, ResolveError::DependencyCycle(_)));
}

#[test]
fn missing_soft_dependency_never_blocks() {
    let plugins = [plugin("a", &[], &["ghost"]), plugin("b", &["a"], &[])];

    let order =
        resolved_names(Resolver::strict().resolve(plugins)).expect("resolution should succeed");
    assert_eq!(order, ["a", "b"]);
}

#[test]
fn strict_policy_defers_plugins_using_unregistered_names() {
    let plugins = || {
        [
            plugin("a", &[], &["ghost"]),
            plugin("b", &[], &[]),
            plugin("c", &[], &["a"]),
        ]
    };

    let lenient =
        resolved_names(resolve_dependencies(plugins())).expect("resolution should succeed");
    assert_eq!(lenient, ["a", "b", "c"]);

    let mut strict = Resolver::strict().resolve(plugins());
    let first: Vec<String> = strict
        .next_batch()
        .expect("first round")
        .expect("resolution should succeed")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(first, ["b"]);

    let second: Vec<String> = strict
        .next_batch()
        .expect("second round")
        .expect("resolution should succeed")
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(second, ["a", "c"]);
}

#[test]
fn strict_policy_reports_every_stuck_plugin_alongside_unregistered_names() {
    let plugins = [
        plugin("a", &["ghost"], &[]),
        plugin("b", &["c"], &[]),
        plugin("c", &["b"], &[]),
        plugin("d", &["a"], &[]),
    ];

    let err = resolved_names(Resolver::strict().resolve(plugins)).unwrap_err();
    assert!(matches!(err, ResolveError::UnknownDependency(_)));

    let stuck: Vec<&str> = err.stuck().iter().map(|s| s.plugin.as_str()).collect();
    assert_eq!(stuck, ["a", "b", "c", "d"]);

    let unregistered: Vec<(&str, &[String])> = err
        .unregistered()
        .map(|s| (s.plugin.as_str(), s.unregistered.as_slice()))
        .collect();
    assert_eq!(unregistered, [("a", &["ghost".to_string()][..])]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Custom Descriptors
// ─────────────────────────────────────────────────────────────────────────────

struct Extension {
    priority: u8,
    deps: Dependencies,
}

impl Dependent for Extension {
    fn dependencies(&self) -> &Dependencies {
        &self.deps
    }

    fn dependencies_mut(&mut self) -> &mut Dependencies {
        &mut self.deps
    }
}

fn extension(priority: u8) -> Extension {
    Extension {
        priority,
        deps: Dependencies::new(),
    }
}

#[test]
fn custom_descriptor_types_resolve() {
    let group = PluginGroup::new()
        .add("mail", mark_required(extension(3), ["db"]))
        .add("db", extension(1))
        .add("search", mark_used(extension(2), ["db", "mail"]));

    let priorities: Vec<u8> = group
        .resolve()
        .map(|item| item.map(|(_, ext)| ext.priority))
        .collect::<Result<_, _>>()
        .expect("resolution should succeed");

    assert_eq!(priorities, [1, 3, 2]);
}
