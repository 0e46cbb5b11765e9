//! Route registration state.
//!
//! # Responsibilities
//! - Hold the servlet mappings and the top-level router rules
//! - Publish immutable snapshots to readers
//! - Accept new registrations and whole-table replacement on reload
//!
//! # Design Decisions
//! - `ArcSwap` gives lock-free reads; a reader keeps its snapshot for the
//!   whole computation even if a writer publishes a new table meanwhile
//! - Writers use read-copy-update so concurrent registrations are not lost

use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

use crate::config::{MappingConfig, RouteNodeConfig, ServiceConfig};
use crate::routing::rule::RouteRule;

/// A low-level mapping bound to one or more raw path specs (e.g. `/api/*`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServletMapping {
    pub name: String,
    pub path_specs: Vec<String>,
}

impl ServletMapping {
    pub fn new<I, S>(name: impl Into<String>, path_specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            path_specs: path_specs.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<&MappingConfig> for ServletMapping {
    fn from(config: &MappingConfig) -> Self {
        ServletMapping::new(config.name.clone(), config.path_specs.iter().cloned())
    }
}

impl From<&RouteNodeConfig> for RouteRule {
    fn from(config: &RouteNodeConfig) -> Self {
        match config {
            RouteNodeConfig::Mounted { path } => RouteRule::page(path.clone()),
            RouteNodeConfig::Resource { path } => RouteRule::resource(path.clone()),
            RouteNodeConfig::Compound { name, children } => {
                RouteRule::compound(name.clone(), children.iter().map(RouteRule::from).collect())
            }
            RouteNodeConfig::Opaque { name } => RouteRule::opaque(name.clone()),
        }
    }
}

/// Snapshot of everything registered at one point in time.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    mappings: Vec<ServletMapping>,
    rules: Vec<RouteRule>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the `mappings` and `routes` sections of the config.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            mappings: config.mappings.iter().map(ServletMapping::from).collect(),
            rules: config.routes.iter().map(RouteRule::from).collect(),
        }
    }

    pub fn with_mapping(mut self, mapping: ServletMapping) -> Self {
        self.mappings.push(mapping);
        self
    }

    pub fn with_rule(mut self, rule: RouteRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn mappings(&self) -> &[ServletMapping] {
        &self.mappings
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Total number of rules, counting nested children.
    pub fn rule_count(&self) -> usize {
        self.rules.iter().map(RouteRule::rule_count).sum()
    }
}

/// Shared, swappable route registration state.
#[derive(Debug)]
pub struct RouteRegistry {
    table: ArcSwap<RouteTable>,
}

impl RouteRegistry {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: ArcSwap::from_pointee(table),
        }
    }

    /// Current table. The returned snapshot never changes.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    /// Replace the whole table (configuration reload).
    pub fn replace(&self, table: RouteTable) {
        tracing::info!(
            mappings = table.mappings.len(),
            rules = table.rule_count(),
            "Route table replaced"
        );
        self.table.store(Arc::new(table));
    }

    /// Register a top-level rule after startup.
    pub fn register(&self, rule: RouteRule) {
        tracing::debug!(rule = %rule, "Registering route");
        self.table.rcu(|current| RouteTable::clone(current).with_rule(rule.clone()));
    }

    /// Register a servlet mapping after startup.
    pub fn add_mapping(&self, mapping: ServletMapping) {
        tracing::debug!(mapping = %mapping.name, "Registering servlet mapping");
        self.table
            .rcu(|current| RouteTable::clone(current).with_mapping(mapping.clone()));
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_from_config() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [[mappings]]
            name = "git"
            path_specs = ["/git/*"]

            [[routes]]
            type = "mounted"
            path = "/teams"

            [[routes]]
            type = "compound"
            name = "projects"

            [[routes.children]]
            type = "resource"
            path = "/assets/*"

            [[routes.children]]
            type = "opaque"
            name = "home"
            "#,
        )
        .unwrap();

        let table = RouteTable::from_config(&config);
        assert_eq!(table.mappings(), &[ServletMapping::new("git", ["/git/*"])]);
        assert_eq!(table.rules().len(), 2);
        assert_eq!(table.rule_count(), 4);
        assert!(matches!(table.rules()[0], RouteRule::Mounted(_)));
        assert!(matches!(
            &table.rules()[1],
            RouteRule::Compound { name, children } if name == "projects" && children.len() == 2
        ));
    }

    #[test]
    fn test_snapshot_is_stable_across_registration() {
        let registry = RouteRegistry::default();
        let before = registry.snapshot();

        registry.register(RouteRule::page("/teams"));
        registry.add_mapping(ServletMapping::new("api", ["/api/*"]));

        assert_eq!(before.rule_count(), 0);
        assert!(before.mappings().is_empty());

        let after = registry.snapshot();
        assert_eq!(after.rule_count(), 1);
        assert_eq!(after.mappings().len(), 1);
    }

    #[test]
    fn test_replace_discards_previous_table() {
        let registry = RouteRegistry::new(RouteTable::new().with_rule(RouteRule::page("/old")));
        registry.replace(RouteTable::new().with_rule(RouteRule::opaque("home")));

        let table = registry.snapshot();
        assert_eq!(table.rules().len(), 1);
        assert!(matches!(table.rules()[0], RouteRule::Opaque { .. }));
    }
}
