//! Reserved-name collection over the registered routes.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use crate::observability::metrics;
use crate::reservation::ReservationError;
use crate::routing::{RouteRegistry, RouteRule, RouteTable};

/// Words reserved regardless of what is registered.
pub const STATIC_RESERVED: [&str; 3] = ["wicket", "new", "."];

/// Source of the names that must not be assigned to accounts.
pub trait AccountNameReservation: Send + Sync {
    fn reserved(&self) -> Result<BTreeSet<String>, ReservationError>;
}

/// First path segment of a raw servlet path spec.
///
/// A single leading `/` is stripped, then everything up to the next `/` is
/// kept and trimmed: `"/api/*"` yields `api`, `"/"` yields nothing.
/// Only one slash is stripped, so `"//x"` yields nothing rather than `x`.
pub fn path_spec_prefix(spec: &str) -> Option<&str> {
    let spec = spec.strip_prefix('/').unwrap_or(spec);
    let head = spec.split('/').next().unwrap_or_default().trim();
    if head.is_empty() {
        None
    } else {
        Some(head)
    }
}

/// Compute the reserved set for one route table.
pub fn collect_reserved(table: &RouteTable) -> Result<BTreeSet<String>, ReservationError> {
    let mut reserved = BTreeSet::new();

    for mapping in table.mappings() {
        for spec in &mapping.path_specs {
            if let Some(prefix) = path_spec_prefix(spec) {
                reserved.insert(prefix.to_string());
            }
        }
    }

    reserved.extend(STATIC_RESERVED.iter().map(|s| s.to_string()));

    for rule in table.rules() {
        visit(rule, &mut reserved)?;
    }

    Ok(reserved)
}

fn visit(rule: &RouteRule, reserved: &mut BTreeSet<String>) -> Result<(), ReservationError> {
    match rule {
        RouteRule::Mounted(mount) => {
            if let Some(segment) = mount.first_segment()? {
                if !segment.is_empty() {
                    reserved.insert(segment);
                }
            }
        }
        RouteRule::Compound { children, .. } => {
            for child in children {
                visit(child, reserved)?;
            }
        }
        RouteRule::Opaque { .. } => {}
    }
    Ok(())
}

/// Computes reserved names from the live route registry.
#[derive(Debug, Clone)]
pub struct ReservedNameCollector {
    registry: Arc<RouteRegistry>,
}

impl ReservedNameCollector {
    pub fn new(registry: Arc<RouteRegistry>) -> Self {
        Self { registry }
    }

    /// Reserved names for the routes registered right now.
    pub fn compute_reserved(&self) -> Result<BTreeSet<String>, ReservationError> {
        let start = Instant::now();
        let table = self.registry.snapshot();

        match collect_reserved(&table) {
            Ok(reserved) => {
                tracing::debug!(
                    count = reserved.len(),
                    rules = table.rule_count(),
                    "Reserved names computed"
                );
                metrics::record_computation(true, reserved.len(), start);
                Ok(reserved)
            }
            Err(e) => {
                tracing::error!(error = %e, "Reserved name computation failed");
                metrics::record_computation(false, 0, start);
                Err(e)
            }
        }
    }
}

impl AccountNameReservation for ReservedNameCollector {
    fn reserved(&self) -> Result<BTreeSet<String>, ReservationError> {
        self.compute_reserved()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{PageMount, ServletMapping};

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_path_spec_prefix() {
        assert_eq!(path_spec_prefix("/api/*"), Some("api"));
        assert_eq!(path_spec_prefix("/health"), Some("health"));
        assert_eq!(path_spec_prefix("*.git"), Some("*.git"));
        assert_eq!(path_spec_prefix("/ assets /x"), Some("assets"));
        assert_eq!(path_spec_prefix("/"), None);
        assert_eq!(path_spec_prefix(""), None);
        assert_eq!(path_spec_prefix("   "), None);
        // Only one leading slash is stripped.
        assert_eq!(path_spec_prefix("//double"), None);
    }

    #[test]
    fn test_empty_table_yields_static_words() {
        let reserved = collect_reserved(&RouteTable::new()).unwrap();
        assert_eq!(reserved, set(&["wicket", "new", "."]));
    }

    #[test]
    fn test_opaque_rules_and_mappings_only() {
        let table = RouteTable::new()
            .with_mapping(ServletMapping::new("git", ["/git/*", "/info/refs"]))
            .with_rule(RouteRule::opaque("home"))
            .with_rule(RouteRule::compound("empty", vec![]));

        let reserved = collect_reserved(&table).unwrap();
        assert_eq!(reserved, set(&["git", "info", "wicket", "new", "."]));
    }

    #[test]
    fn test_mounted_rule_reserves_first_segment_only() {
        let table = RouteTable::new()
            .with_rule(RouteRule::Mounted(Arc::new(PageMount::from_segments(["teams", "x"]))));

        let reserved = collect_reserved(&table).unwrap();
        assert!(reserved.contains("teams"));
        assert!(!reserved.contains("x"));
    }

    #[test]
    fn test_compound_rule_unions_children() {
        let table = RouteTable::new().with_rule(RouteRule::compound(
            "group",
            vec![RouteRule::page("/a"), RouteRule::page("/b/c")],
        ));

        let reserved = collect_reserved(&table).unwrap();
        assert!(reserved.contains("a"));
        assert!(reserved.contains("b"));
        assert!(!reserved.contains("c"));
    }

    #[test]
    fn test_nested_compound_rules() {
        let table = RouteTable::new().with_rule(RouteRule::compound(
            "outer",
            vec![RouteRule::compound(
                "inner",
                vec![RouteRule::resource("/assets/{file}"), RouteRule::opaque("x")],
            )],
        ));

        let reserved = collect_reserved(&table).unwrap();
        assert_eq!(reserved, set(&["assets", "wicket", "new", "."]));
    }

    #[test]
    fn test_empty_segments_never_reserved() {
        let table = RouteTable::new()
            .with_mapping(ServletMapping::new("root", ["/", ""]))
            .with_rule(RouteRule::Mounted(Arc::new(PageMount::from_segments(
                Vec::<String>::new(),
            ))))
            .with_rule(RouteRule::page("/"));

        let reserved = collect_reserved(&table).unwrap();
        assert!(!reserved.contains(""));
        assert_eq!(reserved, set(&["wicket", "new", "."]));
    }

    #[test]
    fn test_settings_scenario() {
        let table = RouteTable::new()
            .with_mapping(ServletMapping::new("api", ["/api/*"]))
            .with_rule(RouteRule::compound(
                "app",
                vec![
                    RouteRule::Mounted(Arc::new(PageMount::from_segments(["settings"]))),
                    RouteRule::Mounted(Arc::new(PageMount::from_segments(Vec::<String>::new()))),
                ],
            ));

        let reserved = collect_reserved(&table).unwrap();
        assert_eq!(reserved, set(&["api", "settings", "wicket", "new", "."]));
    }

    #[test]
    fn test_extraction_failure_aborts_computation() {
        let table = RouteTable::new().with_rule(RouteRule::compound(
            "group",
            vec![RouteRule::page("/ok"), RouteRule::resource("broken")],
        ));

        let err = collect_reserved(&table).unwrap_err();
        assert!(matches!(err, ReservationError::Extraction { ref rule, .. } if rule.contains("broken")));
    }

    #[test]
    fn test_collector_reflects_later_registrations() {
        let registry = Arc::new(RouteRegistry::default());
        let collector = ReservedNameCollector::new(registry.clone());

        let first = collector.compute_reserved().unwrap();
        assert_eq!(first, collector.compute_reserved().unwrap());
        assert!(!first.contains("teams"));

        registry.register(RouteRule::page("/teams/{team}"));
        let second = collector.reserved().unwrap();
        assert!(second.contains("teams"));
        assert!(second.is_superset(&first));
    }
}
