//! Route rule tree.
//!
//! # Responsibilities
//! - Model registered routes as a tree of rules
//! - Expose the first fixed segment of a mounted rule
//!
//! # Design Decisions
//! - Exactly three variants: mounted, compound, opaque
//! - Mounted rules are trait objects so other router adapters can plug in
//! - Segment extraction is fallible and failures are never skipped

use std::fmt;
use std::sync::Arc;

use crate::reservation::ReservationError;

/// Capability exposed by every rule bound to a fixed path.
pub trait MountedRoute: Send + Sync + fmt::Debug {
    /// Identifier used in logs and error messages.
    fn describe(&self) -> String;

    /// First mount segment, or `None` when the rule is mounted at the root.
    fn first_segment(&self) -> Result<Option<String>, ReservationError>;
}

/// Split a mount path into its segments.
///
/// `"/teams/{team}"` becomes `["teams", "{team}"]`; `"/"` has no segments.
pub fn mount_segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A page mounted at a fixed path. Segments are parsed when the mount is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMount {
    path: String,
    segments: Vec<String>,
}

impl PageMount {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let segments = mount_segments(&path);
        Self { path, segments }
    }

    /// Build a mount directly from its segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        Self {
            path: format!("/{}", segments.join("/")),
            segments,
        }
    }

}

impl MountedRoute for PageMount {
    fn describe(&self) -> String {
        format!("page mount {}", self.path)
    }

    fn first_segment(&self) -> Result<Option<String>, ReservationError> {
        Ok(self.segments.first().filter(|s| !s.is_empty()).cloned())
    }
}

/// A static resource mount. The path is kept raw and parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMount {
    path: String,
}

impl ResourceMount {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl MountedRoute for ResourceMount {
    fn describe(&self) -> String {
        format!("resource mount {}", self.path)
    }

    fn first_segment(&self) -> Result<Option<String>, ReservationError> {
        if !self.path.starts_with('/') {
            return Err(ReservationError::Extraction {
                rule: self.describe(),
                reason: "mount path is not absolute".to_string(),
            });
        }
        if self.path.chars().any(char::is_whitespace) {
            return Err(ReservationError::Extraction {
                rule: self.describe(),
                reason: "mount path contains whitespace".to_string(),
            });
        }
        Ok(mount_segments(&self.path).into_iter().next())
    }
}

/// A node of the router tree.
#[derive(Debug, Clone)]
pub enum RouteRule {
    /// Bound to a fixed path.
    Mounted(Arc<dyn MountedRoute>),
    /// Aggregates child rules in registration order.
    Compound { name: String, children: Vec<RouteRule> },
    /// Matches requests by some other means; no segment information.
    Opaque { name: String },
}

impl RouteRule {
    pub fn page(path: impl Into<String>) -> Self {
        RouteRule::Mounted(Arc::new(PageMount::new(path)))
    }

    pub fn resource(path: impl Into<String>) -> Self {
        RouteRule::Mounted(Arc::new(ResourceMount::new(path)))
    }

    pub fn compound(name: impl Into<String>, children: Vec<RouteRule>) -> Self {
        RouteRule::Compound {
            name: name.into(),
            children,
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        RouteRule::Opaque { name: name.into() }
    }

    /// Number of rules in this subtree, including this one.
    pub fn rule_count(&self) -> usize {
        match self {
            RouteRule::Compound { children, .. } => {
                1 + children.iter().map(RouteRule::rule_count).sum::<usize>()
            }
            _ => 1,
        }
    }
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteRule::Mounted(m) => write!(f, "{}", m.describe()),
            RouteRule::Compound { name, children } => {
                write!(f, "compound {} ({} children)", name, children.len())
            }
            RouteRule::Opaque { name } => write!(f, "opaque {}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_segments() {
        assert_eq!(mount_segments("/teams/{team}"), vec!["teams", "{team}"]);
        assert_eq!(mount_segments("/teams//x/"), vec!["teams", "x"]);
        assert!(mount_segments("/").is_empty());
        assert!(mount_segments("").is_empty());
    }

    #[test]
    fn test_page_mount_first_segment() {
        let mount = PageMount::from_segments(["teams", "x"]);
        assert_eq!(mount.first_segment().unwrap(), Some("teams".to_string()));

        let root = PageMount::new("/");
        assert_eq!(root.first_segment().unwrap(), None);

        let empty = PageMount::from_segments(Vec::<String>::new());
        assert_eq!(empty.first_segment().unwrap(), None);
    }

    #[test]
    fn test_page_mount_skips_empty_first_segment() {
        let mount = PageMount::from_segments(["", "x"]);
        assert_eq!(mount.first_segment().unwrap(), None);
    }

    #[test]
    fn test_resource_mount_extraction() {
        let mount = ResourceMount::new("/assets/css/{file}");
        assert_eq!(mount.first_segment().unwrap(), Some("assets".to_string()));

        let relative = ResourceMount::new("assets/css");
        assert!(matches!(
            relative.first_segment(),
            Err(ReservationError::Extraction { .. })
        ));

        let spaced = ResourceMount::new("/my assets");
        assert!(spaced.first_segment().is_err());
    }

    #[test]
    fn test_rule_count_and_display() {
        let tree = RouteRule::compound(
            "projects",
            vec![
                RouteRule::page("/projects"),
                RouteRule::compound("nested", vec![RouteRule::opaque("home")]),
            ],
        );
        assert_eq!(tree.rule_count(), 4);
        assert_eq!(tree.to_string(), "compound projects (2 children)");
        assert_eq!(RouteRule::opaque("home").to_string(), "opaque home");
        assert_eq!(RouteRule::page("/teams").to_string(), "page mount /teams");
    }
}
