//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (startup, reload, admin API):
//!     MappingConfig[] + RouteNodeConfig[]
//!     → rule.rs (build RouteRule tree)
//!     → registry.rs (freeze as RouteTable, publish via atomic swap)
//!
//! Reservation lookup:
//!     registry.snapshot()
//!     → Arc<RouteTable> (one consistent view per call)
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once published; changes build a new table
//! - Readers never lock; writers swap a whole table
//! - Mounted rules expose their segments through a trait, never by peeking
//!   into framework internals

pub mod registry;
pub mod rule;

pub use registry::{RouteRegistry, RouteTable, ServletMapping};
pub use rule::{mount_segments, MountedRoute, PageMount, ResourceMount, RouteRule};
