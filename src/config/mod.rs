//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → RouteTable::from_config → RouteRegistry
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → main loop swaps the route table
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only routes and mappings are hot-reloaded; listener settings need a restart

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AdminConfig, ListenerConfig, LogFormat, MappingConfig, ObservabilityConfig, ReservationConfig,
    RouteNodeConfig, ServiceConfig, TimeoutConfig,
};
pub use validation::{validate_config, validate_route_node, ValidationError};
pub use watcher::ConfigWatcher;
