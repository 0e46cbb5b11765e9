//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the reserved-names service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, connection cap).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Account-name rules.
    pub reservation: ReservationConfig,

    /// Low-level servlet mappings whose path specs are reserved.
    pub mappings: Vec<MappingConfig>,

    /// Router tree; the first segment of every mounted rule is reserved.
    pub routes: Vec<RouteNodeConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin API settings.
    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent in-flight requests (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 1_000,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 10 }
    }
}

/// Account-name rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReservationConfig {
    /// Maximum account-name length in characters.
    pub max_name_length: usize,
}

impl Default for ReservationConfig {
    fn default() -> Self {
        Self {
            max_name_length: 64,
        }
    }
}

/// A servlet mapping and the raw path specs it is bound to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct MappingConfig {
    /// Mapping identifier for logging.
    pub name: String,

    /// Raw path specs such as "/api/*" or "/health".
    pub path_specs: Vec<String>,
}

/// One node of the router tree.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RouteNodeConfig {
    /// Page mounted at a fixed path, e.g. "/teams/{team}".
    Mounted { path: String },

    /// Static resource mounted at a fixed path.
    Resource { path: String },

    /// Group of child rules.
    Compound {
        #[serde(default)]
        name: String,
        #[serde(default)]
        children: Vec<RouteNodeConfig>,
    },

    /// Rule matched by other means (host, headers); reserves nothing.
    Opaque {
        #[serde(default)]
        name: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin routes.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}
