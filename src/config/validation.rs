//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and value ranges
//! - Check that every mount path is absolute
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{RouteNodeConfig, ServiceConfig};

/// A single semantic problem, located by its field path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check `config` and collect every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("invalid socket address {:?}", config.listener.bind_address),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::new("listener.max_connections", "must be greater than 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }
    if config.reservation.max_name_length == 0 {
        errors.push(ValidationError::new(
            "reservation.max_name_length",
            "must be greater than 0",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("invalid socket address {:?}", config.observability.metrics_address),
        ));
    }

    if config.admin.enabled && config.admin.api_key.trim().is_empty() {
        errors.push(ValidationError::new("admin.api_key", "required when admin is enabled"));
    }

    for (i, mapping) in config.mappings.iter().enumerate() {
        if mapping.path_specs.is_empty() {
            errors.push(ValidationError::new(
                format!("mappings[{}].path_specs", i),
                format!("mapping {:?} has no path specs", mapping.name),
            ));
        }
        for (j, spec) in mapping.path_specs.iter().enumerate() {
            if spec.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("mappings[{}].path_specs[{}]", i, j),
                    "path spec must not be blank",
                ));
            }
        }
    }

    for (i, route) in config.routes.iter().enumerate() {
        validate_route(route, &format!("routes[{}]", i), &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a single route node (and its children) outside of a full config.
pub fn validate_route_node(route: &RouteNodeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    validate_route(route, "route", &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteNodeConfig, field: &str, errors: &mut Vec<ValidationError>) {
    match route {
        RouteNodeConfig::Mounted { path } | RouteNodeConfig::Resource { path } => {
            if !path.starts_with('/') {
                errors.push(ValidationError::new(
                    format!("{}.path", field),
                    format!("mount path {:?} must start with '/'", path),
                ));
            } else if path.chars().any(char::is_whitespace) {
                errors.push(ValidationError::new(
                    format!("{}.path", field),
                    format!("mount path {:?} must not contain whitespace", path),
                ));
            }
        }
        RouteNodeConfig::Compound { children, .. } => {
            for (i, child) in children.iter().enumerate() {
                validate_route(child, &format!("{}.children[{}]", field, i), errors);
            }
        }
        RouteNodeConfig::Opaque { .. } => {}
    }
}
