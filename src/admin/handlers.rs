use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::{validate_route_node, RouteNodeConfig};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{RouteRule, ServletMapping};

#[derive(Debug, Serialize, Deserialize)]
pub struct RouteTableSummary {
    pub mappings: Vec<ServletMapping>,
    pub rules: Vec<String>,
    pub rule_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisteredRoute {
    pub rule: String,
    pub rule_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationErrors {
    pub errors: Vec<String>,
}

pub async fn list_routes(State(state): State<AppState>) -> Json<RouteTableSummary> {
    let table = state.registry.snapshot();
    Json(RouteTableSummary {
        mappings: table.mappings().to_vec(),
        rules: table.rules().iter().map(ToString::to_string).collect(),
        rule_count: table.rule_count(),
    })
}

/// `POST /admin/routes`: register a rule; the next computation reserves it.
pub async fn register_route(
    State(state): State<AppState>,
    Json(node): Json<RouteNodeConfig>,
) -> Response {
    if let Err(errors) = validate_route_node(&node) {
        metrics::record_request("admin_routes", 400);
        return (
            StatusCode::BAD_REQUEST,
            Json(RegistrationErrors {
                errors: errors.iter().map(ToString::to_string).collect(),
            }),
        )
            .into_response();
    }

    let rule = RouteRule::from(&node);
    let description = rule.to_string();
    state.registry.register(rule);
    tracing::info!(rule = %description, "Route registered via admin API");

    metrics::record_request("admin_routes", 201);
    (
        StatusCode::CREATED,
        Json(RegisteredRoute {
            rule: description,
            rule_count: state.registry.snapshot().rule_count(),
        }),
    )
        .into_response()
}
