//! Admin API: inspect the route table and register routes at runtime.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::{admin_auth_middleware, AdminKey};
use self::handlers::{list_routes, register_route};
use crate::config::AdminConfig;
use crate::http::server::AppState;

pub fn setup_admin_router(config: &AdminConfig) -> Router<AppState> {
    Router::new()
        .route("/admin/routes", get(list_routes).post(register_route))
        .route_layer(middleware::from_fn_with_state(
            AdminKey::new(&config.api_key),
            admin_auth_middleware,
        ))
}
