//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, concurrency cap, request ID)
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::ServiceConfig;
use crate::http::handlers;
use crate::http::request::MakeRequestUuid;
use crate::lifecycle::shutdown;
use crate::reservation::{AccountNameValidator, ReservedNameCollector};
use crate::routing::{RouteRegistry, RouteTable, ServletMapping};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RouteRegistry>,
    pub collector: ReservedNameCollector,
    pub validator: AccountNameValidator,
}

impl AppState {
    pub fn new(registry: Arc<RouteRegistry>, max_name_length: usize) -> Self {
        let collector = ReservedNameCollector::new(registry.clone());
        let validator = AccountNameValidator::new(Arc::new(collector.clone()), max_name_length);
        Self {
            registry,
            collector,
            validator,
        }
    }
}

/// Path specs served by this process. They are reserved like any other route.
pub fn service_mapping() -> ServletMapping {
    ServletMapping::new("service", ["/api/*", "/admin/*", "/health", "/metrics"])
}

/// Route table for `config` plus this service's own mapping.
pub fn service_route_table(config: &ServiceConfig) -> RouteTable {
    RouteTable::from_config(config).with_mapping(service_mapping())
}

/// HTTP server for the reserved-names API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server over `registry`.
    pub fn new(config: ServiceConfig, registry: Arc<RouteRegistry>) -> Self {
        let state = AppState::new(registry, config.reservation.max_name_length);
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/health", get(handlers::health))
            .route("/api/reserved", get(handlers::list_reserved))
            .route("/api/names/{name}", get(handlers::check_name));

        if config.admin.enabled {
            router = router.merge(admin::setup_admin_router(&config.admin));
        }

        router
            .with_state(state)
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_connections))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown_rx` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            admin_enabled = self.config.admin.enabled,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
