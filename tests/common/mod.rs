//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use reserved_names::config::ServiceConfig;
use reserved_names::http::{service_route_table, HttpServer};
use reserved_names::lifecycle::Shutdown;
use reserved_names::routing::RouteRegistry;

pub const ADMIN_KEY: &str = "test-admin-key";

/// A server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub registry: Arc<RouteRegistry>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(self) {
        self.shutdown.trigger();
        self.handle.await.unwrap().unwrap();
    }
}

/// Parse `toml`, enable the admin API, and start a server for it.
pub async fn start_server(toml: &str) -> TestServer {
    let mut config: ServiceConfig = toml::from_str(toml).unwrap();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.admin.enabled = true;
    config.admin.api_key = ADMIN_KEY.into();

    let registry = Arc::new(RouteRegistry::new(service_route_table(&config)));
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, registry.clone());
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, rx).await });

    TestServer {
        addr,
        registry,
        shutdown,
        handle,
    }
}
