//! Reserved Names Service
//!
//! Answers one question for the account-registration flow: may this name be
//! used, or would `/<name>` collide with a route the system already serves?
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ loader ──▶ RouteTable ──▶ RouteRegistry (ArcSwap)
//!        │                                        ▲      │
//!        └── watcher ── reload loop ──────────────┘      │ snapshot
//!                                                        ▼
//!   GET /api/names/{name} ──▶ AccountNameValidator ──▶ ReservedNameCollector
//!   GET /api/reserved ───────────────────────────────▶      │
//!   POST /admin/routes ──▶ RouteRegistry::register           ▼
//!                                            mappings + {wicket, new, .}
//!                                            + first mount segments
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};

use reserved_names::config::{load_config, validate_config, ConfigError, ConfigWatcher, ServiceConfig};
use reserved_names::http::{service_route_table, HttpServer};
use reserved_names::lifecycle::{shutdown_signal, Shutdown};
use reserved_names::observability::{logging, metrics};
use reserved_names::routing::RouteRegistry;

#[derive(Parser)]
#[command(name = "reserved-names")]
#[command(about = "Serves the set of names reserved by system routes", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Watched for route changes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "reserved-names starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mappings = config.mappings.len(),
        routes = config.routes.len(),
        admin_enabled = config.admin.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let registry = Arc::new(RouteRegistry::new(service_route_table(&config)));
    let shutdown = Shutdown::new();

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            shutdown_signal().await;
            shutdown.trigger();
        });
    }

    // Keep the watcher handle alive for the lifetime of the server.
    let _watcher = match &args.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let handle = watcher.run()?;
            tokio::spawn(reload_loop(updates, registry.clone(), shutdown.subscribe()));
            Some(handle)
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config, registry);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Apply reloaded configs to the registry until shutdown.
async fn reload_loop(
    mut updates: mpsc::UnboundedReceiver<ServiceConfig>,
    registry: Arc<RouteRegistry>,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            update = updates.recv() => match update {
                Some(config) => {
                    // Routes registered through the admin API do not survive a reload.
                    registry.replace(service_route_table(&config));
                }
                None => break,
            },
            _ = shutdown.recv() => break,
        }
    }
    tracing::debug!("Config reload loop stopped");
}
