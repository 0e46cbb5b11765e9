//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (key/value fields) for machine parsing
//! - Request ID flows through the HTTP layer into every log line
//! - Metric calls are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
