//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (assign request ID)
//!     → handlers.rs (reserved-name listing, name checks)
//!     → admin (runtime route registration, key protected)
//!     → JSON response
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{service_mapping, service_route_table, AppState, HttpServer};
