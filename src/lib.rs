//! Reserved account names service library.
//!
//! Computes the URL path segments that must never become account names
//! because an account page at `/<name>` would shadow a system route.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reservation;
pub mod routing;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use reservation::{AccountNameValidator, ReservedNameCollector};
pub use routing::{RouteRegistry, RouteRule, RouteTable};
