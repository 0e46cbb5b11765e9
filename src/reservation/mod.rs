//! Reserved account names.
//!
//! # Data Flow
//! ```text
//! Account registration / availability check:
//!     validator.rs (format checks)
//!     → collector.rs (compute reserved set from current route table)
//!         → servlet mapping path specs
//!         → static words {wicket, new, .}
//!         → first segment of every mounted rule
//!     → accept, or reject with a reason
//! ```
//!
//! # Design Decisions
//! - The reserved set is recomputed per call, never cached
//! - Extraction failures abort the whole computation
//! - Validation fails closed: no reserved set, no new account name

pub mod collector;
pub mod error;
pub mod validator;

pub use collector::{
    collect_reserved, path_spec_prefix, AccountNameReservation, ReservedNameCollector,
    STATIC_RESERVED,
};
pub use error::ReservationError;
pub use validator::{AccountNameValidator, NameRejection};
