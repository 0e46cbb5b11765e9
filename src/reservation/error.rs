//! Reservation errors.

use thiserror::Error;

/// Failure to compute the reserved-name set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// A mounted rule did not yield its first segment.
    #[error("cannot extract mount segment from {rule}: {reason}")]
    Extraction { rule: String, reason: String },
}
