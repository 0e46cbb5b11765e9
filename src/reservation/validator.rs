//! Account-name validation against the reserved set.
//!
//! Names are checked as given: no trimming, no case folding. Reserved names
//! are matched case-sensitively, mirroring how paths are routed.

use std::sync::Arc;

use thiserror::Error;

use crate::observability::metrics;
use crate::reservation::{AccountNameReservation, ReservationError};

/// Why an account name was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameRejection {
    #[error("account name must not be empty")]
    Empty,

    #[error("account name must be at most {max} characters")]
    TooLong { max: usize },

    #[error("account name contains invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("{0:?} is reserved by the system")]
    Reserved(String),

    /// The reserved set could not be computed; the name is refused.
    #[error("reserved names cannot be verified right now: {0}")]
    Unavailable(#[from] ReservationError),
}

impl NameRejection {
    /// Short machine-readable code for API responses and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            NameRejection::Empty => "empty",
            NameRejection::TooLong { .. } => "too_long",
            NameRejection::InvalidCharacter(_) => "invalid_character",
            NameRejection::Reserved(_) => "reserved",
            NameRejection::Unavailable(_) => "unavailable",
        }
    }
}

/// `.`, `..` and longer runs of dots resolve as relative path segments.
fn is_dot_segment(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c == '.')
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Validates proposed account names.
#[derive(Clone)]
pub struct AccountNameValidator {
    reservation: Arc<dyn AccountNameReservation>,
    max_length: usize,
}

impl AccountNameValidator {
    pub fn new(reservation: Arc<dyn AccountNameReservation>, max_length: usize) -> Self {
        Self {
            reservation,
            max_length,
        }
    }

    /// Accept or reject `name`. Never accepts when the reserved set is unknown.
    pub fn validate(&self, name: &str) -> Result<(), NameRejection> {
        let result = self.check(name);
        match &result {
            Ok(()) => metrics::record_name_check("accepted"),
            Err(rejection) => {
                tracing::debug!(name = %name, reason = %rejection, "Account name rejected");
                metrics::record_name_check(rejection.code());
            }
        }
        result
    }

    fn check(&self, name: &str) -> Result<(), NameRejection> {
        if name.is_empty() {
            return Err(NameRejection::Empty);
        }
        if name.chars().count() > self.max_length {
            return Err(NameRejection::TooLong {
                max: self.max_length,
            });
        }
        if let Some(c) = name.chars().find(|c| !is_allowed(*c)) {
            return Err(NameRejection::InvalidCharacter(c));
        }
        if is_dot_segment(name) {
            return Err(NameRejection::Reserved(name.to_string()));
        }

        let reserved = self.reservation.reserved()?;
        if reserved.contains(name) {
            return Err(NameRejection::Reserved(name.to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AccountNameValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountNameValidator")
            .field("max_length", &self.max_length)
            .finish_non_exhaustive()
    }
}
