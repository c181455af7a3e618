//! Contracts domain errors

use core_kernel::MoneyError;
use thiserror::Error;

/// Errors that can occur in the contracts domain
#[derive(Debug, Error)]
pub enum ContractError {
    /// Any billing operation on a cancelled contract
    #[error("Contract is cancelled and can no longer be billed")]
    AlreadyCancelled,

    /// `bill_call` or `cancel` before a bill was installed via `new_month`
    #[error("No bill installed for the current month")]
    NoBillInstalled,

    /// Call durations must be non-negative
    #[error("Negative call duration: {seconds}s")]
    NegativeDuration { seconds: i64 },

    /// Call durations whose minute count exceeds what a bill can record
    #[error("Call duration too long to bill: {seconds}s")]
    DurationTooLong { seconds: i64 },

    /// Plan configuration that cannot be billed against
    #[error("Invalid plan configuration: {0}")]
    InvalidConfiguration(String),

    /// Monetary arithmetic error (currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}
