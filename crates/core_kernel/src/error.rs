//! Core error types used across the system

use thiserror::Error;
use crate::money::MoneyError;
use crate::temporal::TemporalError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_error_converts() {
        let err: CoreError =
            MoneyError::CurrencyMismatch("USD".into(), "EUR".into()).into();
        assert!(matches!(err, CoreError::Money(_)));
        assert!(err.to_string().contains("Currency mismatch"));
    }

    #[test]
    fn test_temporal_error_converts() {
        let err: CoreError = TemporalError::InvalidMonth { month: 13 }.into();
        assert!(matches!(err, CoreError::Temporal(_)));
    }

    #[test]
    fn test_validation_helper() {
        let err = CoreError::validation("bad input");
        assert_eq!(err.to_string(), "Validation error: bad input");
    }
}
