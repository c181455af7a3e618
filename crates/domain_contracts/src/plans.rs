//! Plan configuration for the three contract kinds
//!
//! Fees, rates, deposits, and thresholds are configuration passed at
//! contract construction rather than global constants, so tests and
//! tariff changes never touch the rating logic. The `Default` impls
//! carry the published USD tariff.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, PerMinuteRate};

/// Configuration for a fixed-term contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermConfig {
    /// Flat fee charged at the start of each month
    pub monthly_fee: Money,
    /// One-time deposit charged in the first month, refundable after
    /// the committed term
    pub deposit: Money,
    /// Rate for minutes beyond the free allowance
    pub rate: PerMinuteRate,
    /// Free-minute allowance, reset in full every month
    pub free_minutes_per_month: u32,
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            monthly_fee: Money::new(dec!(20.00), Currency::USD),
            deposit: Money::new(dec!(300.00), Currency::USD),
            rate: PerMinuteRate::new(Money::new(dec!(0.10), Currency::USD)),
            free_minutes_per_month: 100,
        }
    }
}

/// Configuration for a month-to-month contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MtmConfig {
    /// Flat fee charged at the start of each month
    pub monthly_fee: Money,
    /// Rate for every billed minute; no free allowance
    pub rate: PerMinuteRate,
}

impl Default for MtmConfig {
    fn default() -> Self {
        Self {
            monthly_fee: Money::new(dec!(50.00), Currency::USD),
            rate: PerMinuteRate::new(Money::new(dec!(0.05), Currency::USD)),
        }
    }
}

/// Configuration for a prepaid contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepaidConfig {
    /// Rate for every billed minute
    pub rate: PerMinuteRate,
    /// Balance at which an automatic top-up triggers; the balance is
    /// kept at or below this value (negative balance is credit)
    pub credit_floor: Money,
    /// Amount of credit added per top-up
    pub top_up_increment: Money,
}

impl Default for PrepaidConfig {
    fn default() -> Self {
        Self {
            rate: PerMinuteRate::new(Money::new(dec!(0.025), Currency::USD)),
            credit_floor: Money::new(dec!(-10.00), Currency::USD),
            top_up_increment: Money::new(dec!(25.00), Currency::USD),
        }
    }
}
