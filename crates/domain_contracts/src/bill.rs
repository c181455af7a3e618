//! Per-month bill accumulator
//!
//! A `Bill` collects the charges for one phone line over one billing
//! month: a fixed-cost total, free and billed minute counters, and the
//! per-minute rate set by the line's contract. The total cost is always
//! derived from those accumulators; nothing is cached.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{BillId, BillingMonth, Currency, LineId, Money, MoneyError, PerMinuteRate};

/// Rate plan applied to a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatePlan {
    /// Fixed-term contract rates
    Term,
    /// Month-to-month contract rates
    Mtm,
    /// Prepaid contract rates
    Prepaid,
}

impl RatePlan {
    /// Returns the plan code used on customer statements
    pub fn code(&self) -> &'static str {
        match self {
            RatePlan::Term => "TERM",
            RatePlan::Mtm => "MTM",
            RatePlan::Prepaid => "PREPAID",
        }
    }
}

impl fmt::Display for RatePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// The bill for one phone line over one billing month
///
/// Created fresh each month by the driver, configured once by the
/// contract's month-start hook, then mutated incrementally as calls
/// arrive. Never reused across months.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Unique identifier
    pub id: BillId,
    /// The phone line this bill covers
    pub line_id: LineId,
    /// The month this bill covers
    pub month: BillingMonth,
    /// Rate plan, set by the contract at month start
    plan: Option<RatePlan>,
    /// Per-minute rate for billed minutes
    rate: PerMinuteRate,
    /// Accumulated fixed cost (fees, deposits, credits)
    fixed_cost: Money,
    /// Minutes consumed from a free allowance
    free_minutes: u32,
    /// Minutes charged at the per-minute rate
    billed_minutes: u32,
}

impl Bill {
    /// Creates an empty bill for one line and month
    pub fn new(line_id: LineId, month: BillingMonth, currency: Currency) -> Self {
        Self {
            id: BillId::new_v7(),
            line_id,
            month,
            plan: None,
            rate: PerMinuteRate::zero(currency),
            fixed_cost: Money::zero(currency),
            free_minutes: 0,
            billed_minutes: 0,
        }
    }

    /// Sets the rate plan and per-minute rate
    ///
    /// The rate must be in the bill's currency; every amount entering
    /// the bill is checked here or in `add_fixed_cost`, so `total_cost`
    /// can never mix currencies. No charge is recorded.
    pub fn set_rates(&mut self, plan: RatePlan, rate: PerMinuteRate) -> Result<(), MoneyError> {
        if rate.currency() != self.currency() {
            return Err(MoneyError::CurrencyMismatch(
                self.currency().to_string(),
                rate.currency().to_string(),
            ));
        }
        self.plan = Some(plan);
        self.rate = rate;
        Ok(())
    }

    /// Adds a signed amount to the fixed-cost total
    ///
    /// Negative amounts model refunds and prepaid credit carried onto
    /// the bill.
    pub fn add_fixed_cost(&mut self, amount: Money) -> Result<(), MoneyError> {
        self.fixed_cost = self.fixed_cost.checked_add(&amount)?;
        Ok(())
    }

    /// Adds minutes consumed from a free allowance
    ///
    /// Saturates at `u32::MAX`; a bill never wraps its counters.
    pub fn add_free_minutes(&mut self, minutes: u32) {
        self.free_minutes = self.free_minutes.saturating_add(minutes);
    }

    /// Adds minutes charged at the per-minute rate
    ///
    /// Saturates at `u32::MAX`; a bill never wraps its counters.
    pub fn add_billed_minutes(&mut self, minutes: u32) {
        self.billed_minutes = self.billed_minutes.saturating_add(minutes);
    }

    /// Returns the total cost: fixed cost + billed minutes x rate
    ///
    /// Pure query; always derivable from the accumulators.
    pub fn total_cost(&self) -> Money {
        self.fixed_cost + self.rate.for_minutes(self.billed_minutes)
    }

    /// Returns the rate plan, if the contract has configured this bill
    pub fn plan(&self) -> Option<RatePlan> {
        self.plan
    }

    /// Returns the per-minute rate
    pub fn rate(&self) -> PerMinuteRate {
        self.rate
    }

    /// Returns the accumulated fixed cost
    pub fn fixed_cost(&self) -> Money {
        self.fixed_cost
    }

    /// Returns the free minutes consumed this month
    pub fn free_minutes(&self) -> u32 {
        self.free_minutes
    }

    /// Returns the billed minutes charged this month
    pub fn billed_minutes(&self) -> u32 {
        self.billed_minutes
    }

    /// Returns the bill currency
    pub fn currency(&self) -> Currency {
        self.fixed_cost.currency()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    proptest! {
        /// total_cost == fixed + billed x rate under any op sequence
        #[test]
        fn cost_invariant_holds_for_any_op_sequence(
            rate_minor in 0i64..1_000i64,
            fixed_amounts in proptest::collection::vec(-100_000i64..100_000i64, 0..8),
            free in proptest::collection::vec(0u32..500u32, 0..8),
            billed in proptest::collection::vec(0u32..500u32, 0..8)
        ) {
            let month = BillingMonth::new(2024, 1).unwrap();
            let mut bill = Bill::new(LineId::new(), month, Currency::USD);
            let rate = PerMinuteRate::new(Money::from_minor(rate_minor, Currency::USD));
            bill.set_rates(RatePlan::Mtm, rate).unwrap();

            let mut fixed = Money::zero(Currency::USD);
            for minor in fixed_amounts {
                let amount = Money::from_minor(minor, Currency::USD);
                bill.add_fixed_cost(amount).unwrap();
                fixed = fixed + amount;
            }
            for n in free {
                bill.add_free_minutes(n);
            }
            let mut total_billed = 0u32;
            for n in billed {
                bill.add_billed_minutes(n);
                total_billed += n;
            }

            let expected = fixed + rate.price().multiply(Decimal::from(total_billed));
            prop_assert_eq!(bill.total_cost(), expected);
        }
    }
}
