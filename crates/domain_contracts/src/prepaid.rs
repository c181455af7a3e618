//! Prepaid contract rating
//!
//! A prepaid line carries a running balance across months. Negative
//! balance is credit the customer has purchased; positive balance is
//! debt. Whenever credit falls below the configured floor, fixed top-up
//! increments are purchased automatically until it is back at or below
//! the floor. The balance rides on each month's bill as a (usually
//! negative) fixed cost, so the bill's total cost at month end IS the
//! next month's opening balance.

use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::bill::{Bill, RatePlan};
use crate::error::ContractError;
use crate::plans::PrepaidConfig;

/// Rating state for a prepaid contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaidPlan {
    config: PrepaidConfig,
    /// Running balance; negative is credit owed to the customer
    balance: Money,
}

impl PrepaidPlan {
    /// Creates rating state with `initial_credit` already purchased
    ///
    /// The credit is stored negated, per the balance sign convention.
    /// Fails if the top-up increment is not positive, since the top-up
    /// loop could then never reach the credit floor.
    pub fn new(initial_credit: Money, config: PrepaidConfig) -> Result<Self, ContractError> {
        if !config.top_up_increment.is_positive() {
            return Err(ContractError::InvalidConfiguration(format!(
                "top-up increment must be positive, got {}",
                config.top_up_increment
            )));
        }
        Ok(Self {
            config,
            balance: -initial_credit,
        })
    }

    /// Returns the running balance (negative = credit)
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Configures the bill for a new month
    ///
    /// Carries the prior month's final cost forward as the opening
    /// balance when a prior bill exists; the contract's first month has
    /// none and skips the carry-forward. Then tops up until the balance
    /// is at or below the credit floor, and places the balance on the
    /// new bill as fixed cost.
    pub fn open_month(
        &mut self,
        prior_cost: Option<Money>,
        bill: &mut Bill,
    ) -> Result<(), ContractError> {
        bill.set_rates(RatePlan::Prepaid, self.config.rate)?;
        if let Some(cost) = prior_cost {
            self.balance = cost;
        }
        while self
            .balance
            .checked_sub(&self.config.credit_floor)?
            .is_positive()
        {
            self.balance = self.balance.checked_sub(&self.config.top_up_increment)?;
        }
        bill.add_fixed_cost(self.balance)?;
        Ok(())
    }

    /// Records a closed month's final cost as the running balance
    ///
    /// Called when the driver takes the bill at month end, so the next
    /// `open_month` still sees the month's charges even though the bill
    /// itself is gone.
    pub fn carry_forward(&mut self, cost: Money) {
        self.balance = cost;
    }

    /// Returns the settlement owed on cancellation
    ///
    /// Remaining credit is forfeited, never refunded; a customer in
    /// debt pays it off.
    pub fn settlement(&self, cost: Money) -> Money {
        cost.clamp_non_negative()
    }
}
