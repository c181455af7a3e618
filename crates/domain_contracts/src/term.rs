//! Fixed-term contract rating
//!
//! A term contract commits the customer until an end date. In exchange
//! it carries a lower rate and a monthly free-minute allowance, but
//! takes a deposit in the first month. The deposit is returned only if
//! the contract outlives its committed term.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{BillingMonth, Money};

use crate::bill::{Bill, RatePlan};
use crate::error::ContractError;
use crate::plans::TermConfig;

/// Rating state for a fixed-term contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermPlan {
    config: TermConfig,
    /// Committed end date of the term
    end: NaiveDate,
    /// Month cursor, advanced by each `new_month`
    cursor: BillingMonth,
    /// Free minutes left this month; reset in full at month start
    free_remaining: u32,
}

impl TermPlan {
    /// Creates rating state for a contract running from `start` to `end`
    pub fn new(start: NaiveDate, end: NaiveDate, config: TermConfig) -> Self {
        Self {
            config,
            end,
            cursor: BillingMonth::containing(start),
            free_remaining: config.free_minutes_per_month,
        }
    }

    /// Returns the committed end date
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the free minutes remaining this month
    pub fn free_remaining(&self) -> u32 {
        self.free_remaining
    }

    /// Configures the bill for a new month and advances the cursor
    ///
    /// Charges the monthly fee, and the deposit as well if this is the
    /// contract's very first month. The free pool resets in full; unused
    /// minutes never carry over.
    pub fn open_month(
        &mut self,
        month: BillingMonth,
        start: NaiveDate,
        bill: &mut Bill,
    ) -> Result<(), ContractError> {
        bill.set_rates(RatePlan::Term, self.config.rate)?;
        bill.add_fixed_cost(self.config.monthly_fee)?;
        if month.contains(start) {
            bill.add_fixed_cost(self.config.deposit)?;
        }
        self.cursor = month;
        self.free_remaining = self.config.free_minutes_per_month;
        Ok(())
    }

    /// Charges call minutes against the free pool first
    ///
    /// Minutes that fit in the remaining pool are free; any excess is
    /// billed at the term rate.
    pub fn charge_minutes(&mut self, minutes: u32, bill: &mut Bill) {
        if minutes <= self.free_remaining {
            self.free_remaining -= minutes;
            bill.add_free_minutes(minutes);
        } else if self.free_remaining > 0 {
            bill.add_free_minutes(self.free_remaining);
            bill.add_billed_minutes(minutes - self.free_remaining);
            self.free_remaining = 0;
        } else {
            bill.add_billed_minutes(minutes);
        }
    }

    /// Returns the settlement owed on cancellation
    ///
    /// The deposit is refunded only when the month cursor has moved past
    /// the committed end date; cancelling within the term forfeits it.
    pub fn settlement(&self, cost: Money) -> Result<Money, ContractError> {
        if self.cursor.first_day() > self.end {
            Ok(cost.checked_sub(&self.config.deposit)?)
        } else {
            Ok(cost)
        }
    }
}
