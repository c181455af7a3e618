//! The Contract aggregate
//!
//! A `Contract` is the billing policy attached to one phone line. It
//! owns the current month's [`Bill`], dispatches the three billing
//! operations to the active plan, and enforces the lifecycle: a
//! cancelled contract rejects every further operation.
//!
//! # Lifecycle
//!
//! - Active -> Cancelled (via `cancel`), terminal.
//!
//! # Monthly protocol
//!
//! The driver must call [`Contract::new_month`] with a fresh bill before
//! billing any of that month's calls, and may call
//! [`Contract::cancel`] only while a bill for the cancellation month is
//! installed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{BillingMonth, ContractId, Money};

use crate::bill::{Bill, RatePlan};
use crate::call::CallRecord;
use crate::error::ContractError;
use crate::mtm::MtmPlan;
use crate::plans::{MtmConfig, PrepaidConfig, TermConfig};
use crate::prepaid::PrepaidPlan;
use crate::term::TermPlan;

/// Contract lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Contract is live and may be billed
    Active,
    /// Contract was cancelled; billing is permanently rejected
    Cancelled,
}

/// The plan-specific rating state of a contract
#[derive(Debug, Clone, Serialize, Deserialize)]
enum Plan {
    Term(TermPlan),
    Mtm(MtmPlan),
    Prepaid(PrepaidPlan),
}

/// Billing contract for one phone line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    /// Unique identifier
    id: ContractId,
    /// Contract start date
    start: NaiveDate,
    /// Lifecycle state
    status: ContractStatus,
    /// Bill for the currently open month, if any
    bill: Option<Bill>,
    /// Plan-specific rating state
    plan: Plan,
}

impl Contract {
    /// Creates a fixed-term contract running from `start` to `end`
    pub fn term(start: NaiveDate, end: NaiveDate, config: TermConfig) -> Self {
        Self::with_plan(start, Plan::Term(TermPlan::new(start, end, config)))
    }

    /// Creates a month-to-month contract
    pub fn mtm(start: NaiveDate, config: MtmConfig) -> Self {
        Self::with_plan(start, Plan::Mtm(MtmPlan::new(config)))
    }

    /// Creates a prepaid contract with `initial_credit` purchased up front
    pub fn prepaid(
        start: NaiveDate,
        initial_credit: Money,
        config: PrepaidConfig,
    ) -> Result<Self, ContractError> {
        let plan = PrepaidPlan::new(initial_credit, config)?;
        Ok(Self::with_plan(start, Plan::Prepaid(plan)))
    }

    fn with_plan(start: NaiveDate, plan: Plan) -> Self {
        Self {
            id: ContractId::new_v7(),
            start,
            status: ContractStatus::Active,
            bill: None,
            plan,
        }
    }

    /// Returns the contract identifier
    pub fn id(&self) -> ContractId {
        self.id
    }

    /// Returns the contract start date
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the lifecycle state
    pub fn status(&self) -> ContractStatus {
        self.status
    }

    /// Returns true while the contract may still be billed
    pub fn is_active(&self) -> bool {
        self.status == ContractStatus::Active
    }

    /// Returns the rate plan kind of this contract
    pub fn plan(&self) -> RatePlan {
        match &self.plan {
            Plan::Term(_) => RatePlan::Term,
            Plan::Mtm(_) => RatePlan::Mtm,
            Plan::Prepaid(_) => RatePlan::Prepaid,
        }
    }

    /// Returns the bill for the currently open month
    pub fn current_bill(&self) -> Option<&Bill> {
        self.bill.as_ref()
    }

    /// Removes and returns the current month's bill
    ///
    /// Drivers call this at month end to hand the bill to reporting.
    /// A prepaid contract folds the taken bill's final cost into its
    /// running balance first, so the next `new_month` still carries the
    /// month's charges forward.
    pub fn take_bill(&mut self) -> Option<Bill> {
        let bill = self.bill.take();
        if let (Some(bill), Plan::Prepaid(prepaid)) = (&bill, &mut self.plan) {
            prepaid.carry_forward(bill.total_cost());
        }
        bill
    }

    /// Advances the contract to a new billing month
    ///
    /// Configures `bill` with the plan's rates and month-start charges
    /// and installs it as the current bill. Must be called before any of
    /// that month's calls are billed.
    pub fn new_month(&mut self, month: BillingMonth, mut bill: Bill) -> Result<(), ContractError> {
        self.ensure_active()?;
        match &mut self.plan {
            Plan::Term(term) => term.open_month(month, self.start, &mut bill)?,
            Plan::Mtm(mtm) => mtm.open_month(&mut bill)?,
            Plan::Prepaid(prepaid) => {
                // First month of the contract has no prior bill and
                // skips the carry-forward.
                let prior_cost = self.bill.as_ref().map(Bill::total_cost);
                prepaid.open_month(prior_cost, &mut bill)?;
            }
        }
        debug!(contract = %self.id, %month, plan = %self.plan(), "opened billing month");
        self.bill = Some(bill);
        Ok(())
    }

    /// Charges a call to the current month's bill
    ///
    /// The duration is rounded up to whole minutes. Term contracts
    /// consume their free pool first; other plans bill every minute.
    pub fn bill_call(&mut self, call: &CallRecord) -> Result<(), ContractError> {
        self.ensure_active()?;
        let minutes = call.billable_minutes()?;
        let bill = self.bill.as_mut().ok_or(ContractError::NoBillInstalled)?;
        match &mut self.plan {
            Plan::Term(term) => term.charge_minutes(minutes, bill),
            Plan::Mtm(_) | Plan::Prepaid(_) => bill.add_billed_minutes(minutes),
        }
        Ok(())
    }

    /// Cancels the contract and returns the settlement owed
    ///
    /// The current bill must cover the cancellation month. After this
    /// returns, every further operation fails with `AlreadyCancelled`.
    pub fn cancel(&mut self) -> Result<Money, ContractError> {
        self.ensure_active()?;
        let bill = self.bill.as_ref().ok_or(ContractError::NoBillInstalled)?;
        let cost = bill.total_cost();
        let settlement = match &self.plan {
            Plan::Term(term) => term.settlement(cost)?,
            Plan::Mtm(_) => cost,
            Plan::Prepaid(prepaid) => prepaid.settlement(cost),
        };
        self.status = ContractStatus::Cancelled;
        debug!(contract = %self.id, %settlement, "cancelled contract");
        Ok(settlement)
    }

    fn ensure_active(&self) -> Result<(), ContractError> {
        match self.status {
            ContractStatus::Active => Ok(()),
            ContractStatus::Cancelled => Err(ContractError::AlreadyCancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_kernel::{Currency, LineId};
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn bill_for(month: BillingMonth) -> Bill {
        Bill::new(LineId::new(), month, Currency::USD)
    }

    fn call_of(duration_seconds: i64) -> CallRecord {
        CallRecord::new("555-0001", "555-0002", Utc::now(), duration_seconds)
    }

    #[test]
    fn test_bill_call_before_new_month_fails() {
        let mut contract = Contract::mtm(start(), MtmConfig::default());

        let result = contract.bill_call(&call_of(60));
        assert!(matches!(result, Err(ContractError::NoBillInstalled)));
    }

    #[test]
    fn test_cancel_before_new_month_fails() {
        let mut contract = Contract::mtm(start(), MtmConfig::default());

        let result = contract.cancel();
        assert!(matches!(result, Err(ContractError::NoBillInstalled)));
    }

    #[test]
    fn test_cancelled_contract_rejects_everything() {
        let mut contract = Contract::mtm(start(), MtmConfig::default());
        let month = BillingMonth::new(2024, 1).unwrap();
        contract.new_month(month, bill_for(month)).unwrap();
        contract.cancel().unwrap();

        assert_eq!(contract.status(), ContractStatus::Cancelled);
        assert!(matches!(
            contract.new_month(month.next(), bill_for(month.next())),
            Err(ContractError::AlreadyCancelled)
        ));
        assert!(matches!(
            contract.bill_call(&call_of(60)),
            Err(ContractError::AlreadyCancelled)
        ));
        assert!(matches!(
            contract.cancel(),
            Err(ContractError::AlreadyCancelled)
        ));
    }

    #[test]
    fn test_negative_duration_is_rejected() {
        let mut contract = Contract::mtm(start(), MtmConfig::default());
        let month = BillingMonth::new(2024, 1).unwrap();
        contract.new_month(month, bill_for(month)).unwrap();

        let result = contract.bill_call(&call_of(-1));
        assert!(matches!(
            result,
            Err(ContractError::NegativeDuration { seconds: -1 })
        ));
    }

    #[test]
    fn test_new_month_rejects_rate_in_foreign_currency() {
        // A EUR tariff can never configure a USD bill; the mismatch is
        // an error at month open, not a panic at cost query time.
        let config = MtmConfig {
            rate: core_kernel::PerMinuteRate::new(Money::new(dec!(0.05), Currency::EUR)),
            ..MtmConfig::default()
        };
        let mut contract = Contract::mtm(start(), config);
        let month = BillingMonth::new(2024, 1).unwrap();

        let result = contract.new_month(month, bill_for(month));
        assert!(matches!(result, Err(ContractError::Money(_))));

        // No bill was installed, so billing still fails cleanly.
        assert!(contract.current_bill().is_none());
        assert!(matches!(
            contract.bill_call(&call_of(60)),
            Err(ContractError::NoBillInstalled)
        ));
    }

    #[test]
    fn test_plan_kind_accessor() {
        let term = Contract::term(
            start(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            TermConfig::default(),
        );
        let mtm = Contract::mtm(start(), MtmConfig::default());
        let prepaid = Contract::prepaid(
            start(),
            Money::new(dec!(100), Currency::USD),
            PrepaidConfig::default(),
        )
        .unwrap();

        assert_eq!(term.plan(), RatePlan::Term);
        assert_eq!(mtm.plan(), RatePlan::Mtm);
        assert_eq!(prepaid.plan(), RatePlan::Prepaid);
    }

    #[test]
    fn test_take_bill_empties_current_bill() {
        let mut contract = Contract::mtm(start(), MtmConfig::default());
        let month = BillingMonth::new(2024, 1).unwrap();
        contract.new_month(month, bill_for(month)).unwrap();

        let bill = contract.take_bill().unwrap();
        assert_eq!(bill.month, month);
        assert!(contract.current_bill().is_none());
    }
}
