//! Contracts Domain - Phone-Line Billing Policies
//!
//! This crate implements the billing policies applied to a single phone
//! line: a per-month bill accumulator and the three contract kinds that
//! configure and charge it.
//!
//! # Billing model
//!
//! A driver walks the months present in a call dataset. For each month it
//! opens a fresh [`Bill`], hands it to the line's [`Contract`] via
//! [`Contract::new_month`], feeds that month's calls through
//! [`Contract::bill_call`], and reads the accumulated cost back at month
//! end. Cancelling a contract settles the current bill and permanently
//! deactivates the contract.
//!
//! # Contract kinds
//!
//! - **Term**: fixed commitment with a deposit, a monthly fee, and a pool
//!   of free minutes that resets every month. Cancelling after the term
//!   ends refunds the deposit; cancelling early forfeits it.
//! - **MTM**: month-to-month, a flat fee and a higher per-minute rate,
//!   no commitment and no deposit.
//! - **Prepaid**: a credit balance carried across months, automatically
//!   topped up in fixed increments whenever it runs low.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_contracts::{Contract, Bill, MtmConfig};
//!
//! let mut contract = Contract::mtm(start_date, MtmConfig::default());
//!
//! contract.new_month(month, Bill::new(line_id, month, Currency::USD))?;
//! contract.bill_call(&call)?;
//! let owed = contract.cancel()?;
//! ```

pub mod bill;
pub mod call;
pub mod contract;
pub mod plans;
pub mod term;
pub mod mtm;
pub mod prepaid;
pub mod error;

pub use bill::{Bill, RatePlan};
pub use call::CallRecord;
pub use contract::{Contract, ContractStatus};
pub use plans::{TermConfig, MtmConfig, PrepaidConfig};
pub use term::TermPlan;
pub use mtm::MtmPlan;
pub use prepaid::PrepaidPlan;
pub use error::ContractError;
