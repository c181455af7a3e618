//! Core Kernel - Foundational types and utilities for the billing system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Billing-month temporal types for month-by-month rating
//! - Common identifiers and value objects

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError, PerMinuteRate};
pub use temporal::{BillingMonth, TemporalError};
pub use identifiers::{LineId, ContractId, BillId, CallId};
pub use error::CoreError;
