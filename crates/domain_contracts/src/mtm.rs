//! Month-to-month contract rating
//!
//! No commitment, no deposit, no free minutes; a flat monthly fee and a
//! higher per-minute rate on every call.

use serde::{Deserialize, Serialize};

use crate::bill::{Bill, RatePlan};
use crate::error::ContractError;
use crate::plans::MtmConfig;

/// Rating state for a month-to-month contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MtmPlan {
    config: MtmConfig,
}

impl MtmPlan {
    /// Creates rating state from the plan configuration
    pub fn new(config: MtmConfig) -> Self {
        Self { config }
    }

    /// Configures the bill for a new month: rate plus the flat fee
    pub fn open_month(&self, bill: &mut Bill) -> Result<(), ContractError> {
        bill.set_rates(RatePlan::Mtm, self.config.rate)?;
        bill.add_fixed_cost(self.config.monthly_fee)?;
        Ok(())
    }
}
