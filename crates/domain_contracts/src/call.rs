//! Call records consumed by contract billing
//!
//! Parsing and loading of call datasets is the driver's job; the domain
//! only sees the finished record and converts its duration to whole
//! billable minutes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::CallId;

use crate::error::ContractError;

/// A single call made or received on a phone line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    /// Unique identifier
    pub id: CallId,
    /// Originating phone number
    pub src_number: String,
    /// Destination phone number
    pub dst_number: String,
    /// When the call was placed
    pub placed_at: DateTime<Utc>,
    /// Call duration in seconds
    pub duration_seconds: i64,
}

impl CallRecord {
    /// Creates a new call record
    pub fn new(
        src_number: impl Into<String>,
        dst_number: impl Into<String>,
        placed_at: DateTime<Utc>,
        duration_seconds: i64,
    ) -> Self {
        Self {
            id: CallId::new_v7(),
            src_number: src_number.into(),
            dst_number: dst_number.into(),
            placed_at,
            duration_seconds,
        }
    }

    /// Returns the duration rounded up to whole minutes
    ///
    /// Airtime is billed per started minute. Negative durations are
    /// rejected; the driver is expected never to produce them. Durations
    /// whose minute count does not fit a bill's counter are rejected
    /// rather than truncated.
    pub fn billable_minutes(&self) -> Result<u32, ContractError> {
        if self.duration_seconds < 0 {
            return Err(ContractError::NegativeDuration {
                seconds: self.duration_seconds,
            });
        }
        u32::try_from((self.duration_seconds as u64).div_ceil(60)).map_err(|_| {
            ContractError::DurationTooLong {
                seconds: self.duration_seconds,
            }
        })
    }
}
