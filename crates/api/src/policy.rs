// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tunables for auto-assignment and swap approval.

use thiserror::Error;
use time::Duration;

/// The longest workload lookback accepted.
pub const MAX_WORKLOAD_WINDOW_DAYS: u32 = 366;

/// The most conflict retries accepted.
pub const MAX_CONFLICT_RETRIES: u32 = 10;

/// Assignment policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    /// The workload window is empty.
    #[error("Workload window must be at least one day")]
    EmptyWorkloadWindow,

    /// The workload window is longer than allowed.
    #[error("Workload window must not exceed {max_days} days (got {days})")]
    WorkloadWindowTooLong { days: u32, max_days: u32 },

    /// Too many conflict retries were requested.
    #[error("Conflict retries must not exceed {max} (got {retries})")]
    TooManyRetries { retries: u32, max: u32 },
}

/// Assignment policy configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentPolicy {
    /// How many days of past shifts count towards an employee's workload.
    pub workload_window_days: u32,
    /// How often an approval or rejection is retried after losing a race.
    pub max_conflict_retries: u32,
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            workload_window_days: 28,
            max_conflict_retries: 3,
        }
    }
}

impl AssignmentPolicy {
    /// Validates the policy.
    ///
    /// # Errors
    ///
    /// Returns a `PolicyError` if either value is out of range.
    pub const fn validate(&self) -> Result<(), PolicyError> {
        if self.workload_window_days == 0 {
            return Err(PolicyError::EmptyWorkloadWindow);
        }

        if self.workload_window_days > MAX_WORKLOAD_WINDOW_DAYS {
            return Err(PolicyError::WorkloadWindowTooLong {
                days: self.workload_window_days,
                max_days: MAX_WORKLOAD_WINDOW_DAYS,
            });
        }

        if self.max_conflict_retries > MAX_CONFLICT_RETRIES {
            return Err(PolicyError::TooManyRetries {
                retries: self.max_conflict_retries,
                max: MAX_CONFLICT_RETRIES,
            });
        }

        Ok(())
    }

    /// The workload lookback as a duration.
    #[must_use]
    pub fn workload_window(&self) -> Duration {
        Duration::days(i64::from(self.workload_window_days))
    }
}
