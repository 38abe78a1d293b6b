// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::time_range::TimeRange;
use serde::{Deserialize, Serialize};

/// One line of a shift template: how many people of a role are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub requirement_id: Option<i64>,
    pub role_id: i64,
    /// Display name of the role, carried so failures can name it.
    pub role_name: String,
    pub quantity: u32,
}

impl RoleRequirement {
    #[must_use]
    pub const fn new(role_id: i64, role_name: String, quantity: u32) -> Self {
        Self {
            requirement_id: None,
            role_id,
            role_name,
            quantity,
        }
    }
}

/// A manager's request for staff over a time range.
///
/// Templates are consumed by auto-assignment: once every requirement is
/// filled the template is replaced by concrete shifts and deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub template_id: Option<i64>,
    pub manager_id: i64,
    pub time_range: TimeRange,
    pub requirements: Vec<RoleRequirement>,
}

impl ShiftTemplate {
    /// Creates a new `ShiftTemplate` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `manager_id` - The manager who owns the template
    /// * `time_range` - When the staff are needed
    /// * `requirements` - The roles and quantities to fill
    #[must_use]
    pub const fn new(
        manager_id: i64,
        time_range: TimeRange,
        requirements: Vec<RoleRequirement>,
    ) -> Self {
        Self {
            template_id: None,
            manager_id,
            time_range,
            requirements,
        }
    }

    /// Total number of shifts a fully staffed template produces.
    #[must_use]
    pub fn headcount(&self) -> u32 {
        self.requirements.iter().map(|r| r.quantity).sum()
    }
}

/// A concrete assignment of one employee to a time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub shift_id: Option<i64>,
    /// The employee currently working the shift. Reassigned by an approved swap.
    pub employee_id: i64,
    pub manager_id: i64,
    pub time_range: TimeRange,
    /// Set while a swap request for this shift is outstanding.
    pub is_swap_requested: bool,
    /// Set once a swap of this shift has been fully approved.
    pub swap_approved: bool,
}

impl Shift {
    #[must_use]
    pub const fn new(employee_id: i64, manager_id: i64, time_range: TimeRange) -> Self {
        Self {
            shift_id: None,
            employee_id,
            manager_id,
            time_range,
            is_swap_requested: false,
            swap_approved: false,
        }
    }
}

/// A window during which a user has declared they cannot work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub availability_id: Option<i64>,
    pub user_id: i64,
    pub time_range: TimeRange,
}

impl Availability {
    #[must_use]
    pub const fn new(user_id: i64, time_range: TimeRange) -> Self {
        Self {
            availability_id: None,
            user_id,
            time_range,
        }
    }
}
