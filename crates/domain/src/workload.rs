// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recent workload, the fairness signal for auto-assignment.
//!
//! An employee's workload is the total duration of their shifts that
//! started within a trailing window ending at the evaluation instant.

use crate::schedule::Shift;
use crate::types::User;
use std::collections::HashMap;
use time::{Duration, OffsetDateTime};

/// The trailing window used when no policy overrides it.
pub const DEFAULT_WORKLOAD_WINDOW: Duration = Duration::days(28);

fn in_window(shift: &Shift, window_start: Option<OffsetDateTime>, as_of: OffsetDateTime) -> bool {
    let start: OffsetDateTime = shift.time_range.start();
    // An overflowing window start means the window reaches back to the beginning of time.
    window_start.is_none_or(|ws| start >= ws) && start <= as_of
}

/// Sums the durations of `employee_id`'s shifts starting in `[as_of - window, as_of]`.
#[must_use]
pub fn workload(
    employee_id: i64,
    shifts: &[Shift],
    as_of: OffsetDateTime,
    window: Duration,
) -> Duration {
    let window_start: Option<OffsetDateTime> = as_of.checked_sub(window);
    shifts
        .iter()
        .filter(|s| s.employee_id == employee_id && in_window(s, window_start, as_of))
        .map(|s| s.time_range.duration())
        .fold(Duration::ZERO, |acc, d| acc + d)
}

/// Computes the workload of every persisted employee in `employees`.
///
/// Employees with no shifts in the window map to `Duration::ZERO`.
/// Users without an ID are skipped.
#[must_use]
pub fn compute_workloads(
    employees: &[User],
    shifts: &[Shift],
    as_of: OffsetDateTime,
    window: Duration,
) -> HashMap<i64, Duration> {
    let window_start: Option<OffsetDateTime> = as_of.checked_sub(window);
    let mut workloads: HashMap<i64, Duration> = employees
        .iter()
        .filter_map(|u| u.user_id)
        .map(|id| (id, Duration::ZERO))
        .collect();

    for shift in shifts {
        if !in_window(shift, window_start, as_of) {
            continue;
        }
        if let Some(total) = workloads.get_mut(&shift.employee_id) {
            *total += shift.time_range.duration();
        }
    }

    workloads
}
