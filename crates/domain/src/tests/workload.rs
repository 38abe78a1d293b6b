// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DEFAULT_WORKLOAD_WINDOW, Shift, TimeRange, User, UserRole, compute_workloads, workload};
use std::collections::HashMap;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

fn create_test_shift(employee_id: i64, start: OffsetDateTime, hours: i64) -> Shift {
    Shift::new(
        employee_id,
        100,
        TimeRange::new(start, start + Duration::hours(hours)).unwrap(),
    )
}

fn create_test_employee(user_id: i64) -> User {
    User::new(
        format!("employee{user_id}"),
        format!("Employee {user_id}"),
        UserRole::Employee,
    )
    .with_id(user_id)
}

#[test]
fn test_workload_sums_shifts_in_window() {
    let as_of: OffsetDateTime = datetime!(2026-02-01 00:00 UTC);
    let shifts: Vec<Shift> = vec![
        create_test_shift(1, datetime!(2026-01-20 09:00 UTC), 8),
        create_test_shift(1, datetime!(2026-01-25 09:00 UTC), 4),
        create_test_shift(2, datetime!(2026-01-25 09:00 UTC), 6),
    ];

    assert_eq!(
        workload(1, &shifts, as_of, DEFAULT_WORKLOAD_WINDOW),
        Duration::hours(12)
    );
    assert_eq!(
        workload(2, &shifts, as_of, DEFAULT_WORKLOAD_WINDOW),
        Duration::hours(6)
    );
}

#[test]
fn test_workload_excludes_shifts_outside_window() {
    let as_of: OffsetDateTime = datetime!(2026-02-01 00:00 UTC);
    let shifts: Vec<Shift> = vec![
        // Older than 28 days.
        create_test_shift(1, datetime!(2025-12-01 09:00 UTC), 8),
        // Starts after the evaluation instant.
        create_test_shift(1, datetime!(2026-02-02 09:00 UTC), 8),
        create_test_shift(1, datetime!(2026-01-31 09:00 UTC), 3),
    ];

    assert_eq!(
        workload(1, &shifts, as_of, DEFAULT_WORKLOAD_WINDOW),
        Duration::hours(3)
    );
}

#[test]
fn test_workload_window_boundaries_are_inclusive() {
    let as_of: OffsetDateTime = datetime!(2026-02-01 00:00 UTC);
    let window: Duration = Duration::days(1);
    let shifts: Vec<Shift> = vec![
        create_test_shift(1, datetime!(2026-01-31 00:00 UTC), 2),
        create_test_shift(1, datetime!(2026-02-01 00:00 UTC), 1),
    ];

    assert_eq!(workload(1, &shifts, as_of, window), Duration::hours(3));
}

#[test]
fn test_compute_workloads_includes_idle_employees() {
    let as_of: OffsetDateTime = datetime!(2026-02-01 00:00 UTC);
    let employees: Vec<User> = vec![create_test_employee(1), create_test_employee(2)];
    let shifts: Vec<Shift> = vec![
        create_test_shift(1, datetime!(2026-01-30 09:00 UTC), 8),
        // Not one of the listed employees.
        create_test_shift(3, datetime!(2026-01-30 09:00 UTC), 8),
    ];

    let workloads: HashMap<i64, Duration> =
        compute_workloads(&employees, &shifts, as_of, DEFAULT_WORKLOAD_WINDOW);

    assert_eq!(workloads.len(), 2);
    assert_eq!(workloads.get(&1), Some(&Duration::hours(8)));
    assert_eq!(workloads.get(&2), Some(&Duration::ZERO));
    assert!(!workloads.contains_key(&3));
}
