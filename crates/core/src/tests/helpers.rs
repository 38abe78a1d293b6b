// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flexirota_domain::{
    RoleRequirement, Shift, ShiftSwapRequest, ShiftTemplate, TimeRange, User, UserRole,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const ORG_ID: i64 = 1;
pub const MANAGER_ID: i64 = 100;
pub const SERVER_ROLE: i64 = 10;
pub const COOK_ROLE: i64 = 11;

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-01-05 08:00 UTC)
}

/// 09:00 to 17:00 on the given day of January 2026.
pub fn create_test_day_range(day: u8) -> TimeRange {
    let start: OffsetDateTime = datetime!(2026-01-01 09:00 UTC)
        .replace_day(day)
        .unwrap();
    TimeRange::new(start, start + time::Duration::hours(8)).unwrap()
}

pub fn create_test_employee(user_id: i64, role_id: i64) -> User {
    let mut user: User = User::new(
        format!("employee{user_id}"),
        format!("Employee {user_id}"),
        UserRole::Employee,
    )
    .with_id(user_id);
    user.role_title_id = Some(role_id);
    user.organisation_id = Some(ORG_ID);
    user
}

pub fn create_test_template(
    template_id: i64,
    day: u8,
    requirements: &[(i64, &str, u32)],
) -> ShiftTemplate {
    let mut template: ShiftTemplate = ShiftTemplate::new(
        MANAGER_ID,
        create_test_day_range(day),
        requirements
            .iter()
            .enumerate()
            .map(|(index, (role_id, name, quantity))| {
                let mut requirement: RoleRequirement =
                    RoleRequirement::new(*role_id, String::from(*name), *quantity);
                requirement.requirement_id = Some(i64::try_from(index).unwrap() + 1);
                requirement
            })
            .collect(),
    );
    template.template_id = Some(template_id);
    template
}

pub const EMPLOYEE_A: i64 = 1;
pub const EMPLOYEE_B: i64 = 2;

pub fn create_test_shift() -> Shift {
    let mut shift: Shift = Shift::new(EMPLOYEE_A, MANAGER_ID, create_test_day_range(6));
    shift.shift_id = Some(50);
    shift
}

pub fn create_test_request(shift: &Shift) -> ShiftSwapRequest {
    let mut request: ShiftSwapRequest = ShiftSwapRequest::new(
        shift.shift_id.unwrap(),
        EMPLOYEE_A,
        EMPLOYEE_B,
        Some(String::from("Dentist")),
        create_test_now(),
    );
    request.request_id = Some(7);
    request
}
