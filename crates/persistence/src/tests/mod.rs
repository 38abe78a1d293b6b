// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod availability_tests;

use crate::Persistence;
use flexirota_domain::{
    Organisation, Role, RoleRequirement, Shift, ShiftTemplate, TimeRange, User, UserRole,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// A small organisation with one manager and three servers.
pub struct Fixture {
    pub persistence: Persistence,
    pub organisation_id: i64,
    pub server_role: Role,
    pub manager: User,
    pub employees: Vec<User>,
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-01-05 08:00 UTC)
}

/// 09:00 to 17:00 on the given day of January 2026.
pub fn create_test_day_range(day: u8) -> TimeRange {
    let start: OffsetDateTime = datetime!(2026-01-01 09:00 UTC).replace_day(day).unwrap();
    TimeRange::new(start, start + time::Duration::hours(8)).unwrap()
}

pub fn create_test_user(
    persistence: &mut Persistence,
    username: &str,
    role: UserRole,
    organisation_id: i64,
    role_title_id: Option<i64>,
) -> User {
    let mut user: User = User::new(
        String::from(username),
        format!("{username} full name"),
        role,
    );
    user.organisation_id = Some(organisation_id);
    user.role_title_id = role_title_id;
    persistence.create_user(&user).unwrap()
}

pub fn create_fixture() -> Fixture {
    create_fixture_with(Persistence::new_in_memory().unwrap())
}

pub fn create_fixture_with(mut persistence: Persistence) -> Fixture {
    let organisation: Organisation = persistence
        .create_organisation(&Organisation::new(String::from("Harbour Cafe"), create_test_now()))
        .unwrap();
    let organisation_id: i64 = organisation.organisation_id().unwrap();
    let server_role: Role = persistence
        .create_role(&Role::new(organisation_id, String::from("Server")))
        .unwrap();
    let manager: User = create_test_user(
        &mut persistence,
        "manager",
        UserRole::Manager,
        organisation_id,
        None,
    );
    let employees: Vec<User> = ["alice", "bob", "carol"]
        .iter()
        .map(|name| {
            create_test_user(
                &mut persistence,
                name,
                UserRole::Employee,
                organisation_id,
                server_role.role_id(),
            )
        })
        .collect();

    Fixture {
        persistence,
        organisation_id,
        server_role,
        manager,
        employees,
    }
}

impl Fixture {
    pub fn manager_id(&self) -> i64 {
        self.manager.user_id.unwrap()
    }

    pub fn employee_id(&self, index: usize) -> i64 {
        self.employees[index].user_id.unwrap()
    }

    pub fn create_template(&mut self, day: u8, servers: u32) -> ShiftTemplate {
        let template: ShiftTemplate = ShiftTemplate::new(
            self.manager_id(),
            create_test_day_range(day),
            vec![RoleRequirement::new(
                self.server_role.role_id().unwrap(),
                String::from("Server"),
                servers,
            )],
        );
        self.persistence.create_shift_template(&template).unwrap()
    }

    pub fn create_shift(&mut self, employee_index: usize, day: u8) -> Shift {
        let shift: Shift = Shift::new(
            self.employee_id(employee_index),
            self.manager_id(),
            create_test_day_range(day),
        );
        self.persistence.create_shift(&shift).unwrap()
    }
}
