// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use flexirota_domain::User;
use flexirota_persistence::Persistence;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::{
    CreateOrganisationRequest, CreateRoleRequest, CreateShiftRequest, CreateShiftTemplateRequest,
    OrganisationInfo, RegisterUserRequest, RequirementRequest, RoleInfo, ShiftInfo,
    ShiftTemplateInfo, UpdateUserRequest, UserInfo, create_organisation, create_role,
    create_shift, create_shift_template, register_user, update_user,
};

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-01-05 08:00 UTC)
}

/// 09:00 on the given day of January 2026.
pub fn create_test_morning(day: u8) -> OffsetDateTime {
    datetime!(2026-01-01 09:00 UTC).replace_day(day).unwrap()
}

pub fn register(persistence: &mut Persistence, username: &str, role: &str) -> User {
    let info: UserInfo = register_user(
        persistence,
        &RegisterUserRequest {
            username: String::from(username),
            name: format!("{username} full name"),
            email: None,
            phone_number: None,
            role: String::from(role),
        },
    )
    .unwrap();
    persistence.get_user(info.user_id).unwrap()
}

pub fn reload(persistence: &mut Persistence, user: &User) -> User {
    persistence.get_user(user.user_id.unwrap()).unwrap()
}

/// An organisation with a manager, a Server and a Cook role, and any
/// number of employees added later.
pub struct World {
    pub persistence: Persistence,
    pub organisation_id: i64,
    pub manager: User,
    pub server: RoleInfo,
    pub cook: RoleInfo,
}

impl World {
    pub fn create() -> Self {
        Self::with_persistence(Persistence::new_in_memory().unwrap())
    }

    pub fn with_persistence(mut persistence: Persistence) -> Self {
        let manager: User = register(&mut persistence, "manager", "manager");
        let organisation: OrganisationInfo = create_organisation(
            &mut persistence,
            &manager,
            &CreateOrganisationRequest {
                name: String::from("Harbour Cafe"),
            },
            create_test_now(),
        )
        .unwrap();
        let manager: User = reload(&mut persistence, &manager);
        let server: RoleInfo = create_role(
            &mut persistence,
            &manager,
            &CreateRoleRequest {
                name: String::from("Server"),
            },
        )
        .unwrap();
        let cook: RoleInfo = create_role(
            &mut persistence,
            &manager,
            &CreateRoleRequest {
                name: String::from("Cook"),
            },
        )
        .unwrap();

        Self {
            persistence,
            organisation_id: organisation.organisation_id,
            manager,
            server,
            cook,
        }
    }

    pub fn manager_id(&self) -> i64 {
        self.manager.user_id.unwrap()
    }

    /// Registers an employee and adopts them into the organisation.
    pub fn hire(&mut self, username: &str, role: &RoleInfo) -> User {
        let employee: User = register(&mut self.persistence, username, "employee");
        update_user(
            &mut self.persistence,
            &self.manager,
            employee.user_id.unwrap(),
            &UpdateUserRequest {
                organisation_id: Some(self.organisation_id),
                role_title_id: Some(role.role_id),
                ..UpdateUserRequest::default()
            },
        )
        .unwrap();
        reload(&mut self.persistence, &employee)
    }

    pub fn template(&mut self, day: u8, requirements: &[(&RoleInfo, u32)]) -> ShiftTemplateInfo {
        let start: OffsetDateTime = create_test_morning(day);
        create_shift_template(
            &mut self.persistence,
            &self.manager,
            &CreateShiftTemplateRequest {
                start_time: start,
                end_time: start + Duration::hours(8),
                requirements: requirements
                    .iter()
                    .map(|(role, quantity)| RequirementRequest {
                        role_id: role.role_id,
                        quantity: *quantity,
                    })
                    .collect(),
            },
        )
        .unwrap()
    }

    /// Creates a shift of `hours` starting at 08:00 on `day` of January 2026.
    pub fn shift(&mut self, employee: &User, day: u8, hours: i64) -> ShiftInfo {
        let start: OffsetDateTime = datetime!(2026-01-01 08:00 UTC).replace_day(day).unwrap();
        create_shift(
            &mut self.persistence,
            &self.manager,
            &CreateShiftRequest {
                employee_id: employee.user_id.unwrap(),
                start_time: start,
                end_time: start + Duration::hours(hours),
            },
        )
        .unwrap()
    }
}
