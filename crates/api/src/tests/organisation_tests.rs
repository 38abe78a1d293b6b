// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for organisation, role and user handlers.

use flexirota_domain::User;

use super::helpers::{World, create_test_now, register, reload};
use crate::error::ApiError;
use crate::{
    CreateOrganisationRequest, CreateRoleRequest, ListUsersResponse, RegisterUserRequest,
    UpdateUserRequest, UserInfo, create_organisation, create_role, get_user, list_roles,
    list_users, register_user, update_user,
};

#[test]
fn test_creating_organisation_adopts_the_manager() {
    let world: World = World::create();

    assert_eq!(world.manager.organisation_id, Some(world.organisation_id));
}

#[test]
fn test_employee_cannot_create_organisation() {
    let mut world: World = World::create();
    let employee: User = register(&mut world.persistence, "eve", "employee");

    let result = create_organisation(
        &mut world.persistence,
        &employee,
        &CreateOrganisationRequest {
            name: String::from("Elsewhere"),
        },
        create_test_now(),
    );

    match result.unwrap_err() {
        ApiError::Forbidden { action, .. } => assert_eq!(action, "create_organisation"),
        other => panic!("Expected Forbidden error, got: {other:?}"),
    }
}

#[test]
fn test_manager_cannot_create_a_second_organisation() {
    let mut world: World = World::create();
    let manager: User = world.manager.clone();

    let result = create_organisation(
        &mut world.persistence,
        &manager,
        &CreateOrganisationRequest {
            name: String::from("Second"),
        },
        create_test_now(),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "single_organisation"
    ));
}

#[test]
fn test_blank_organisation_name_is_invalid() {
    let mut world: World = World::create();
    let other_manager: User = register(&mut world.persistence, "boss", "manager");

    let result = create_organisation(
        &mut world.persistence,
        &other_manager,
        &CreateOrganisationRequest {
            name: String::from("   "),
        },
        create_test_now(),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "name"));
}

#[test]
fn test_duplicate_role_is_a_rule_violation() {
    let mut world: World = World::create();
    let manager: User = world.manager.clone();

    let result = create_role(
        &mut world.persistence,
        &manager,
        &CreateRoleRequest {
            name: String::from("Server"),
        },
    );

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_roles_are_listed_for_members_only() {
    let mut world: World = World::create();
    let manager: User = world.manager.clone();
    let outsider: User = register(&mut world.persistence, "outsider", "employee");

    let names: Vec<String> = list_roles(&mut world.persistence, &manager)
        .unwrap()
        .roles
        .into_iter()
        .map(|r| r.name)
        .collect();

    assert_eq!(names, vec![String::from("Cook"), String::from("Server")]);
    assert!(matches!(
        list_roles(&mut world.persistence, &outsider),
        Err(ApiError::Forbidden { .. })
    ));
}

#[test]
fn test_register_user_rejects_unknown_role() {
    let mut world: World = World::create();

    let result = register_user(
        &mut world.persistence,
        &RegisterUserRequest {
            username: String::from("admin"),
            name: String::from("Admin"),
            email: None,
            phone_number: None,
            role: String::from("admin"),
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "role"));
}

#[test]
fn test_register_user_rejects_taken_username() {
    let mut world: World = World::create();

    let result = register_user(
        &mut world.persistence,
        &RegisterUserRequest {
            username: String::from("manager"),
            name: String::from("Impostor"),
            email: None,
            phone_number: None,
            role: String::from("employee"),
        },
    );

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_hired_employee_has_organisation_and_role_title() {
    let mut world: World = World::create();
    let server_id: i64 = world.server.role_id;

    let alice: User = world.hire("alice", &world.server.clone());

    assert_eq!(alice.organisation_id, Some(world.organisation_id));
    assert_eq!(alice.role_title_id, Some(server_id));
}

#[test]
fn test_manager_sets_pay_rate() {
    let mut world: World = World::create();
    let alice: User = world.hire("alice", &world.server.clone());
    let manager: User = world.manager.clone();

    let info: UserInfo = update_user(
        &mut world.persistence,
        &manager,
        alice.user_id.unwrap(),
        &UpdateUserRequest {
            pay_rate_cents: Some(1_950),
            ..UpdateUserRequest::default()
        },
    )
    .unwrap();

    assert_eq!(info.pay_rate_cents, Some(1_950));
    assert_eq!(reload(&mut world.persistence, &alice).pay_rate_cents, Some(1_950));
}

#[test]
fn test_employee_cannot_set_own_pay_rate() {
    let mut world: World = World::create();
    let alice: User = world.hire("alice", &world.server.clone());

    let result = update_user(
        &mut world.persistence,
        &alice,
        alice.user_id.unwrap(),
        &UpdateUserRequest {
            pay_rate_cents: Some(100_000),
            ..UpdateUserRequest::default()
        },
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_user_updates_own_contact_details_only() {
    let mut world: World = World::create();
    let alice: User = world.hire("alice", &world.server.clone());
    let bob: User = world.hire("bob", &world.server.clone());
    let request: UpdateUserRequest = UpdateUserRequest {
        phone_number: Some(String::from("555-0100")),
        ..UpdateUserRequest::default()
    };

    let own: UserInfo =
        update_user(&mut world.persistence, &alice, alice.user_id.unwrap(), &request).unwrap();
    let other = update_user(&mut world.persistence, &alice, bob.user_id.unwrap(), &request);

    assert_eq!(own.phone_number.as_deref(), Some("555-0100"));
    assert!(matches!(other, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_manager_cannot_poach_from_another_organisation() {
    let mut world: World = World::create();
    let alice: User = world.hire("alice", &world.server.clone());
    let rival: User = register(&mut world.persistence, "rival", "manager");
    create_organisation(
        &mut world.persistence,
        &rival,
        &CreateOrganisationRequest {
            name: String::from("Rival Diner"),
        },
        create_test_now(),
    )
    .unwrap();
    let rival: User = reload(&mut world.persistence, &rival);

    let result = update_user(
        &mut world.persistence,
        &rival,
        alice.user_id.unwrap(),
        &UpdateUserRequest {
            organisation_id: rival.organisation_id,
            ..UpdateUserRequest::default()
        },
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_role_title_must_belong_to_the_organisation() {
    let mut world: World = World::create();
    let alice: User = world.hire("alice", &world.server.clone());
    let rival: User = register(&mut world.persistence, "rival", "manager");
    create_organisation(
        &mut world.persistence,
        &rival,
        &CreateOrganisationRequest {
            name: String::from("Rival Diner"),
        },
        create_test_now(),
    )
    .unwrap();
    let rival: User = reload(&mut world.persistence, &rival);
    let foreign_role_id: i64 = create_role(
        &mut world.persistence,
        &rival,
        &CreateRoleRequest {
            name: String::from("Barista"),
        },
    )
    .unwrap()
    .role_id;
    let manager: User = world.manager.clone();

    let result = update_user(
        &mut world.persistence,
        &manager,
        alice.user_id.unwrap(),
        &UpdateUserRequest {
            role_title_id: Some(foreign_role_id),
            ..UpdateUserRequest::default()
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "role_title_id"
    ));
}

#[test]
fn test_users_are_visible_within_the_organisation() {
    let mut world: World = World::create();
    let alice: User = world.hire("alice", &world.server.clone());
    let outsider: User = register(&mut world.persistence, "outsider", "employee");

    let manager_id: i64 = world.manager_id();

    let listed: ListUsersResponse = list_users(&mut world.persistence, &alice).unwrap();
    assert_eq!(listed.users.len(), 2);

    assert!(get_user(&mut world.persistence, &alice, manager_id).is_ok());
    assert!(get_user(&mut world.persistence, &outsider, outsider.user_id.unwrap()).is_ok());
    assert!(matches!(
        get_user(&mut world.persistence, &outsider, manager_id),
        Err(ApiError::Forbidden { .. })
    ));
    assert!(matches!(
        get_user(&mut world.persistence, &alice, 999),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
