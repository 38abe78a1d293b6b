// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidName(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid name: test");

    let err: DomainError = DomainError::InvalidUserRole(String::from("admin"));
    assert_eq!(
        format!("{err}"),
        "Invalid user role: 'admin'. Must be 'manager' or 'employee'"
    );

    let err: DomainError = DomainError::InvalidQuantity {
        role_id: 4,
        quantity: 0,
    };
    assert_eq!(
        format!("{err}"),
        "Invalid quantity 0 for role 4: must be greater than 0"
    );

    let err: DomainError = DomainError::DuplicateRequirement { role_id: 4 };
    assert_eq!(
        format!("{err}"),
        "Role 4 is listed more than once on the template"
    );

    let err: DomainError = DomainError::SelfSwap { user_id: 9 };
    assert_eq!(format!("{err}"), "User 9 cannot swap a shift with themself");

    let err: DomainError = DomainError::CrossOrganisation {
        user_id: 9,
        organisation_id: 2,
    };
    assert_eq!(format!("{err}"), "User 9 does not belong to organisation 2");

    let err: DomainError = DomainError::MissingIdentifier { entity: "Shift" };
    assert_eq!(
        format!("{err}"),
        "Shift has not been persisted and has no identifier"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::EmptyRequirements);
    assert_eq!(
        err.to_string(),
        "Shift template must require at least one role"
    );
}
