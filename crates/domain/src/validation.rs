// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::schedule::{RoleRequirement, ShiftTemplate};
use crate::types::User;
use std::collections::HashSet;

/// Validates a display name for an organisation, role, or user.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or only whitespace.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a username.
///
/// # Errors
///
/// Returns `DomainError::InvalidUsername` if the username is empty or
/// contains whitespace.
pub fn validate_username(username: &str) -> Result<(), DomainError> {
    if username.is_empty() {
        return Err(DomainError::InvalidUsername(String::from(
            "Username cannot be empty",
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidUsername(format!(
            "Username '{username}' cannot contain whitespace"
        )));
    }
    Ok(())
}

/// Validates that a user's basic field constraints are met.
///
/// This does NOT check username uniqueness (that requires context).
///
/// # Errors
///
/// Returns an error if:
/// - The username is empty or contains whitespace
/// - The name is empty
pub fn validate_user_fields(user: &User) -> Result<(), DomainError> {
    validate_username(&user.username)?;
    validate_name(&user.name)?;
    Ok(())
}

/// Validates the requirement list of a shift template.
///
/// # Errors
///
/// Returns an error if:
/// - The list is empty
/// - Any quantity is zero
/// - The same role appears twice
pub fn validate_requirements(requirements: &[RoleRequirement]) -> Result<(), DomainError> {
    if requirements.is_empty() {
        return Err(DomainError::EmptyRequirements);
    }

    let mut seen: HashSet<i64> = HashSet::new();
    for requirement in requirements {
        if requirement.quantity == 0 {
            return Err(DomainError::InvalidQuantity {
                role_id: requirement.role_id,
                quantity: requirement.quantity,
            });
        }
        if !seen.insert(requirement.role_id) {
            return Err(DomainError::DuplicateRequirement {
                role_id: requirement.role_id,
            });
        }
    }
    Ok(())
}

/// Validates a shift template before it is stored.
///
/// The time range is already valid by construction.
///
/// # Errors
///
/// Propagates any error from [`validate_requirements`].
pub fn validate_shift_template(template: &ShiftTemplate) -> Result<(), DomainError> {
    validate_requirements(&template.requirements)
}
