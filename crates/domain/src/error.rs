// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A time range ends at or before its start.
    InvalidTimeRange {
        /// The proposed start of the range.
        start: OffsetDateTime,
        /// The proposed end of the range.
        end: OffsetDateTime,
    },
    /// An organisation, role, or user name is empty or invalid.
    InvalidName(String),
    /// A username is empty or invalid.
    InvalidUsername(String),
    /// A coarse user role string is not recognised.
    InvalidUserRole(String),
    /// A role requirement asks for zero staff.
    InvalidQuantity {
        /// The role the requirement refers to.
        role_id: i64,
        /// The rejected quantity.
        quantity: u32,
    },
    /// A shift template carries no role requirements.
    EmptyRequirements,
    /// A shift template lists the same role more than once.
    DuplicateRequirement {
        /// The repeated role.
        role_id: i64,
    },
    /// The user is expected to be an employee.
    NotAnEmployee {
        /// The offending user.
        user_id: i64,
    },
    /// The user is expected to be a manager.
    NotAManager {
        /// The offending user.
        user_id: i64,
    },
    /// The user does not belong to any organisation.
    MissingOrganisation {
        /// The offending user.
        user_id: i64,
    },
    /// An entity was used before it was persisted.
    MissingIdentifier {
        /// The kind of entity lacking an identifier.
        entity: &'static str,
    },
    /// A swap was requested from an employee to themself.
    SelfSwap {
        /// The employee on both sides of the swap.
        user_id: i64,
    },
    /// A user is outside the organisation the operation is scoped to.
    CrossOrganisation {
        /// The user outside the organisation.
        user_id: i64,
        /// The organisation the operation is scoped to.
        organisation_id: i64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeRange { start, end } => {
                write!(f, "Invalid time range: end {end} must be after start {start}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::InvalidUserRole(role) => {
                write!(
                    f,
                    "Invalid user role: '{role}'. Must be 'manager' or 'employee'"
                )
            }
            Self::InvalidQuantity { role_id, quantity } => {
                write!(
                    f,
                    "Invalid quantity {quantity} for role {role_id}: must be greater than 0"
                )
            }
            Self::EmptyRequirements => {
                write!(f, "Shift template must require at least one role")
            }
            Self::DuplicateRequirement { role_id } => {
                write!(f, "Role {role_id} is listed more than once on the template")
            }
            Self::NotAnEmployee { user_id } => write!(f, "User {user_id} is not an employee"),
            Self::NotAManager { user_id } => write!(f, "User {user_id} is not a manager"),
            Self::MissingOrganisation { user_id } => {
                write!(f, "User {user_id} does not belong to an organisation")
            }
            Self::MissingIdentifier { entity } => {
                write!(f, "{entity} has not been persisted and has no identifier")
            }
            Self::SelfSwap { user_id } => {
                write!(f, "User {user_id} cannot swap a shift with themself")
            }
            Self::CrossOrganisation {
                user_id,
                organisation_id,
            } => {
                write!(
                    f,
                    "User {user_id} does not belong to organisation {organisation_id}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
