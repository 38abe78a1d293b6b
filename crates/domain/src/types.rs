// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The coarse role of a user.
///
/// Managers own shift templates and approve swaps. Employees are the
/// only users the assignment engine will place on a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Owns an organisation's schedule.
    Manager,
    /// Works shifts.
    #[default]
    Employee,
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(DomainError::InvalidUserRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl UserRole {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

/// A tenant that owns roles, users and schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organisation {
    /// `None` until the organisation has been persisted.
    organisation_id: Option<i64>,
    name: String,
    #[serde(with = "time::serde::rfc3339")]
    created_at: OffsetDateTime,
}

impl Organisation {
    /// Creates a new `Organisation` without a persisted ID.
    #[must_use]
    pub const fn new(name: String, created_at: OffsetDateTime) -> Self {
        Self {
            organisation_id: None,
            name,
            created_at,
        }
    }

    /// Creates an `Organisation` with an existing ID (from persistence).
    #[must_use]
    pub const fn with_id(organisation_id: i64, name: String, created_at: OffsetDateTime) -> Self {
        Self {
            organisation_id: Some(organisation_id),
            name,
            created_at,
        }
    }

    #[must_use]
    pub const fn organisation_id(&self) -> Option<i64> {
        self.organisation_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// A job title within an organisation, such as "Chef" or "Waiter".
///
/// Role names are unique within their organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    role_id: Option<i64>,
    organisation_id: i64,
    name: String,
}

impl Role {
    /// Creates a new `Role` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `organisation_id` - The organisation the role belongs to
    /// * `name` - The display name of the role
    #[must_use]
    pub const fn new(organisation_id: i64, name: String) -> Self {
        Self {
            role_id: None,
            organisation_id,
            name,
        }
    }

    /// Creates a `Role` with an existing ID (from persistence).
    #[must_use]
    pub const fn with_id(role_id: i64, organisation_id: i64, name: String) -> Self {
        Self {
            role_id: Some(role_id),
            organisation_id,
            name,
        }
    }

    #[must_use]
    pub const fn role_id(&self) -> Option<i64> {
        self.role_id
    }

    #[must_use]
    pub const fn organisation_id(&self) -> i64 {
        self.organisation_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A person in the system, either a manager or an employee.
///
/// `user_id` is the canonical identifier. `role_title_id` is only
/// meaningful for employees and names the `Role` they can fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Optional to support creation before persistence.
    pub user_id: Option<i64>,
    /// Unique across the whole system.
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub role: UserRole,
    /// The job title an employee can be assigned to.
    pub role_title_id: Option<i64>,
    /// Hourly pay in minor currency units.
    pub pay_rate_cents: Option<u32>,
    pub organisation_id: Option<i64>,
}

impl User {
    /// Creates a new `User` without a persisted `user_id`.
    ///
    /// Contact details, job title, pay rate and organisation start unset.
    ///
    /// # Arguments
    ///
    /// * `username` - The unique login name
    /// * `name` - The user's display name
    /// * `role` - Manager or employee
    #[must_use]
    pub const fn new(username: String, name: String, role: UserRole) -> Self {
        Self {
            user_id: None,
            username,
            name,
            email: None,
            phone_number: None,
            role,
            role_title_id: None,
            pay_rate_cents: None,
            organisation_id: None,
        }
    }

    /// Returns this user with the given persisted ID.
    #[must_use]
    pub const fn with_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    #[must_use]
    pub const fn is_manager(&self) -> bool {
        matches!(self.role, UserRole::Manager)
    }

    #[must_use]
    pub const fn is_employee(&self) -> bool {
        matches!(self.role, UserRole::Employee)
    }

    /// Returns the persisted ID.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingIdentifier` if the user has not been saved.
    pub const fn id(&self) -> Result<i64, DomainError> {
        match self.user_id {
            Some(user_id) => Ok(user_id),
            None => Err(DomainError::MissingIdentifier { entity: "User" }),
        }
    }

    /// Whether this user can fill `role_id` for a manager in `organisation_id`.
    ///
    /// Only employees of the same organisation holding exactly that job title qualify.
    #[must_use]
    pub fn can_fill(&self, role_id: i64, organisation_id: i64) -> bool {
        self.is_employee()
            && self.role_title_id == Some(role_id)
            && self.organisation_id == Some(organisation_id)
    }
}
