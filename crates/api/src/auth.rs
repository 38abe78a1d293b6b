// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization services.
//!
//! Identity is asserted by the caller; this module only resolves the
//! asserted user id and checks the relationships each action needs.

use flexirota_domain::{Shift, ShiftTemplate, User};
use flexirota_persistence::{Persistence, PersistenceError};
use tracing::warn;

use crate::error::AuthError;

/// Resolves asserted user ids to stored users.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Loads the acting user.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `user_id` - The id the caller claims to act as
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if no such user exists or
    /// the lookup fails.
    pub fn authenticate(persistence: &mut Persistence, user_id: i64) -> Result<User, AuthError> {
        persistence.get_user(user_id).map_err(|e| match e {
            PersistenceError::NotFound(_) => {
                warn!(user_id, "Unknown acting user");
                AuthError::AuthenticationFailed {
                    reason: format!("Unknown user {user_id}"),
                }
            }
            other => AuthError::AuthenticationFailed {
                reason: other.to_string(),
            },
        })
    }
}

/// Authorization service for enforcing relationship-based access control.
pub struct AuthorizationService;

fn forbidden(action: &str, reason: impl Into<String>) -> AuthError {
    AuthError::Forbidden {
        action: action.to_string(),
        reason: reason.into(),
    }
}

impl AuthorizationService {
    /// Requires the actor to belong to an organisation.
    ///
    /// Returns the organisation id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` if the actor has no organisation.
    pub fn require_organisation(actor: &User, action: &str) -> Result<i64, AuthError> {
        actor
            .organisation_id
            .ok_or_else(|| forbidden(action, "you do not belong to an organisation"))
    }

    /// Requires the actor to be a manager of an organisation.
    ///
    /// Returns the organisation id.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` if the actor is not a manager or has
    /// no organisation.
    pub fn require_manager(actor: &User, action: &str) -> Result<i64, AuthError> {
        if !actor.is_manager() {
            return Err(forbidden(action, "only managers may do this"));
        }
        Self::require_organisation(actor, action)
    }

    /// Requires the actor and `target` to share an organisation, or the
    /// target to be the actor.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` otherwise.
    pub fn require_visible(actor: &User, target: &User, action: &str) -> Result<(), AuthError> {
        if actor.user_id.is_some() && actor.user_id == target.user_id {
            return Ok(());
        }
        let organisation_id: i64 = Self::require_organisation(actor, action)?;
        if target.organisation_id == Some(organisation_id) {
            Ok(())
        } else {
            Err(forbidden(action, "the user is not in your organisation"))
        }
    }

    /// Requires the actor to be the manager who owns `shift`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` otherwise.
    pub fn require_shift_manager(
        actor: &User,
        shift: &Shift,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.user_id == Some(shift.manager_id) {
            Ok(())
        } else {
            Err(forbidden(action, "you do not manage this shift"))
        }
    }

    /// Requires the actor to be the manager who owns `template`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` otherwise.
    pub fn require_template_owner(
        actor: &User,
        template: &ShiftTemplate,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.user_id == Some(template.manager_id) {
            Ok(())
        } else {
            Err(forbidden(action, "you do not own this template"))
        }
    }

    /// Requires the actor to be `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` otherwise.
    pub fn require_self(actor: &User, owner_id: i64, action: &str) -> Result<(), AuthError> {
        if actor.user_id == Some(owner_id) {
            Ok(())
        } else {
            Err(forbidden(action, "this record belongs to another user"))
        }
    }
}
