// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use flexirota_domain::DomainError;

/// Errors that can occur while planning assignments or advancing swaps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Not enough eligible employees exist to fill a role requirement.
    InsufficientCandidates {
        /// The unmet role.
        role_id: i64,
        /// The display name of the unmet role.
        role_name: String,
        /// The template that could not be staffed.
        template_id: i64,
        /// How many employees the requirement asked for.
        required: u32,
        /// How many eligible employees were left.
        available: usize,
    },
    /// The acting user lacks the relationship the action requires.
    Forbidden {
        /// The attempted action.
        action: String,
        /// Why it was refused.
        reason: String,
    },
    /// The swap request is already approved or rejected.
    SwapAlreadyResolved {
        /// The terminal request.
        request_id: i64,
    },
    /// The shift already has an outstanding swap request.
    SwapAlreadyPending {
        /// The shift in question.
        shift_id: i64,
    },
    /// Inputs handed to the core were inconsistent with each other.
    Internal(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InsufficientCandidates {
                role_name,
                template_id,
                required,
                available,
                ..
            } => {
                write!(
                    f,
                    "Not enough '{role_name}' employees for template {template_id}: \
                     required {required}, available {available}"
                )
            }
            Self::Forbidden { action, reason } => {
                write!(f, "Not permitted to {action}: {reason}")
            }
            Self::SwapAlreadyResolved { request_id } => {
                write!(f, "Swap request {request_id} has already been resolved")
            }
            Self::SwapAlreadyPending { shift_id } => {
                write!(f, "Shift {shift_id} already has a pending swap request")
            }
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
