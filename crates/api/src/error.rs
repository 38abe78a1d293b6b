// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::policy::PolicyError;
use flexirota::CoreError;
use flexirota_domain::DomainError;
use flexirota_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The acting user could not be identified.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The acting user lacks the relationship the action requires.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the actor may not perform it.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden: cannot {action}: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The acting user could not be identified.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The actor does not have the required relationship to the resource.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the actor may not perform it.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// Auto-assign could not staff a role requirement.
    InsufficientCandidates {
        /// The name of the unmet role.
        role: String,
        /// The template that could not be staffed.
        template_id: i64,
        /// A human-readable description of the shortfall.
        message: String,
    },
    /// The resource changed concurrently and the operation gave up.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "unauthenticated",
            Self::Forbidden { .. } => "forbidden",
            Self::DomainRuleViolation { .. } => "domain_rule_violation",
            Self::InvalidInput { .. } => "invalid_input",
            Self::ResourceNotFound { .. } => "not_found",
            Self::InsufficientCandidates { .. } => "insufficient_role",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden: cannot {action}: {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InsufficientCandidates { message, .. } | Self::Conflict { message } => {
                write!(f, "{message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Forbidden { action, reason } => Self::Forbidden { action, reason },
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("policy"),
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidTimeRange { .. } => ApiError::InvalidInput {
            field: String::from("time_range"),
            message,
        },
        DomainError::InvalidName(_) => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        DomainError::InvalidUsername(_) => ApiError::InvalidInput {
            field: String::from("username"),
            message,
        },
        DomainError::InvalidUserRole(_) => ApiError::InvalidInput {
            field: String::from("role"),
            message,
        },
        DomainError::InvalidQuantity { .. } => ApiError::InvalidInput {
            field: String::from("quantity"),
            message,
        },
        DomainError::EmptyRequirements => ApiError::InvalidInput {
            field: String::from("requirements"),
            message,
        },
        DomainError::DuplicateRequirement { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_template_role"),
            message,
        },
        DomainError::NotAnEmployee { .. } => ApiError::DomainRuleViolation {
            rule: String::from("employee_required"),
            message,
        },
        DomainError::NotAManager { .. } => ApiError::DomainRuleViolation {
            rule: String::from("manager_required"),
            message,
        },
        DomainError::MissingOrganisation { .. } => ApiError::DomainRuleViolation {
            rule: String::from("organisation_required"),
            message,
        },
        DomainError::SelfSwap { .. } => ApiError::DomainRuleViolation {
            rule: String::from("distinct_swap_parties"),
            message,
        },
        DomainError::CrossOrganisation { .. } => ApiError::DomainRuleViolation {
            rule: String::from("same_organisation"),
            message,
        },
        DomainError::MissingIdentifier { .. } => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InsufficientCandidates {
            role_name,
            template_id,
            ..
        } => ApiError::InsufficientCandidates {
            role: role_name,
            template_id,
            message,
        },
        CoreError::Forbidden { action, reason } => ApiError::Forbidden { action, reason },
        CoreError::SwapAlreadyResolved { .. } | CoreError::SwapAlreadyPending { .. } => {
            ApiError::Conflict { message }
        }
        CoreError::Internal(msg) => ApiError::Internal { message: msg },
    }
}

/// Translates a persistence error into an API error.
///
/// `resource_type` names what was being looked up, for `NotFound` reporting.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError, resource_type: &str) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message,
        },
        PersistenceError::UniqueViolation(message) => ApiError::DomainRuleViolation {
            rule: String::from("unique"),
            message,
        },
        PersistenceError::Conflict(message) => ApiError::Conflict { message },
        err @ PersistenceError::SwapAlreadyPending { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: format!("Persistence error: {other}"),
        },
    }
}
