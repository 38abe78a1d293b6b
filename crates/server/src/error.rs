// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flexirota_api::ApiError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// The unmet role, for `insufficient_role`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The template that could not be staffed, for `insufficient_role`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response body.
    pub body: ErrorResponse,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

const fn status_for(err: &ApiError) -> StatusCode {
    match err {
        ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
        ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::InvalidInput { .. } | ApiError::InsufficientCandidates { .. } => {
            StatusCode::BAD_REQUEST
        }
        ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::Conflict { .. } => StatusCode::CONFLICT,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = status_for(&err);
        if status.is_server_error() {
            error!(error = %err, "Request failed");
        }
        let (role, template_id): (Option<String>, Option<i64>) = match &err {
            ApiError::InsufficientCandidates {
                role, template_id, ..
            } => (Some(role.clone()), Some(*template_id)),
            _ => (None, None),
        };
        Self {
            status,
            body: ErrorResponse {
                error: err.code().to_string(),
                message: err.to_string(),
                role,
                template_id,
            },
        }
    }
}
