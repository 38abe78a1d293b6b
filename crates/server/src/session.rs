// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acting-user extraction for the server.
//!
//! Identity is asserted by the caller in the `X-User-Id` header; this
//! module only checks that the header names an existing user.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use flexirota_api::AuthenticationService;
use flexirota_domain::User;
use tracing::{debug, warn};

use crate::AppState;
use crate::error::{ErrorResponse, HttpError};

/// The header carrying the acting user's id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Extractor for the acting user.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     ActingUser(actor): ActingUser,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: User, freshly loaded from the store
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - The `X-User-Id` header is missing
/// - The header is not a decimal user id
/// - No user has that id
pub struct ActingUser(pub User);

impl FromRequestParts<AppState> for ActingUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header: &str = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| {
                debug!("Missing X-User-Id header");
                SessionError::MissingUserHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid X-User-Id header encoding");
                SessionError::InvalidUserHeader
            })?;

        let user_id: i64 = header.trim().parse().map_err(|_| {
            warn!(header, "X-User-Id header is not a user id");
            SessionError::InvalidUserHeader
        })?;

        let mut persistence = state.persistence.lock().await;
        let user: User = AuthenticationService::authenticate(&mut persistence, user_id)
            .map_err(|e| {
                warn!(user_id, error = %e, "Authentication failed");
                SessionError::UnknownUser(e.to_string())
            })?;
        drop(persistence);

        debug!(user_id, role = user.role.as_str(), "Resolved acting user");

        Ok(Self(user))
    }
}

/// Acting-user extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The `X-User-Id` header is missing.
    MissingUserHeader,
    /// The `X-User-Id` header is not a user id.
    InvalidUserHeader,
    /// The header names no known user.
    UnknownUser(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingUserHeader => String::from("Missing X-User-Id header"),
            Self::InvalidUserHeader => {
                String::from("Invalid X-User-Id header. Expected a numeric user id")
            }
            Self::UnknownUser(reason) => reason,
        };

        HttpError {
            status: StatusCode::UNAUTHORIZED,
            body: ErrorResponse {
                error: String::from("unauthenticated"),
                message,
                role: None,
                template_id: None,
            },
        }
        .into_response()
    }
}
