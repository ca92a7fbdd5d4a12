use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// No user ID is stored in the request's session.
    ///
    /// The caller is anonymous. Results in a 401 Unauthorized response.
    #[error("No user in session")]
    UserNotInSession,

    /// The session references a user ID that no longer exists.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User {0} stored in session not found in database")]
    UserNotInDatabase(i32),

    /// Username or password did not match a stored user.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The authenticated user may not perform the requested action.
    ///
    /// # Fields
    /// - ID of the user who was denied
    /// - Detail for server-side logging
    ///
    /// Results in a 403 Forbidden response.
    #[error("Access denied for user {0}: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// - `UserNotInSession` / `UserNotInDatabase` → 401 Unauthorized
/// - `InvalidCredentials` → 401 Unauthorized
/// - `AccessDenied` → 403 Forbidden
///
/// All errors are logged at debug level while keeping client-facing messages generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::UserNotInSession | Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication credentials were not provided.".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid username or password.".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "You do not have permission to perform this action.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
