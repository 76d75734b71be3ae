use thiserror::Error;

use crate::common::ApiError;

/// Failures of the OTP and session-token flow.
///
/// Display strings are the client-facing messages.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid Indian phone number (10 digits)")]
    InvalidPhoneNumber,

    #[error("Phone number and OTP are required")]
    MissingFields,

    #[error("OTP expired or not requested")]
    ChallengeNotFound,

    #[error("OTP expired")]
    ChallengeExpired,

    #[error("Invalid OTP")]
    InvalidCode,

    #[error("Failed to send OTP. Please try again.")]
    DeliveryFailed(#[source] anyhow::Error),

    #[error("Token is missing")]
    MissingToken,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Failed to issue token: {0}")]
    TokenIssue(#[source] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidPhoneNumber
            | AuthError::MissingFields
            | AuthError::ChallengeNotFound
            | AuthError::ChallengeExpired
            | AuthError::InvalidCode => ApiError::BadRequest(err.to_string()),
            AuthError::MissingToken | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::DeliveryFailed(ref cause) => {
                let message = err.to_string();
                ApiError::internal(&message, format!("{:#}", cause))
            }
            AuthError::TokenIssue(_) | AuthError::Database(_) => {
                ApiError::internal("Internal server error", err)
            }
        }
    }
}
