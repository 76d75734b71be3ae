use thiserror::Error;

use crate::common::ApiError;

/// Failures of the profile, donation and KYC actions.
#[derive(Error, Debug)]
pub enum DonorError {
    /// Client-facing validation message, reported before any write
    #[error("{0}")]
    Validation(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Donation already recorded for this payment")]
    DuplicatePayment,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl DonorError {
    pub(crate) fn missing(field: &str) -> Self {
        DonorError::Validation(format!("Missing required field: {}", field))
    }

    pub(crate) fn invalid(message: &str) -> Self {
        DonorError::Validation(message.to_string())
    }

    /// Map to the HTTP envelope; database failures become `failure_message`.
    pub fn into_api_error(self, failure_message: &str) -> ApiError {
        match self {
            DonorError::Validation(_) | DonorError::DuplicatePayment => {
                ApiError::BadRequest(self.to_string())
            }
            DonorError::UserNotFound => ApiError::NotFound(self.to_string()),
            DonorError::Database(e) => ApiError::internal(failure_message, e),
        }
    }
}
