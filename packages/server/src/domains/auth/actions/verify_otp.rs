//! Verify OTP action

use tracing::{error, info};

use crate::common::mask_phone;
use crate::domains::auth::AuthError;
use crate::domains::donor::models::User;
use crate::kernel::ServerDeps;

/// Result of verifying OTP
#[derive(Debug, Clone)]
pub struct VerifyOtpResult {
    pub token: String,
    pub profile_complete: bool,
}

/// Verify OTP code, create the user on first login, and issue a session token.
///
/// The challenge is consumed before the user lookup, so a database failure
/// after a correct code still requires a new OTP.
pub async fn verify_otp(
    phone_number: &str,
    code: &str,
    deps: &ServerDeps,
) -> Result<VerifyOtpResult, AuthError> {
    let verified = deps.otp.verify_challenge(phone_number, code).await?;

    let login = User::record_verified_login(&verified.phone_number, &deps.db_pool)
        .await
        .map_err(|e| {
            error!(phone = %mask_phone(&verified.phone_number), error = %e, "Failed to load user after OTP");
            AuthError::Database(e)
        })?;

    if login.created {
        info!(user_id = %login.id, "Created new user");
    }

    let token = deps
        .jwt_service
        .create_token(&verified.phone_number)
        .map_err(AuthError::TokenIssue)?;

    Ok(VerifyOtpResult {
        token,
        profile_complete: login.profile_complete,
    })
}
