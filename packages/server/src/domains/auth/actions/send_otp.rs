//! Send OTP action

use crate::domains::auth::AuthError;
use crate::kernel::ServerDeps;

/// Generate a code for `phone_number`, store it and send it by SMS.
///
/// Called from `POST /api/send-otp`. Fails with `InvalidPhoneNumber` before
/// any state changes, or `DeliveryFailed` if the gateway errors or times out.
pub async fn send_otp(phone_number: &str, deps: &ServerDeps) -> Result<(), AuthError> {
    deps.otp.request_challenge(phone_number).await
}
