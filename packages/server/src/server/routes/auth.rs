use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::common::{ApiError, ApiJson, MessageResponse};
use crate::domains::auth::actions::{send_otp, verify_otp};
use crate::kernel::ServerDeps;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub profile_complete: bool,
}

/// POST /api/send-otp
pub async fn send_otp_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    ApiJson(request): ApiJson<SendOtpRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    send_otp(request.phone_number.trim(), &deps).await?;
    Ok(MessageResponse::ok("OTP sent successfully"))
}

/// POST /api/verify-otp
pub async fn verify_otp_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    ApiJson(request): ApiJson<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    let result = verify_otp(request.phone_number.trim(), request.otp.trim(), &deps).await?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        message: "OTP verified successfully".to_string(),
        token: result.token,
        profile_complete: result.profile_complete,
    }))
}
