use axum::{extract::Extension, Json};
use std::sync::Arc;

use crate::common::{ApiError, ApiJson, MessageResponse};
use crate::domains::donor::actions::submit_kyc;
use crate::domains::donor::KycRequest;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// POST /api/kyc
pub async fn submit_kyc_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(request): ApiJson<KycRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    submit_kyc(&user.phone_number, &request, &deps)
        .await
        .map_err(|e| e.into_api_error("Error saving KYC documents"))?;

    Ok(MessageResponse::ok("KYC documents saved successfully"))
}
