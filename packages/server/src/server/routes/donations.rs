use axum::{extract::Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::common::{ApiError, ApiJson};
use crate::domains::donor::actions::record_donation;
use crate::domains::donor::DonateRequest;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonateResponse {
    pub success: bool,
    pub message: String,
    pub payment_id: String,
}

/// POST /api/donate
pub async fn donate_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(request): ApiJson<DonateRequest>,
) -> Result<Json<DonateResponse>, ApiError> {
    let donation = record_donation(&user.phone_number, &request, &deps)
        .await
        .map_err(|e| e.into_api_error("Error recording donation"))?;

    Ok(Json(DonateResponse {
        success: true,
        message: "Donation recorded successfully".to_string(),
        payment_id: donation.payment_id,
    }))
}
