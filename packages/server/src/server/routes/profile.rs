use axum::{extract::Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::common::{ApiError, ApiJson, MessageResponse};
use crate::domains::donor::actions::{get_profile, update_profile};
use crate::domains::donor::{ProfileView, UpdateProfileRequest};
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub user: ProfileView,
}

/// GET /api/user/profile
pub async fn get_profile_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = get_profile(&user.phone_number, &deps)
        .await
        .map_err(|e| e.into_api_error("Error retrieving profile"))?;

    Ok(Json(ProfileResponse {
        success: true,
        user: profile,
    }))
}

/// PUT /api/user/profile
pub async fn update_profile_handler(
    Extension(deps): Extension<Arc<ServerDeps>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    update_profile(&user.phone_number, &request, &deps)
        .await
        .map_err(|e| e.into_api_error("Error updating profile"))?;

    Ok(MessageResponse::ok("Profile updated successfully"))
}
