//! Submit KYC action

use tracing::info;

use crate::domains::donor::models::{KycDocument, User};
use crate::domains::donor::types::KycRequest;
use crate::domains::donor::DonorError;
use crate::kernel::ServerDeps;

/// Store (or replace) the user's PAN / Aadhaar details.
pub async fn submit_kyc(
    phone_number: &str,
    request: &KycRequest,
    deps: &ServerDeps,
) -> Result<KycDocument, DonorError> {
    let submission = request.validate()?;

    let user = User::find_by_phone(phone_number, &deps.db_pool)
        .await?
        .ok_or(DonorError::UserNotFound)?;

    let document = KycDocument::upsert(user.id, &submission, &deps.db_pool).await?;

    info!(user_id = %user.id, "KYC documents saved");
    Ok(document)
}
