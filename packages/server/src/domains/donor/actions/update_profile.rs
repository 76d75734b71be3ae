//! Update profile action

use tracing::info;

use crate::domains::donor::models::{FamilyMember, User};
use crate::domains::donor::types::UpdateProfileRequest;
use crate::domains::donor::DonorError;
use crate::kernel::ServerDeps;

/// Overwrite profile fields and replace the family set, all or nothing.
///
/// The request is validated before the transaction opens. The user row is
/// locked so concurrent updates for the same user apply one after another.
pub async fn update_profile(
    phone_number: &str,
    request: &UpdateProfileRequest,
    deps: &ServerDeps,
) -> Result<(), DonorError> {
    let (update, family) = request.validate()?;

    let mut tx = deps.db_pool.begin().await?;

    let user = User::find_by_phone_for_update(phone_number, &mut *tx)
        .await?
        .ok_or(DonorError::UserNotFound)?;

    User::update_profile(user.id, &update, &mut *tx).await?;
    FamilyMember::replace_for_user(user.id, &family, &mut *tx).await?;

    tx.commit().await?;

    info!(user_id = %user.id, family_members = family.len(), "Profile updated");
    Ok(())
}
