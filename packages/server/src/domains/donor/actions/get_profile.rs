//! Get profile action

use crate::domains::donor::models::{Donation, FamilyMember, KycDocument, User};
use crate::domains::donor::types::ProfileView;
use crate::domains::donor::DonorError;
use crate::kernel::ServerDeps;

/// Load the authenticated user's profile with family, donations and KYC.
pub async fn get_profile(phone_number: &str, deps: &ServerDeps) -> Result<ProfileView, DonorError> {
    let pool = &deps.db_pool;
    let user = User::find_by_phone(phone_number, pool)
        .await?
        .ok_or(DonorError::UserNotFound)?;

    let (family, donations, kyc) = tokio::try_join!(
        FamilyMember::find_by_user(user.id, pool),
        Donation::find_by_user(user.id, pool),
        KycDocument::find_by_user(user.id, pool),
    )?;

    Ok(ProfileView::assemble(user, family, donations, kyc))
}
