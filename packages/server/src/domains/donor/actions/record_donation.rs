//! Record donation action

use tracing::info;

use crate::domains::donor::models::{AuditLog, Donation, User};
use crate::domains::donor::types::DonateRequest;
use crate::domains::donor::DonorError;
use crate::kernel::ServerDeps;

/// Append a donation for the authenticated user.
///
/// The donation and its audit entry commit together. A payment reference
/// that was already recorded is rejected.
pub async fn record_donation(
    phone_number: &str,
    request: &DonateRequest,
    deps: &ServerDeps,
) -> Result<Donation, DonorError> {
    let new_donation = request.validate()?;

    let mut tx = deps.db_pool.begin().await?;

    let user = User::find_by_phone(phone_number, &mut *tx)
        .await?
        .ok_or(DonorError::UserNotFound)?;

    let donation = Donation::insert(user.id, &new_donation, &mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DonorError::DuplicatePayment
            } else {
                DonorError::Database(e)
            }
        })?;

    let description = format!(
        "Donation of {} {} ({})",
        donation.amount, donation.currency, donation.payment_id
    );
    AuditLog::record(user.id, "donation", &description, &mut *tx).await?;

    tx.commit().await?;

    info!(
        user_id = %user.id,
        donation_id = %donation.id,
        amount = %donation.amount,
        "Donation recorded"
    );
    Ok(donation)
}

/// Postgres `unique_violation` (23505)
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
