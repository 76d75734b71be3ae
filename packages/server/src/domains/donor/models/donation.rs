use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Currency recorded for every donation
pub const DEFAULT_CURRENCY: &str = "INR";

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Donation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub currency: String,
    pub payment_id: String,
    pub donation_type: String,
    pub tax_exemption: bool,
    pub status: String,
    pub donation_date: DateTime<Utc>,
}

/// Validated donation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    pub amount: Decimal,
    pub payment_id: String,
    pub donation_type: String,
    pub tax_exemption: bool,
}

impl Donation {
    /// Donation history, newest first
    pub async fn find_by_user(user_id: Uuid, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM donations WHERE user_id = $1 ORDER BY donation_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    pub async fn insert(
        user_id: Uuid,
        donation: &NewDonation,
        conn: &mut PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO donations
                (user_id, amount, currency, payment_id, donation_type, tax_exemption, status)
            VALUES ($1, $2, $3, $4, $5, $6, 'success')
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(donation.amount)
        .bind(DEFAULT_CURRENCY)
        .bind(&donation.payment_id)
        .bind(&donation.donation_type)
        .bind(donation.tax_exemption)
        .fetch_one(conn)
        .await
    }
}
