use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

/// User model - one row per verified phone number
///
/// Profile fields stay NULL until the first profile update, which also sets
/// `profile_complete`.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub profile_complete: bool,
    pub otp_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Outcome of a successful OTP login
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct VerifiedLogin {
    pub id: Uuid,
    pub profile_complete: bool,
    /// True when this login created the row
    pub created: bool,
}

/// Validated profile fields written by `User::update_profile`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub address: String,
}

// =============================================================================
// SQL Queries
// =============================================================================

impl User {
    /// Find user by phone number
    pub async fn find_by_phone<'e, E>(phone: &str, executor: E) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE phone = $1")
            .bind(phone)
            .fetch_optional(executor)
            .await
    }

    /// Find user by phone and lock the row until the transaction ends
    pub async fn find_by_phone_for_update(
        phone: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE phone = $1 FOR UPDATE")
            .bind(phone)
            .fetch_optional(conn)
            .await
    }

    /// Create-if-absent and mark the number as OTP-verified, in one statement
    ///
    /// Concurrent first logins for the same number resolve to a single row.
    pub async fn record_verified_login(
        phone: &str,
        pool: &PgPool,
    ) -> Result<VerifiedLogin, sqlx::Error> {
        sqlx::query_as::<_, VerifiedLogin>(
            r#"
            INSERT INTO users (phone, otp_verified)
            VALUES ($1, TRUE)
            ON CONFLICT (phone) DO UPDATE
                SET otp_verified = TRUE, updated_at = NOW()
            RETURNING id, profile_complete, (xmax = 0) AS created
            "#,
        )
        .bind(phone)
        .fetch_one(pool)
        .await
    }

    /// Overwrite profile fields and mark the profile complete
    pub async fn update_profile(
        id: Uuid,
        update: &ProfileUpdate,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3, dob = $4, gender = $5, address = $6,
                profile_complete = TRUE, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(&update.email)
        .bind(update.dob)
        .bind(&update.gender)
        .bind(&update.address)
        .execute(conn)
        .await?;
        Ok(())
    }
}
