use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// KYC details, at most one row per user
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct KycDocument {
    pub user_id: Uuid,
    pub pan_number: String,
    pub aadhaar_number: String,
    pub date_of_birth: NaiveDate,
    pub kyc_doc_path: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Validated KYC input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KycSubmission {
    pub pan_number: String,
    pub aadhaar_number: String,
    pub date_of_birth: NaiveDate,
    pub kyc_doc_path: Option<String>,
}

impl KycDocument {
    pub async fn find_by_user(user_id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM kyc_documents WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the user's KYC row
    pub async fn upsert(
        user_id: Uuid,
        submission: &KycSubmission,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO kyc_documents
                (user_id, pan_number, aadhaar_number, date_of_birth, kyc_doc_path)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                pan_number = EXCLUDED.pan_number,
                aadhaar_number = EXCLUDED.aadhaar_number,
                date_of_birth = EXCLUDED.date_of_birth,
                kyc_doc_path = EXCLUDED.kyc_doc_path,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&submission.pan_number)
        .bind(&submission.aadhaar_number)
        .bind(submission.date_of_birth)
        .bind(&submission.kyc_doc_path)
        .fetch_one(pool)
        .await
    }

    /// Aadhaar with all but the last four digits hidden
    pub fn masked_aadhaar(&self) -> String {
        crate::common::mask_phone(&self.aadhaar_number)
    }
}
