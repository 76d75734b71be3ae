use sqlx::PgConnection;
use uuid::Uuid;

/// Append-only record of user-initiated financial actions
pub struct AuditLog;

impl AuditLog {
    pub async fn record(
        user_id: Uuid,
        action: &str,
        description: &str,
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO audit_log (user_id, action, description) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(action)
            .bind(description)
            .execute(conn)
            .await?;
        Ok(())
    }
}
