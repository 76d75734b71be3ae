use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct FamilyMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub relation: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFamilyMember {
    pub name: String,
    pub relation: String,
    pub gender: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl FamilyMember {
    pub async fn find_by_user(user_id: Uuid, pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM family_members WHERE user_id = $1 ORDER BY created_at, id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the user's whole family set.
    ///
    /// Must run inside the caller's transaction so the delete and the inserts
    /// commit or roll back together.
    pub async fn replace_for_user(
        user_id: Uuid,
        members: &[NewFamilyMember],
        conn: &mut PgConnection,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM family_members WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;

        for member in members {
            sqlx::query(
                r#"
                INSERT INTO family_members (user_id, name, relation, gender, dob)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(user_id)
            .bind(&member.name)
            .bind(&member.relation)
            .bind(&member.gender)
            .bind(member.dob)
            .execute(&mut *conn)
            .await?;
        }

        Ok(())
    }
}
