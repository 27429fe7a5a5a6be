//! Membership repository

use crate::domain::entities::Membership;
use pitchside_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user's membership in a team
    pub async fn get_by_team_and_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Membership>> {
        let row = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, team_id, user_id, joined_at, is_active
            FROM team_members
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List active members of a team
    pub async fn list_active_for_team(&self, team_id: Uuid) -> Result<Vec<Membership>> {
        let rows = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, team_id, user_id, joined_at, is_active
            FROM team_members
            WHERE team_id = $1 AND is_active
            ORDER BY joined_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Count active members of a team
    pub async fn count_active_for_team(&self, team_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM team_members WHERE team_id = $1 AND is_active",
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Cross-domain existence check against the users table
    pub async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }
}
