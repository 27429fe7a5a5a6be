//! Team repository

use crate::domain::entities::{Team, TeamStatus};
use pitchside_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find team by ID
    pub async fn get_by_id(&self, team_id: Uuid) -> Result<Option<Team>> {
        let row = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, description, team_photo, max_members, leader_id,
                   status, created_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Set the team's lifecycle status
    pub async fn set_status(&self, team_id: Uuid, status: TeamStatus) -> Result<()> {
        sqlx::query("UPDATE teams SET status = $2 WHERE id = $1")
            .bind(team_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Replace the team photo URL
    pub async fn set_photo(&self, team_id: Uuid, photo_url: &str) -> Result<()> {
        sqlx::query("UPDATE teams SET team_photo = $2 WHERE id = $1")
            .bind(team_id)
            .bind(photo_url)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List teams the user has an active membership in
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Team>> {
        let rows = sqlx::query_as::<_, Team>(
            r#"
            SELECT t.id, t.name, t.description, t.team_photo, t.max_members,
                   t.leader_id, t.status, t.created_at
            FROM teams t
            INNER JOIN team_members m ON t.id = m.team_id
            WHERE m.user_id = $1 AND m.is_active
            ORDER BY t.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
