//! Activity repository

use crate::domain::entities::{Activity, ActivityPhoto};
use pitchside_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new activity
    pub async fn create(&self, activity: &Activity) -> Result<Activity> {
        let created = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activities (id, team_id, venue_id, activity_type,
                                    description, start_time, end_time, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, team_id, venue_id, activity_type, description,
                      start_time, end_time, created_at
            "#,
        )
        .bind(activity.id)
        .bind(activity.team_id)
        .bind(activity.venue_id)
        .bind(activity.activity_type)
        .bind(&activity.description)
        .bind(activity.start_time)
        .bind(activity.end_time)
        .bind(activity.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find activity by ID
    pub async fn get_by_id(&self, activity_id: Uuid) -> Result<Option<Activity>> {
        let row = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, team_id, venue_id, activity_type, description,
                   start_time, end_time, created_at
            FROM activities
            WHERE id = $1
            "#,
        )
        .bind(activity_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List activities for a team, newest first
    pub async fn list_for_team(
        &self,
        team_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Activity>> {
        let rows = sqlx::query_as::<_, Activity>(
            r#"
            SELECT id, team_id, venue_id, activity_type, description,
                   start_time, end_time, created_at
            FROM activities
            WHERE team_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(team_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a batch of photo rows in one transaction.
    ///
    /// The blobs are already uploaded by the time this runs; a failure here
    /// leaves no partial rows behind.
    pub async fn add_photos(&self, photos: &[ActivityPhoto]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for photo in photos {
            sqlx::query(
                r#"
                INSERT INTO activity_photos (id, activity_id, user_id, photo_url,
                                             caption, uploaded_at)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(photo.id)
            .bind(photo.activity_id)
            .bind(photo.user_id)
            .bind(&photo.photo_url)
            .bind(&photo.caption)
            .bind(photo.uploaded_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// List photos attached to an activity
    pub async fn list_photos(&self, activity_id: Uuid) -> Result<Vec<ActivityPhoto>> {
        let rows = sqlx::query_as::<_, ActivityPhoto>(
            r#"
            SELECT id, activity_id, user_id, photo_url, caption, uploaded_at
            FROM activity_photos
            WHERE activity_id = $1
            ORDER BY uploaded_at ASC
            "#,
        )
        .bind(activity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
