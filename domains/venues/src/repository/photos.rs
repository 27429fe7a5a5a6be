//! Venue photo repository

use crate::domain::entities::VenuePhoto;
use pitchside_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct VenuePhotoRepository {
    pool: PgPool,
}

impl VenuePhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find photo by ID
    pub async fn get_by_id(&self, photo_id: Uuid) -> Result<Option<VenuePhoto>> {
        let row = sqlx::query_as::<_, VenuePhoto>(
            r#"
            SELECT id, venue_id, photo_url, caption, is_primary, uploaded_at
            FROM venue_photos
            WHERE id = $1
            "#,
        )
        .bind(photo_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// List photos of a venue, primary first
    pub async fn list_for_venue(&self, venue_id: Uuid) -> Result<Vec<VenuePhoto>> {
        let rows = sqlx::query_as::<_, VenuePhoto>(
            r#"
            SELECT id, venue_id, photo_url, caption, is_primary, uploaded_at
            FROM venue_photos
            WHERE venue_id = $1
            ORDER BY is_primary DESC, uploaded_at ASC
            "#,
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
