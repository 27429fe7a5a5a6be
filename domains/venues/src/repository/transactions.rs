//! Transactional free functions for the Venues domain

use crate::domain::entities::VenuePhoto;
use pitchside_common::RepositoryError;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Insert a photo row within an existing transaction.
pub async fn insert_photo_tx(
    transaction: &mut Transaction<'_, Postgres>,
    photo: &VenuePhoto,
) -> std::result::Result<VenuePhoto, sqlx::Error> {
    let created = sqlx::query_as::<_, VenuePhoto>(
        r#"
        INSERT INTO venue_photos (id, venue_id, photo_url, caption, is_primary, uploaded_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, venue_id, photo_url, caption, is_primary, uploaded_at
        "#,
    )
    .bind(photo.id)
    .bind(photo.venue_id)
    .bind(&photo.photo_url)
    .bind(&photo.caption)
    .bind(photo.is_primary)
    .bind(photo.uploaded_at)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(created)
}

/// Make one photo the venue's primary, within an existing transaction.
///
/// Unsets every photo of the venue, then sets the target. Both statements
/// commit together, so at most one primary is ever observable.
/// `NotFound` when the photo does not belong to the venue.
pub async fn set_primary_photo_tx(
    transaction: &mut Transaction<'_, Postgres>,
    venue_id: Uuid,
    photo_id: Uuid,
) -> std::result::Result<(), RepositoryError> {
    sqlx::query("UPDATE venue_photos SET is_primary = FALSE WHERE venue_id = $1")
        .bind(venue_id)
        .execute(&mut **transaction)
        .await?;

    let result = sqlx::query(
        "UPDATE venue_photos SET is_primary = TRUE WHERE id = $1 AND venue_id = $2",
    )
    .bind(photo_id)
    .bind(venue_id)
    .execute(&mut **transaction)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}
