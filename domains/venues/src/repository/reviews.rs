//! Venue review repository

use crate::domain::entities::VenueReview;
use pitchside_common::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Rating aggregate, computed from review rows on every read
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RatingSummary {
    pub average_rating: Option<Decimal>,
    pub review_count: i64,
}

#[derive(Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new review
    pub async fn create(&self, review: &VenueReview) -> Result<VenueReview> {
        let created = sqlx::query_as::<_, VenueReview>(
            r#"
            INSERT INTO venue_reviews (id, venue_id, user_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, venue_id, user_id, rating, comment, created_at
            "#,
        )
        .bind(review.id)
        .bind(review.venue_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List reviews for a venue, newest first
    pub async fn list_for_venue(
        &self,
        venue_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<VenueReview>> {
        let rows = sqlx::query_as::<_, VenueReview>(
            r#"
            SELECT id, venue_id, user_id, rating, comment, created_at
            FROM venue_reviews
            WHERE venue_id = $1
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(venue_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Compute the rating aggregate. `average_rating` is NULL with no reviews.
    pub async fn rating_summary(&self, venue_id: Uuid) -> Result<RatingSummary> {
        let summary = sqlx::query_as::<_, RatingSummary>(
            r#"
            SELECT AVG(rating)::NUMERIC AS average_rating, COUNT(*) AS review_count
            FROM venue_reviews
            WHERE venue_id = $1
            "#,
        )
        .bind(venue_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
