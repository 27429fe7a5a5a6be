//! Booking repository

use crate::domain::entities::{Booking, BookingStatus};
use pitchside_common::Result;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Venue pricing as seen by the booking flow (cross-domain read)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct VenueRate {
    pub price_per_hour: Option<Decimal>,
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new booking
    pub async fn create(&self, booking: &Booking) -> Result<Booking> {
        let created = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, venue_id, team_id, start_time, end_time,
                                  status, total_cost, payment_id, is_paid, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, venue_id, team_id, start_time, end_time, status,
                      total_cost, payment_id, is_paid, created_at
            "#,
        )
        .bind(booking.id)
        .bind(booking.venue_id)
        .bind(booking.team_id)
        .bind(booking.start_time)
        .bind(booking.end_time)
        .bind(booking.status)
        .bind(booking.total_cost)
        .bind(&booking.payment_id)
        .bind(booking.is_paid)
        .bind(booking.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find booking by ID
    pub async fn get_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, venue_id, team_id, start_time, end_time, status,
                   total_cost, payment_id, is_paid, created_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update mutable booking fields
    pub async fn update(&self, booking: &Booking) -> Result<Booking> {
        let updated = sqlx::query_as::<_, Booking>(
            r#"
            UPDATE bookings
            SET status = $2, total_cost = $3, payment_id = $4, is_paid = $5
            WHERE id = $1
            RETURNING id, venue_id, team_id, start_time, end_time, status,
                      total_cost, payment_id, is_paid, created_at
            "#,
        )
        .bind(booking.id)
        .bind(booking.status)
        .bind(booking.total_cost)
        .bind(&booking.payment_id)
        .bind(booking.is_paid)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Set the booking's lifecycle status
    pub async fn set_status(&self, booking_id: Uuid, status: BookingStatus) -> Result<()> {
        sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
            .bind(booking_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List bookings for a team, newest start first
    pub async fn list_for_team(
        &self,
        team_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, venue_id, team_id, start_time, end_time, status,
                   total_cost, payment_id, is_paid, created_at
            FROM bookings
            WHERE team_id = $1
            ORDER BY start_time DESC
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

    /// Look up a venue's hourly rate; `None` when the venue does not exist
    pub async fn venue_rate(&self, venue_id: Uuid) -> Result<Option<VenueRate>> {
        let row = sqlx::query_as::<_, VenueRate>(
            "SELECT price_per_hour FROM venues WHERE id = $1",
        )
        .bind(venue_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
