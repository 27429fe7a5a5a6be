//! Venue repository

use crate::domain::entities::Venue;
use pitchside_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct VenueRepository {
    pool: PgPool,
}

impl VenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new venue
    pub async fn create(&self, venue: &Venue) -> Result<Venue> {
        let created = sqlx::query_as::<_, Venue>(
            r#"
            INSERT INTO venues (id, name, description, venue_type, status, address,
                                city, latitude, longitude, owner_id, contact_email,
                                contact_phone, business_hours, price_per_hour,
                                created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING id, name, description, venue_type, status, address, city,
                      latitude, longitude, owner_id, contact_email, contact_phone,
                      business_hours, price_per_hour, created_at, updated_at
            "#,
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.description)
        .bind(venue.venue_type)
        .bind(venue.status)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(venue.latitude)
        .bind(venue.longitude)
        .bind(venue.owner_id)
        .bind(&venue.contact_email)
        .bind(&venue.contact_phone)
        .bind(&venue.business_hours)
        .bind(venue.price_per_hour)
        .bind(venue.created_at)
        .bind(venue.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find venue by ID
    pub async fn get_by_id(&self, venue_id: Uuid) -> Result<Option<Venue>> {
        let row = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, description, venue_type, status, address, city,
                   latitude, longitude, owner_id, contact_email, contact_phone,
                   business_hours, price_per_hour, created_at, updated_at
            FROM venues
            WHERE id = $1
            "#,
        )
        .bind(venue_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update an existing venue
    pub async fn update(&self, venue: &Venue) -> Result<Venue> {
        let updated = sqlx::query_as::<_, Venue>(
            r#"
            UPDATE venues
            SET name = $2, description = $3, venue_type = $4, status = $5,
                address = $6, city = $7, latitude = $8, longitude = $9,
                contact_email = $10, contact_phone = $11, business_hours = $12,
                price_per_hour = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, venue_type, status, address, city,
                      latitude, longitude, owner_id, contact_email, contact_phone,
                      business_hours, price_per_hour, created_at, updated_at
            "#,
        )
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.description)
        .bind(venue.venue_type)
        .bind(venue.status)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(venue.latitude)
        .bind(venue.longitude)
        .bind(&venue.contact_email)
        .bind(&venue.contact_phone)
        .bind(&venue.business_hours)
        .bind(venue.price_per_hour)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// List venues, newest first
    pub async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Venue>> {
        let rows = sqlx::query_as::<_, Venue>(
            r#"
            SELECT id, name, description, venue_type, status, address, city,
                   latitude, longitude, owner_id, contact_email, contact_phone,
                   business_hours, price_per_hour, created_at, updated_at
            FROM venues
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
