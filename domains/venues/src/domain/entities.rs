//! Domain entities for the Venues domain

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchside_common::{Error, Result};

/// Lowest allowed review rating
pub const MIN_RATING: i32 = 1;

/// Highest allowed review rating
pub const MAX_RATING: i32 = 5;

/// Kind of venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "venue_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VenueType {
    #[default]
    SportsFacility,
    Stadium,
    Gym,
    Court,
    Field,
    Pool,
    Other,
}

/// Venue operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "venue_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VenueStatus {
    #[default]
    Active,
    Inactive,
    UnderMaintenance,
    Closed,
}

/// Venue entity
///
/// `price_per_hour` feeds booking cost computation; a venue without a price
/// books for free. Rating aggregates are computed from reviews on read and
/// never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Venue {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub venue_type: VenueType,
    pub status: VenueStatus,
    pub address: Option<String>,
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub owner_id: Uuid,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub business_hours: Option<String>,
    pub price_per_hour: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Venue {
    /// Create a new venue with validation
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        description: Option<String>,
        venue_type: VenueType,
        address: Option<String>,
        city: Option<String>,
        owner_id: Uuid,
        price_per_hour: Option<Decimal>,
    ) -> Result<Self> {
        if name.is_empty() || name.len() > 200 {
            return Err(Error::Validation(
                "Venue name must be 1-200 characters".to_string(),
            ));
        }

        if let Some(price) = price_per_hour {
            if price < Decimal::ZERO {
                return Err(Error::Validation(
                    "price_per_hour cannot be negative".to_string(),
                ));
            }
        }

        let now = Utc::now();
        Ok(Venue {
            id: Uuid::new_v4(),
            name,
            description,
            venue_type,
            status: VenueStatus::default(),
            address,
            city,
            latitude: None,
            longitude: None,
            owner_id,
            contact_email: None,
            contact_phone: None,
            business_hours: None,
            price_per_hour,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_owner(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }
}

/// Photo attached to a venue
///
/// At most one photo per venue carries `is_primary`; the swap is atomic in
/// the repository layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VenuePhoto {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub photo_url: String,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub uploaded_at: DateTime<Utc>,
}

impl VenuePhoto {
    pub fn new(venue_id: Uuid, photo_url: String, caption: Option<String>) -> Self {
        VenuePhoto {
            id: Uuid::new_v4(),
            venue_id,
            photo_url,
            caption,
            is_primary: false,
            uploaded_at: Utc::now(),
        }
    }
}

/// Review left by a user on a venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VenueReview {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VenueReview {
    /// Create a new review with validation
    pub fn new(venue_id: Uuid, user_id: Uuid, rating: i32, comment: Option<String>) -> Result<Self> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(Error::Validation(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        Ok(VenueReview {
            id: Uuid::new_v4(),
            venue_id,
            user_id,
            rating,
            comment,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_creation() {
        let owner = Uuid::new_v4();
        let venue = Venue::new(
            "City Sports Hall".to_string(),
            None,
            VenueType::SportsFacility,
            Some("1 Main St".to_string()),
            Some("Manchester".to_string()),
            owner,
            Some(Decimal::from(20)),
        )
        .unwrap();

        assert_eq!(venue.status, VenueStatus::Active);
        assert!(venue.is_owner(owner));
        assert!(!venue.is_owner(Uuid::new_v4()));
    }

    #[test]
    fn test_venue_name_validation() {
        let owner = Uuid::new_v4();
        assert!(Venue::new("".to_string(), None, VenueType::Gym, None, None, owner, None).is_err());
        assert!(
            Venue::new("a".repeat(201), None, VenueType::Gym, None, None, owner, None).is_err()
        );
    }

    #[test]
    fn test_venue_negative_price_rejected() {
        let owner = Uuid::new_v4();
        let result = Venue::new(
            "Gym".to_string(),
            None,
            VenueType::Gym,
            None,
            None,
            owner,
            Some(Decimal::from(-1)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_review_rating_boundaries() {
        let venue = Uuid::new_v4();
        let user = Uuid::new_v4();

        assert!(VenueReview::new(venue, user, 1, None).is_ok());
        assert!(VenueReview::new(venue, user, 5, None).is_ok());
        assert!(VenueReview::new(venue, user, 0, None).is_err());
        assert!(VenueReview::new(venue, user, 6, None).is_err());
        assert!(VenueReview::new(venue, user, -3, None).is_err());
    }

    #[test]
    fn test_new_photo_is_not_primary() {
        let photo = VenuePhoto::new(Uuid::new_v4(), "https://example/p.jpg".to_string(), None);
        assert!(!photo.is_primary);
    }

    #[test]
    fn test_venue_type_serialization() {
        assert_eq!(
            serde_json::to_string(&VenueType::SportsFacility).unwrap(),
            r#""sports_facility""#
        );
        assert_eq!(
            serde_json::to_string(&VenueStatus::UnderMaintenance).unwrap(),
            r#""under_maintenance""#
        );
    }
}
