//! Domain entities for the Teams domain
//!
//! Teams with a bounded active-member count, memberships, venue bookings
//! with cost computed once at creation, and team activities with photo
//! attachments.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchside_common::{Error, Result};

/// Smallest allowed team capacity
pub const MIN_TEAM_MEMBERS: i32 = 2;

/// Largest allowed team capacity
pub const MAX_TEAM_MEMBERS: i32 = 10;

/// Capacity applied when a team is created without one
pub const DEFAULT_MAX_MEMBERS: i32 = 10;

/// Team lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "team_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    #[default]
    Active,
    Inactive,
    /// Terminal; archiving again is a no-op
    Archived,
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamStatus::Active => write!(f, "active"),
            TeamStatus::Inactive => write!(f, "inactive"),
            TeamStatus::Archived => write!(f, "archived"),
        }
    }
}

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    /// Terminal; re-cancelling is a no-op
    Cancelled,
    Completed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

/// Kind of team activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "activity_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Sport,
    Social,
    Training,
    Competition,
    Other,
}

/// Team entity
///
/// The leader is immutable after creation and always holds a membership row.
/// Active member count never exceeds `max_members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub team_photo: Option<String>,
    pub max_members: i32,
    pub leader_id: Uuid,
    pub status: TeamStatus,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with validation
    pub fn new(
        name: String,
        description: Option<String>,
        max_members: Option<i32>,
        leader_id: Uuid,
    ) -> Result<Self> {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Team name must be 1-100 characters".to_string(),
            ));
        }

        let max_members = max_members.unwrap_or(DEFAULT_MAX_MEMBERS);
        Self::validate_max_members(max_members)?;

        Ok(Team {
            id: Uuid::new_v4(),
            name,
            description,
            team_photo: None,
            max_members,
            leader_id,
            status: TeamStatus::default(),
            created_at: Utc::now(),
        })
    }

    /// Capacity bounds check, applied at creation and on update
    pub fn validate_max_members(max_members: i32) -> Result<()> {
        if !(MIN_TEAM_MEMBERS..=MAX_TEAM_MEMBERS).contains(&max_members) {
            return Err(Error::Validation(format!(
                "max_members must be between {} and {}",
                MIN_TEAM_MEMBERS, MAX_TEAM_MEMBERS
            )));
        }
        Ok(())
    }

    pub fn is_leader(&self, user_id: Uuid) -> bool {
        self.leader_id == user_id
    }

    pub fn is_archived(&self) -> bool {
        self.status == TeamStatus::Archived
    }
}

/// Membership entity - association between User and Team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub joined_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Membership {
    pub fn new(team_id: Uuid, user_id: Uuid) -> Self {
        Membership {
            id: Uuid::new_v4(),
            team_id,
            user_id,
            joined_at: Utc::now(),
            is_active: true,
        }
    }
}

/// Booking entity
///
/// `total_cost` is computed once at creation from the booked window and the
/// venue's hourly price; later price changes never reprice a booking.
/// `is_paid` is independent of `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub venue_id: Uuid,
    pub team_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub total_cost: Decimal,
    pub payment_id: Option<String>,
    pub is_paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new booking with validation
    pub fn new(
        venue_id: Uuid,
        team_id: Uuid,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        price_per_hour: Option<Decimal>,
    ) -> Result<Self> {
        if start_time >= end_time {
            return Err(Error::Validation(
                "Booking start time must be before end time".to_string(),
            ));
        }

        Ok(Booking {
            id: Uuid::new_v4(),
            venue_id,
            team_id,
            start_time,
            end_time,
            status: BookingStatus::default(),
            total_cost: Self::compute_cost(start_time, end_time, price_per_hour),
            payment_id: None,
            is_paid: false,
            created_at: Utc::now(),
        })
    }

    /// Fractional hours times the hourly price; zero when the venue has no
    /// price set.
    pub fn compute_cost(
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        price_per_hour: Option<Decimal>,
    ) -> Decimal {
        let Some(price) = price_per_hour else {
            return Decimal::ZERO;
        };
        let seconds = (end_time - start_time).num_seconds();
        Decimal::from(seconds) / Decimal::from(3600) * price
    }
}

/// Activity entity - something a team did or has planned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Activity {
    pub id: Uuid,
    pub team_id: Uuid,
    pub venue_id: Option<Uuid>,
    pub activity_type: ActivityType,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Create a new activity with validation
    pub fn new(
        team_id: Uuid,
        venue_id: Option<Uuid>,
        activity_type: ActivityType,
        description: Option<String>,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        if let (Some(start), Some(end)) = (start_time, end_time) {
            if start >= end {
                return Err(Error::Validation(
                    "Activity start time must be before end time".to_string(),
                ));
            }
        }

        Ok(Activity {
            id: Uuid::new_v4(),
            team_id,
            venue_id,
            activity_type,
            description,
            start_time,
            end_time,
            created_at: Utc::now(),
        })
    }
}

/// Photo attached to an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ActivityPhoto {
    pub id: Uuid,
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub photo_url: String,
    pub caption: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl ActivityPhoto {
    pub fn new(activity_id: Uuid, user_id: Uuid, photo_url: String, caption: Option<String>) -> Self {
        ActivityPhoto {
            id: Uuid::new_v4(),
            activity_id,
            user_id,
            photo_url,
            caption,
            uploaded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::prelude::FromPrimitive;

    #[test]
    fn test_team_creation_defaults() {
        let leader = Uuid::new_v4();
        let team = Team::new("Sunday FC".to_string(), None, None, leader).unwrap();

        assert_eq!(team.name, "Sunday FC");
        assert_eq!(team.max_members, DEFAULT_MAX_MEMBERS);
        assert_eq!(team.leader_id, leader);
        assert_eq!(team.status, TeamStatus::Active);
        assert!(team.team_photo.is_none());
        assert!(team.is_leader(leader));
        assert!(!team.is_leader(Uuid::new_v4()));
    }

    #[test]
    fn test_team_name_validation() {
        let leader = Uuid::new_v4();
        assert!(Team::new("".to_string(), None, None, leader).is_err());
        assert!(Team::new("a".repeat(101), None, None, leader).is_err());
        assert!(Team::new("a".repeat(100), None, None, leader).is_ok());
    }

    #[test]
    fn test_max_members_boundaries() {
        // 2 and 10 are inclusive bounds
        assert!(Team::validate_max_members(2).is_ok());
        assert!(Team::validate_max_members(10).is_ok());
        assert!(Team::validate_max_members(1).is_err());
        assert!(Team::validate_max_members(11).is_err());
        assert!(Team::validate_max_members(0).is_err());
        assert!(Team::validate_max_members(-1).is_err());
    }

    #[test]
    fn test_team_creation_rejects_out_of_range_capacity() {
        let leader = Uuid::new_v4();
        assert!(Team::new("Team".to_string(), None, Some(1), leader).is_err());
        assert!(Team::new("Team".to_string(), None, Some(11), leader).is_err());
        assert!(Team::new("Team".to_string(), None, Some(5), leader).is_ok());
    }

    #[test]
    fn test_booking_cost_ninety_minutes() {
        // 10:00-11:30 at 20.0/hour is exactly 30.0
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 6, 1, 11, 30, 0).unwrap();
        let price = Decimal::from_f64(20.0).unwrap();

        let cost = Booking::compute_cost(start, end, Some(price));
        assert_eq!(cost, Decimal::from(30));
    }

    #[test]
    fn test_booking_cost_without_price_is_zero() {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();

        assert_eq!(Booking::compute_cost(start, end, None), Decimal::ZERO);
    }

    #[test]
    fn test_booking_cost_whole_hours() {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 6, 1, 11, 0, 0).unwrap();
        let price = Decimal::from(15);

        assert_eq!(
            Booking::compute_cost(start, end, Some(price)),
            Decimal::from(30)
        );
    }

    #[test]
    fn test_booking_rejects_inverted_window() {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();

        let result = Booking::new(Uuid::new_v4(), Uuid::new_v4(), start, end, None);
        assert!(result.is_err());

        // Zero-length windows are also invalid
        let result = Booking::new(Uuid::new_v4(), Uuid::new_v4(), start, start, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_booking_defaults() {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 6, 1, 11, 0, 0).unwrap();

        let booking = Booking::new(Uuid::new_v4(), Uuid::new_v4(), start, end, None).unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(!booking.is_paid);
        assert!(booking.payment_id.is_none());
        assert_eq!(booking.total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_activity_rejects_inverted_window() {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap();

        let result = Activity::new(
            Uuid::new_v4(),
            None,
            ActivityType::Training,
            None,
            Some(start),
            Some(end),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_activity_open_window_allowed() {
        // Either endpoint may be absent
        let result = Activity::new(
            Uuid::new_v4(),
            None,
            ActivityType::Social,
            Some("post-match drinks".to_string()),
            None,
            None,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_membership_defaults() {
        let membership = Membership::new(Uuid::new_v4(), Uuid::new_v4());
        assert!(membership.is_active);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&TeamStatus::Archived).unwrap(),
            r#""archived""#
        );
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            r#""cancelled""#
        );
        assert_eq!(
            serde_json::to_string(&ActivityType::Competition).unwrap(),
            r#""competition""#
        );
    }
}
