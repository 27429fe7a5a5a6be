//! Domain entities for the Social domain

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::ValidateEmail;

use pitchside_common::{Error, Result};

pub use crate::domain::state::FriendshipStatus;

/// User gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// User entity
///
/// `cognito_sub` ties the row to the external identity; `friends_count` and
/// `teams_count` are denormalized and maintained in the same transaction as
/// the relationship rows they count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub cognito_sub: String,
    pub email: String,
    pub username: String,
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub profile_pic: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub friends_count: i32,
    pub teams_count: i32,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation
    pub fn new(cognito_sub: String, email: String, username: String) -> Result<Self> {
        if !email.validate_email() {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        if username.is_empty() || username.len() > 50 {
            return Err(Error::Validation(
                "Username must be 1-50 characters".to_string(),
            ));
        }

        Ok(User {
            id: Uuid::new_v4(),
            cognito_sub,
            email,
            username,
            name: None,
            dob: None,
            gender: None,
            profile_pic: None,
            bio: None,
            location: None,
            friends_count: 0,
            teams_count: 0,
            created_at: Utc::now(),
        })
    }
}

/// Friendship entity - a directed request from `user_id` to `friend_id`.
///
/// At most one row exists per user pair, in either direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Friendship {
    pub id: Uuid,
    pub user_id: Uuid,
    pub friend_id: Uuid,
    pub status: FriendshipStatus,
    pub created_at: DateTime<Utc>,
}

impl Friendship {
    /// Create a new pending friendship request with validation
    pub fn new(user_id: Uuid, friend_id: Uuid) -> Result<Self> {
        if user_id == friend_id {
            return Err(Error::Validation(
                "Cannot send a friend request to yourself".to_string(),
            ));
        }

        Ok(Friendship {
            id: Uuid::new_v4(),
            user_id,
            friend_id,
            status: FriendshipStatus::Pending,
            created_at: Utc::now(),
        })
    }

    /// The addressee is the only party who may respond to a request
    pub fn is_addressee(&self, user_id: Uuid) -> bool {
        self.friend_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(
            "sub-123".to_string(),
            "player@example.com".to_string(),
            "player1".to_string(),
        )
        .unwrap();

        assert_eq!(user.cognito_sub, "sub-123");
        assert_eq!(user.friends_count, 0);
        assert_eq!(user.teams_count, 0);
        assert!(user.profile_pic.is_none());
    }

    #[test]
    fn test_user_email_validation() {
        assert!(User::new(
            "sub".to_string(),
            "not-an-email".to_string(),
            "player1".to_string()
        )
        .is_err());
    }

    #[test]
    fn test_user_username_validation() {
        assert!(User::new(
            "sub".to_string(),
            "a@example.com".to_string(),
            "".to_string()
        )
        .is_err());
        assert!(User::new(
            "sub".to_string(),
            "a@example.com".to_string(),
            "a".repeat(51)
        )
        .is_err());
    }

    #[test]
    fn test_friendship_rejects_self() {
        let id = Uuid::new_v4();
        assert!(Friendship::new(id, id).is_err());
    }

    #[test]
    fn test_friendship_starts_pending() {
        let friendship = Friendship::new(Uuid::new_v4(), Uuid::new_v4()).unwrap();
        assert_eq!(friendship.status, FriendshipStatus::Pending);
    }

    #[test]
    fn test_friendship_addressee() {
        let sender = Uuid::new_v4();
        let addressee = Uuid::new_v4();
        let friendship = Friendship::new(sender, addressee).unwrap();

        assert!(friendship.is_addressee(addressee));
        assert!(!friendship.is_addressee(sender));
    }
}
