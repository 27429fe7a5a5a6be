//! Friendship repository

use crate::domain::entities::{Friendship, User};
use crate::domain::state::FriendshipStatus;
use pitchside_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct FriendshipRepository {
    pool: PgPool,
}

impl FriendshipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new friendship request
    pub async fn create(&self, friendship: &Friendship) -> Result<Friendship> {
        let created = sqlx::query_as::<_, Friendship>(
            r#"
            INSERT INTO friendships (id, user_id, friend_id, status, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, friend_id, status, created_at
            "#,
        )
        .bind(friendship.id)
        .bind(friendship.user_id)
        .bind(friendship.friend_id)
        .bind(friendship.status)
        .bind(friendship.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Find the friendship row between two users, in either direction
    pub async fn get_between(&self, a: Uuid, b: Uuid) -> Result<Option<Friendship>> {
        let row = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friendships
            WHERE (user_id = $1 AND friend_id = $2)
               OR (user_id = $2 AND friend_id = $1)
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Update the status of a friendship row
    pub async fn set_status(&self, friendship_id: Uuid, status: FriendshipStatus) -> Result<()> {
        sqlx::query("UPDATE friendships SET status = $2 WHERE id = $1")
            .bind(friendship_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// List accepted friends of a user, as user rows
    pub async fn list_friends(&self, user_id: Uuid) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.cognito_sub, u.email, u.username, u.name, u.dob, u.gender,
                   u.profile_pic, u.bio, u.location, u.friends_count, u.teams_count,
                   u.created_at
            FROM users u
            INNER JOIN friendships f
                ON (f.user_id = $1 AND f.friend_id = u.id)
                OR (f.friend_id = $1 AND f.user_id = u.id)
            WHERE f.status = 'accepted'
            ORDER BY u.username ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// List pending requests addressed to a user
    pub async fn list_pending_for_user(&self, user_id: Uuid) -> Result<Vec<Friendship>> {
        let rows = sqlx::query_as::<_, Friendship>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friendships
            WHERE friend_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
