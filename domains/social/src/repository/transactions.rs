//! Transactional free functions for the Social domain
//!
//! Accepting or removing a friendship mutates both users' `friends_count`
//! in the same transaction as the friendship row.

use crate::domain::state::FriendshipStatus;
use pitchside_common::{Error, RepositoryError, Result};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Adjust a user's denormalized `friends_count` within an existing
/// transaction.
///
/// Decrements are guarded: going below zero surfaces as `CounterDesync`,
/// never a silent clamp.
pub async fn adjust_friends_count_tx(
    transaction: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    delta: i32,
) -> std::result::Result<(), RepositoryError> {
    let result = if delta >= 0 {
        sqlx::query("UPDATE users SET friends_count = friends_count + $2 WHERE id = $1")
            .bind(user_id)
            .bind(delta)
            .execute(&mut **transaction)
            .await?
    } else {
        sqlx::query(
            r#"
            UPDATE users SET friends_count = friends_count + $2
            WHERE id = $1 AND friends_count + $2 >= 0
            "#,
        )
        .bind(user_id)
        .bind(delta)
        .execute(&mut **transaction)
        .await?
    };

    if result.rows_affected() == 0 {
        if delta < 0 {
            return Err(RepositoryError::CounterDesync(format!(
                "friends_count for user {} would go below zero",
                user_id
            )));
        }
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Accept a pending friendship and increment both users' counters.
///
/// The status flip matches only a pending row, so a double-accept cannot
/// double-count.
pub async fn accept_friendship_tx(
    transaction: &mut Transaction<'_, Postgres>,
    friendship_id: Uuid,
    user_id: Uuid,
    friend_id: Uuid,
) -> Result<()> {
    let result = sqlx::query(
        "UPDATE friendships SET status = $2 WHERE id = $1 AND status = 'pending'",
    )
    .bind(friendship_id)
    .bind(FriendshipStatus::Accepted)
    .execute(&mut **transaction)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::Conflict(
            "Friend request is no longer pending".to_string(),
        ));
    }

    adjust_friends_count_tx(transaction, user_id, 1).await?;
    adjust_friends_count_tx(transaction, friend_id, 1).await?;

    Ok(())
}

/// Delete an accepted friendship and decrement both users' counters.
pub async fn remove_friendship_tx(
    transaction: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    friend_id: Uuid,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM friendships
        WHERE status = 'accepted'
          AND ((user_id = $1 AND friend_id = $2) OR (user_id = $2 AND friend_id = $1))
        "#,
    )
    .bind(user_id)
    .bind(friend_id)
    .execute(&mut **transaction)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(
            "No accepted friendship with this user".to_string(),
        ));
    }

    adjust_friends_count_tx(transaction, user_id, -1).await?;
    adjust_friends_count_tx(transaction, friend_id, -1).await?;

    Ok(())
}
