//! Transactional free functions for the Teams domain
//!
//! Multi-row invariants (capacity, denormalized counters) are enforced here,
//! inside a caller-owned transaction, with the team row locked for the
//! duration of the check-then-insert.

use crate::domain::entities::{Membership, Team};
use pitchside_common::{Error, RepositoryError, Result};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Insert a team row within an existing transaction.
pub async fn create_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> std::result::Result<Team, sqlx::Error> {
    let created = sqlx::query_as::<_, Team>(
        r#"
        INSERT INTO teams (id, name, description, team_photo, max_members,
                           leader_id, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, description, team_photo, max_members, leader_id,
                  status, created_at
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.description)
    .bind(&team.team_photo)
    .bind(team.max_members)
    .bind(team.leader_id)
    .bind(team.status)
    .bind(team.created_at)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(created)
}

/// Insert a membership row within an existing transaction.
pub async fn insert_membership_tx(
    transaction: &mut Transaction<'_, Postgres>,
    membership: &Membership,
) -> std::result::Result<Membership, sqlx::Error> {
    let created = sqlx::query_as::<_, Membership>(
        r#"
        INSERT INTO team_members (id, team_id, user_id, joined_at, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, team_id, user_id, joined_at, is_active
        "#,
    )
    .bind(membership.id)
    .bind(membership.team_id)
    .bind(membership.user_id)
    .bind(membership.joined_at)
    .bind(membership.is_active)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(created)
}

/// Adjust a user's denormalized `teams_count` within an existing transaction.
///
/// Decrements are guarded: a decrement that would go below zero matches no
/// row and surfaces as `CounterDesync`, never a silent clamp.
pub async fn adjust_teams_count_tx(
    transaction: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    delta: i32,
) -> std::result::Result<(), RepositoryError> {
    let result = if delta >= 0 {
        sqlx::query("UPDATE users SET teams_count = teams_count + $2 WHERE id = $1")
            .bind(user_id)
            .bind(delta)
            .execute(&mut **transaction)
            .await?
    } else {
        sqlx::query(
            r#"
            UPDATE users SET teams_count = teams_count + $2
            WHERE id = $1 AND teams_count + $2 >= 0
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
                "teams_count for user {} would go below zero",
                user_id
            )));
        }
        return Err(RepositoryError::NotFound);
    }
    Ok(())
}

/// Lock a team row for the remainder of the transaction.
async fn lock_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<Option<Team>, sqlx::Error> {
    sqlx::query_as::<_, Team>(
        r#"
        SELECT id, name, description, team_photo, max_members, leader_id,
               status, created_at
        FROM teams
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(team_id)
    .fetch_optional(&mut **transaction)
    .await
}

async fn count_active_members_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
) -> std::result::Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE team_id = $1 AND is_active")
        .bind(team_id)
        .fetch_one(&mut **transaction)
        .await
}

/// Apply edits to a team under its row lock.
///
/// A lowered `max_members` is checked against the active member count inside
/// the same transaction; `add_member_tx` takes the same lock, so no member
/// can slip in between the count and the write.
pub async fn update_team_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team: &Team,
) -> Result<Team> {
    let current = lock_team_tx(transaction, team.id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if team.max_members != current.max_members {
        Team::validate_max_members(team.max_members)?;
        let active = count_active_members_tx(transaction, team.id).await?;
        if (team.max_members as i64) < active {
            return Err(Error::Conflict(format!(
                "max_members cannot be lower than the current member count ({})",
                active
            )));
        }
    }

    let updated = sqlx::query_as::<_, Team>(
        r#"
        UPDATE teams
        SET name = $2, description = $3, max_members = $4
        WHERE id = $1
        RETURNING id, name, description, team_photo, max_members, leader_id,
                  status, created_at
        "#,
    )
    .bind(team.id)
    .bind(&team.name)
    .bind(&team.description)
    .bind(team.max_members)
    .fetch_one(&mut **transaction)
    .await?;

    Ok(updated)
}

/// Add a member to a team, enforcing capacity under the team row lock.
///
/// The lock serializes concurrent adds against the same team, so the count
/// checked here cannot change before the insert commits.
pub async fn add_member_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<Membership> {
    let team = lock_team_tx(transaction, team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    let existing: Option<bool> = sqlx::query_scalar(
        "SELECT is_active FROM team_members WHERE team_id = $1 AND user_id = $2",
    )
    .bind(team_id)
    .bind(user_id)
    .fetch_optional(&mut **transaction)
    .await?;

    if existing.is_some() {
        return Err(Error::Conflict(
            "User is already a member of this team".to_string(),
        ));
    }

    let active = count_active_members_tx(transaction, team_id).await?;
    if active >= team.max_members as i64 {
        return Err(Error::Conflict("Team is at capacity".to_string()));
    }

    let membership = Membership::new(team_id, user_id);
    let created = insert_membership_tx(transaction, &membership).await?;

    adjust_teams_count_tx(transaction, user_id, 1).await?;

    Ok(created)
}

/// Remove a member from a team and decrement their `teams_count`.
///
/// The leader cannot be removed. Runs under the team row lock for symmetry
/// with `add_member_tx`.
pub async fn remove_member_tx(
    transaction: &mut Transaction<'_, Postgres>,
    team_id: Uuid,
    user_id: Uuid,
) -> Result<()> {
    let team = lock_team_tx(transaction, team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if team.leader_id == user_id {
        return Err(Error::Conflict(
            "The team leader cannot be removed".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
        .bind(team_id)
        .bind(user_id)
        .execute(&mut **transaction)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::Conflict(
            "User is not a member of this team".to_string(),
        ));
    }

    adjust_teams_count_tx(transaction, user_id, -1).await?;

    Ok(())
}
