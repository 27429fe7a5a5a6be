//! Team membership API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Result};

use crate::api::middleware::TeamsState;
use crate::domain::entities::Membership;
use crate::repository::transactions;

/// Request for adding a member to a team
#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
}

/// List active members of a team
///
/// **GET /v1/teams/:team_id/members**
pub async fn list_members(
    _auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<Membership>>> {
    if state.repos.teams.get_by_id(team_id).await?.is_none() {
        return Err(Error::NotFound("Team not found".to_string()));
    }

    let members = state.repos.memberships.list_active_for_team(team_id).await?;
    Ok(Json(members))
}

/// Add a member to a team
///
/// **POST /v1/teams/:team_id/members**
///
/// The capacity check, membership insert, and the member's `teams_count`
/// increment run in one transaction with the team row locked, so concurrent
/// adds cannot push a team past `max_members`.
pub async fn add_member(
    _auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<Membership>)> {
    if !state.repos.memberships.user_exists(request.user_id).await? {
        return Err(Error::NotFound("User not found".to_string()));
    }

    let mut tx = state.repos.begin().await?;
    let membership = transactions::add_member_tx(&mut tx, team_id, request.user_id).await?;
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(membership)))
}

/// Remove a member from a team
///
/// **DELETE /v1/teams/:team_id/members/:user_id**
///
/// Leader only. Removing the leader is a conflict; the membership delete and
/// the guarded `teams_count` decrement commit atomically.
pub async fn remove_member(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    let team = state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !team.is_leader(auth.user_id()) {
        return Err(Error::Authorization(
            "Only the team leader can remove members".to_string(),
        ));
    }

    if !state.repos.memberships.user_exists(user_id).await? {
        return Err(Error::NotFound("User not found".to_string()));
    }

    let mut tx = state.repos.begin().await?;
    transactions::remove_member_tx(&mut tx, team_id, user_id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
