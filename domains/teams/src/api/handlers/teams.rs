//! Team management API handlers

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Patch, Result, ValidatedJson};
use pitchside_storage::is_allowed_image;

use crate::api::middleware::TeamsState;
use crate::domain::entities::{Membership, Team, TeamStatus};
use crate::repository::transactions;

/// Request for creating a new team
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    /// Team display name (1-100 chars)
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub description: Option<String>,

    /// Team capacity; defaults to 10 when omitted
    #[validate(range(min = 2, max = 10))]
    pub max_members: Option<i32>,
}

/// Request for updating a team.
///
/// Absent fields are untouched; present fields are applied even when falsy,
/// and `"description": null` clears the description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTeamRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<Option<String>>,
    #[serde(default)]
    pub max_members: Patch<i32>,
}

/// Response for a team photo upload
#[derive(Debug, Serialize)]
pub struct TeamPhotoResponse {
    pub photo_url: String,
}

/// List teams for the current user
///
/// **GET /v1/teams**
pub async fn list_teams(
    auth: AuthUser,
    State(state): State<TeamsState>,
) -> Result<Json<Vec<Team>>> {
    let teams = state.repos.teams.list_for_user(auth.user_id()).await?;
    Ok(Json(teams))
}

/// Create a new team
///
/// **POST /v1/teams**
///
/// The requester becomes leader. Team insert, leader membership, and the
/// leader's `teams_count` increment commit atomically.
pub async fn create_team(
    auth: AuthUser,
    State(state): State<TeamsState>,
    ValidatedJson(request): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<Team>)> {
    let user_id = auth.user_id();
    let team = Team::new(
        request.name,
        request.description,
        request.max_members,
        user_id,
    )?;

    let mut tx = state.repos.begin().await?;

    let created = transactions::create_team_tx(&mut tx, &team).await?;
    let membership = Membership::new(created.id, user_id);
    transactions::insert_membership_tx(&mut tx, &membership).await?;
    transactions::adjust_teams_count_tx(&mut tx, user_id, 1).await?;

    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Get team details
///
/// **GET /v1/teams/:id**
pub async fn get_team(
    _auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Team>> {
    let team = state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    Ok(Json(team))
}

/// Update a team
///
/// **PATCH /v1/teams/:id**
///
/// Leader only. A `max_members` below the current active member count is a
/// conflict, never silently applied.
pub async fn update_team(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    Json(request): Json<UpdateTeamRequest>,
) -> Result<Json<Team>> {
    let mut team = state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !team.is_leader(auth.user_id()) {
        return Err(Error::Authorization(
            "Only the team leader can update the team".to_string(),
        ));
    }

    if let Some(name) = request.name.get() {
        if name.is_empty() || name.len() > 100 {
            return Err(Error::Validation(
                "Team name must be 1-100 characters".to_string(),
            ));
        }
    }

    request.name.apply(&mut team.name);
    request.description.apply(&mut team.description);
    request.max_members.apply(&mut team.max_members);

    // The member-count check for a lowered max_members runs under the team
    // row lock, serialized against concurrent member adds.
    let mut tx = state.repos.begin().await?;
    let updated = transactions::update_team_tx(&mut tx, &team).await?;
    tx.commit().await?;

    Ok(Json(updated))
}

/// Archive a team
///
/// **DELETE /v1/teams/:id**
///
/// Leader only. Soft delete; archiving an archived team is a no-op.
pub async fn archive_team(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
) -> Result<StatusCode> {
    let team = state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !team.is_leader(auth.user_id()) {
        return Err(Error::Authorization(
            "Only the team leader can archive the team".to_string(),
        ));
    }

    state
        .repos
        .teams
        .set_status(team_id, TeamStatus::Archived)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Upload or replace the team photo
///
/// **POST /uploads/team-photo/:team_id**
///
/// Leader only, image content types only. The previous blob is deleted
/// best-effort after the new one is stored.
pub async fn upload_team_photo(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<TeamPhotoResponse>> {
    let team = state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !team.is_leader(auth.user_id()) {
        return Err(Error::Authorization(
            "Only the team leader can change the team photo".to_string(),
        ));
    }

    let mut file: Option<(Vec<u8>, String, String)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().unwrap_or("photo").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Validation(format!("Failed to read upload: {}", e)))?
            .to_vec();
        file = Some((data, file_name, content_type));
        break;
    }

    let (data, file_name, content_type) =
        file.ok_or_else(|| Error::Validation("No file provided".to_string()))?;

    if !is_allowed_image(&content_type) {
        return Err(Error::Validation(format!(
            "Unsupported content type: {}",
            content_type
        )));
    }

    let stored = state
        .storage
        .upload(
            data,
            &file_name,
            &content_type,
            &format!("team-photos/{}", team_id),
            HashMap::new(),
        )
        .await
        .map_err(|e| Error::Internal(format!("Failed to store team photo: {}", e)))?;

    if let Some(old_url) = &team.team_photo {
        // Best-effort delete of the replaced blob
        state.storage.delete(old_url).await;
    }

    state.repos.teams.set_photo(team_id, &stored.url).await?;

    Ok(Json(TeamPhotoResponse {
        photo_url: stored.url,
    }))
}
