//! Activity API handlers

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Pagination, Result};
use pitchside_storage::is_allowed_image;

use crate::api::middleware::TeamsState;
use crate::domain::entities::{Activity, ActivityPhoto, ActivityType};

/// Request for creating an activity
#[derive(Debug, Deserialize)]
pub struct CreateActivityRequest {
    pub team_id: Uuid,
    pub venue_id: Option<Uuid>,
    pub activity_type: ActivityType,
    pub description: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Response for an activity photo batch upload
#[derive(Debug, Serialize)]
pub struct ActivityPhotosResponse {
    pub photo_urls: Vec<String>,
    /// File names skipped for a disallowed content type
    pub skipped: Vec<String>,
}

/// Activity with its photos
#[derive(Debug, Serialize)]
pub struct ActivityDetail {
    #[serde(flatten)]
    pub activity: Activity,
    pub photos: Vec<ActivityPhoto>,
}

/// Create an activity
///
/// **POST /v1/activities**
///
/// Leader only. A referenced venue must exist.
pub async fn create_activity(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<(StatusCode, Json<Activity>)> {
    let team = state
        .repos
        .teams
        .get_by_id(request.team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !team.is_leader(auth.user_id()) {
        return Err(Error::Authorization(
            "Only the team leader can create activities".to_string(),
        ));
    }

    if let Some(venue_id) = request.venue_id {
        if state.repos.bookings.venue_rate(venue_id).await?.is_none() {
            return Err(Error::NotFound("Venue not found".to_string()));
        }
    }

    let activity = Activity::new(
        request.team_id,
        request.venue_id,
        request.activity_type,
        request.description,
        request.start_time,
        request.end_time,
    )?;

    let created = state.repos.activities.create(&activity).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get an activity with its photos
///
/// **GET /v1/activities/:id**
pub async fn get_activity(
    _auth: AuthUser,
    State(state): State<TeamsState>,
    Path(activity_id): Path<Uuid>,
) -> Result<Json<ActivityDetail>> {
    let activity = state
        .repos
        .activities
        .get_by_id(activity_id)
        .await?
        .ok_or_else(|| Error::NotFound("Activity not found".to_string()))?;

    let photos = state.repos.activities.list_photos(activity_id).await?;

    Ok(Json(ActivityDetail { activity, photos }))
}

/// List activities for a team
///
/// **GET /v1/teams/:team_id/activities**
pub async fn list_activities_for_team(
    _auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Activity>>> {
    if state.repos.teams.get_by_id(team_id).await?.is_none() {
        return Err(Error::NotFound("Team not found".to_string()));
    }

    let activities = state
        .repos
        .activities
        .list_for_team(team_id, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(activities))
}

/// Attach photos to an activity
///
/// **POST /uploads/activity-photos/:activity_id**
///
/// Team members only. Files with a disallowed content type are skipped
/// without failing the batch; zero accepted files is a validation error.
/// The accepted files are all-or-nothing: any upload failure rolls the batch
/// back, deleting already-stored blobs best-effort, and no rows are written.
pub async fn upload_activity_photos(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Path(activity_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ActivityPhotosResponse>)> {
    let activity = state
        .repos
        .activities
        .get_by_id(activity_id)
        .await?
        .ok_or_else(|| Error::NotFound("Activity not found".to_string()))?;

    let membership = state
        .repos
        .memberships
        .get_by_team_and_user(activity.team_id, auth.user_id())
        .await?;
    let is_member = membership.map(|m| m.is_active).unwrap_or(false);
    if !is_member {
        return Err(Error::Authorization(
            "Only team members can attach photos".to_string(),
        ));
    }

    let mut caption: Option<String> = None;
    let mut accepted: Vec<(Vec<u8>, String, String)> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.file_name().is_none() {
            if field.name() == Some("caption") {
                caption = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| Error::Validation(format!("Invalid caption: {}", e)))?,
                );
            }
            continue;
        }

        let file_name = field.file_name().unwrap_or("photo").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();

        if !is_allowed_image(&content_type) {
            skipped.push(file_name);
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::Validation(format!("Failed to read upload: {}", e)))?
            .to_vec();
        accepted.push((data, file_name, content_type));
    }

    if accepted.is_empty() {
        return Err(Error::Validation("No valid photos provided".to_string()));
    }

    let prefix = format!("activity-photos/{}", activity_id);
    let mut uploaded_urls: Vec<String> = Vec::with_capacity(accepted.len());

    for (data, file_name, content_type) in accepted {
        match state
            .storage
            .upload(data, &file_name, &content_type, &prefix, HashMap::new())
            .await
        {
            Ok(stored) => uploaded_urls.push(stored.url),
            Err(e) => {
                // Abort the whole batch, removing blobs stored so far
                for url in &uploaded_urls {
                    state.storage.delete(url).await;
                }
                return Err(Error::Internal(format!(
                    "Failed to store activity photo: {}",
                    e
                )));
            }
        }
    }

    let photos: Vec<ActivityPhoto> = uploaded_urls
        .iter()
        .map(|url| ActivityPhoto::new(activity_id, auth.user_id(), url.clone(), caption.clone()))
        .collect();

    if let Err(e) = state.repos.activities.add_photos(&photos).await {
        for url in &uploaded_urls {
            state.storage.delete(url).await;
        }
        return Err(e);
    }

    Ok((
        StatusCode::CREATED,
        Json(ActivityPhotosResponse {
            photo_urls: uploaded_urls,
            skipped,
        }),
    ))
}
