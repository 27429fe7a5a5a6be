//! Account profile API handlers

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Patch, Result};
use pitchside_storage::is_allowed_image;

use crate::api::middleware::SocialState;
use crate::domain::entities::{Gender, User};

/// Request for updating the current user's profile.
///
/// Absent fields are untouched; `"bio": null` clears the bio.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Patch<String>,
    #[serde(default)]
    pub name: Patch<Option<String>>,
    #[serde(default)]
    pub dob: Patch<Option<NaiveDate>>,
    #[serde(default)]
    pub gender: Patch<Option<Gender>>,
    #[serde(default)]
    pub bio: Patch<Option<String>>,
    #[serde(default)]
    pub location: Patch<Option<String>>,
}

/// Response for a profile picture upload
#[derive(Debug, Serialize)]
pub struct ProfilePictureResponse {
    pub profile_pic: String,
}

/// Get the current user's profile
///
/// **GET /v1/account**
pub async fn get_account(
    auth: AuthUser,
    State(state): State<SocialState>,
) -> Result<Json<User>> {
    let user = state
        .repos
        .users
        .get_by_id(auth.user_id())
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Get another user's profile
///
/// **GET /v1/users/:id**
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<SocialState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<User>> {
    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Update the current user's profile
///
/// **PATCH /v1/account**
pub async fn update_account(
    auth: AuthUser,
    State(state): State<SocialState>,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    let mut user = state
        .repos
        .users
        .get_by_id(auth.user_id())
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if let Some(username) = request.username.get() {
        if username.is_empty() || username.len() > 50 {
            return Err(Error::Validation(
                "Username must be 1-50 characters".to_string(),
            ));
        }
    }

    request.username.apply(&mut user.username);
    request.name.apply(&mut user.name);
    request.dob.apply(&mut user.dob);
    request.gender.apply(&mut user.gender);
    request.bio.apply(&mut user.bio);
    request.location.apply(&mut user.location);

    let updated = state.repos.users.update(&user).await?;
    Ok(Json(updated))
}

/// Upload or replace the current user's profile picture
///
/// **POST /uploads/profile-picture**
///
/// Image content types only. The previous blob is deleted best-effort after
/// the new one is stored.
pub async fn upload_profile_picture(
    auth: AuthUser,
    State(state): State<SocialState>,
    mut multipart: Multipart,
) -> Result<Json<ProfilePictureResponse>> {
    let user_id = auth.user_id();
    let user = state
        .repos
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

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
            &format!("profile-pictures/{}", user_id),
            HashMap::new(),
        )
        .await
        .map_err(|e| Error::Internal(format!("Failed to store profile picture: {}", e)))?;

    if let Some(old_url) = &user.profile_pic {
        // Best-effort delete of the replaced blob
        state.storage.delete(old_url).await;
    }

    state
        .repos
        .users
        .set_profile_pic(user_id, &stored.url)
        .await?;

    Ok(Json(ProfilePictureResponse {
        profile_pic: stored.url,
    }))
}
