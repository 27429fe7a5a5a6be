//! Venue photo API handlers

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Result};
use pitchside_storage::is_allowed_image;

use crate::api::middleware::VenuesState;
use crate::domain::entities::{Venue, VenuePhoto};
use crate::repository::transactions;

/// Response for a venue photo batch upload
#[derive(Debug, Serialize)]
pub struct VenuePhotosResponse {
    pub photo_urls: Vec<String>,
    /// File names skipped for a disallowed content type
    pub skipped: Vec<String>,
}

async fn load_venue_as_owner(state: &VenuesState, venue_id: Uuid, user_id: Uuid) -> Result<Venue> {
    let venue = state
        .repos
        .venues
        .get_by_id(venue_id)
        .await?
        .ok_or_else(|| Error::NotFound("Venue not found".to_string()))?;

    if !venue.is_owner(user_id) {
        return Err(Error::Authorization(
            "Only the venue owner can manage photos".to_string(),
        ));
    }

    Ok(venue)
}

/// List photos of a venue
///
/// **GET /v1/venues/:venue_id/photos**
pub async fn list_photos(
    _auth: AuthUser,
    State(state): State<VenuesState>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<Vec<VenuePhoto>>> {
    if state.repos.venues.get_by_id(venue_id).await?.is_none() {
        return Err(Error::NotFound("Venue not found".to_string()));
    }

    let photos = state.repos.photos.list_for_venue(venue_id).await?;
    Ok(Json(photos))
}

/// Upload photos to a venue
///
/// **POST /uploads/venue-photos/:venue_id**
///
/// Owner only. Disallowed content types are skipped without failing the
/// batch; zero accepted files is a validation error. Accepted files are
/// all-or-nothing: any upload failure rolls the batch back with best-effort
/// blob cleanup. An `is_primary` field makes the first accepted photo the
/// venue's primary, atomically with the inserts.
pub async fn upload_venue_photos(
    auth: AuthUser,
    State(state): State<VenuesState>,
    Path(venue_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<VenuePhotosResponse>)> {
    load_venue_as_owner(&state, venue_id, auth.user_id()).await?;

    let mut caption: Option<String> = None;
    let mut make_primary = false;
    let mut accepted: Vec<(Vec<u8>, String, String)> = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::Validation(format!("Invalid multipart body: {}", e)))?
    {
        if field.file_name().is_none() {
            match field.name() {
                Some("caption") => {
                    caption = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| Error::Validation(format!("Invalid caption: {}", e)))?,
                    );
                }
                Some("is_primary") => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| Error::Validation(format!("Invalid is_primary: {}", e)))?;
                    make_primary = value == "true" || value == "1";
                }
                _ => {}
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

    let prefix = format!("venue-photos/{}", venue_id);
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
                    "Failed to store venue photo: {}",
                    e
                )));
            }
        }
    }

    let photos: Vec<VenuePhoto> = uploaded_urls
        .iter()
        .map(|url| VenuePhoto::new(venue_id, url.clone(), caption.clone()))
        .collect();

    let insert_result: Result<()> = async {
        let mut tx = state.repos.begin().await?;
        for photo in &photos {
            transactions::insert_photo_tx(&mut tx, photo).await?;
        }
        if make_primary {
            transactions::set_primary_photo_tx(&mut tx, venue_id, photos[0].id).await?;
        }
        tx.commit().await?;
        Ok(())
    }
    .await;

    if let Err(e) = insert_result {
        for url in &uploaded_urls {
            state.storage.delete(url).await;
        }
        return Err(e);
    }

    Ok((
        StatusCode::CREATED,
        Json(VenuePhotosResponse {
            photo_urls: uploaded_urls,
            skipped,
        }),
    ))
}

/// Make a photo the venue's primary
///
/// **POST /v1/venues/:venue_id/photos/:photo_id/primary**
///
/// Owner only. The unset-all-then-set runs in one transaction, so at most
/// one primary photo per venue is ever observable.
pub async fn set_primary_photo(
    auth: AuthUser,
    State(state): State<VenuesState>,
    Path((venue_id, photo_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode> {
    load_venue_as_owner(&state, venue_id, auth.user_id()).await?;

    let mut tx = state.repos.begin().await?;
    transactions::set_primary_photo_tx(&mut tx, venue_id, photo_id)
        .await
        .map_err(|e| match e {
            pitchside_common::RepositoryError::NotFound => {
                Error::NotFound("Photo not found for this venue".to_string())
            }
            other => other.into(),
        })?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
