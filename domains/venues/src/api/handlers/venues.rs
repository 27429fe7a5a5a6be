//! Venue management API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Pagination, Patch, Result, ValidatedJson};

use crate::api::middleware::VenuesState;
use crate::domain::entities::{Venue, VenueStatus, VenueType};
use crate::repository::RatingSummary;

/// Request for creating a venue
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVenueRequest {
    /// Venue display name (1-200 chars)
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    pub description: Option<String>,

    #[serde(default)]
    pub venue_type: VenueType,

    pub address: Option<String>,
    pub city: Option<String>,

    pub price_per_hour: Option<Decimal>,
}

/// Request for updating a venue.
///
/// Absent fields are untouched; `"price_per_hour": null` makes bookings free.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateVenueRequest {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<Option<String>>,
    #[serde(default)]
    pub venue_type: Patch<VenueType>,
    #[serde(default)]
    pub status: Patch<VenueStatus>,
    #[serde(default)]
    pub address: Patch<Option<String>>,
    #[serde(default)]
    pub city: Patch<Option<String>>,
    #[serde(default)]
    pub latitude: Patch<Option<f64>>,
    #[serde(default)]
    pub longitude: Patch<Option<f64>>,
    #[serde(default)]
    pub contact_email: Patch<Option<String>>,
    #[serde(default)]
    pub contact_phone: Patch<Option<String>>,
    #[serde(default)]
    pub business_hours: Patch<Option<String>>,
    #[serde(default)]
    pub price_per_hour: Patch<Option<Decimal>>,
}

/// Venue with its computed rating aggregate
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub average_rating: Option<Decimal>,
    pub review_count: i64,
}

impl VenueDetail {
    fn new(venue: Venue, summary: RatingSummary) -> Self {
        Self {
            venue,
            average_rating: summary.average_rating,
            review_count: summary.review_count,
        }
    }
}

/// Create a venue
///
/// **POST /v1/venues**
///
/// The requester becomes owner.
pub async fn create_venue(
    auth: AuthUser,
    State(state): State<VenuesState>,
    ValidatedJson(request): ValidatedJson<CreateVenueRequest>,
) -> Result<(StatusCode, Json<Venue>)> {
    let venue = Venue::new(
        request.name,
        request.description,
        request.venue_type,
        request.address,
        request.city,
        auth.user_id(),
        request.price_per_hour,
    )?;

    let created = state.repos.venues.create(&venue).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get venue details, including the rating aggregate
///
/// **GET /v1/venues/:id**
pub async fn get_venue(
    _auth: AuthUser,
    State(state): State<VenuesState>,
    Path(venue_id): Path<Uuid>,
) -> Result<Json<VenueDetail>> {
    let venue = state
        .repos
        .venues
        .get_by_id(venue_id)
        .await?
        .ok_or_else(|| Error::NotFound("Venue not found".to_string()))?;

    let summary = state.repos.reviews.rating_summary(venue_id).await?;

    Ok(Json(VenueDetail::new(venue, summary)))
}

/// Update a venue
///
/// **PATCH /v1/venues/:id**
///
/// Owner only.
pub async fn update_venue(
    auth: AuthUser,
    State(state): State<VenuesState>,
    Path(venue_id): Path<Uuid>,
    Json(request): Json<UpdateVenueRequest>,
) -> Result<Json<Venue>> {
    let mut venue = state
        .repos
        .venues
        .get_by_id(venue_id)
        .await?
        .ok_or_else(|| Error::NotFound("Venue not found".to_string()))?;

    if !venue.is_owner(auth.user_id()) {
        return Err(Error::Authorization(
            "Only the venue owner can update the venue".to_string(),
        ));
    }

    if let Some(name) = request.name.get() {
        if name.is_empty() || name.len() > 200 {
            return Err(Error::Validation(
                "Venue name must be 1-200 characters".to_string(),
            ));
        }
    }

    if let Some(Some(price)) = request.price_per_hour.get() {
        if *price < Decimal::ZERO {
            return Err(Error::Validation(
                "price_per_hour cannot be negative".to_string(),
            ));
        }
    }

    request.name.apply(&mut venue.name);
    request.description.apply(&mut venue.description);
    request.venue_type.apply(&mut venue.venue_type);
    request.status.apply(&mut venue.status);
    request.address.apply(&mut venue.address);
    request.city.apply(&mut venue.city);
    request.latitude.apply(&mut venue.latitude);
    request.longitude.apply(&mut venue.longitude);
    request.contact_email.apply(&mut venue.contact_email);
    request.contact_phone.apply(&mut venue.contact_phone);
    request.business_hours.apply(&mut venue.business_hours);
    request.price_per_hour.apply(&mut venue.price_per_hour);

    let updated = state.repos.venues.update(&venue).await?;
    Ok(Json(updated))
}

/// List venues
///
/// **GET /v1/venues**
pub async fn list_venues(
    _auth: AuthUser,
    State(state): State<VenuesState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Venue>>> {
    let venues = state
        .repos
        .venues
        .list(pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(venues))
}
