//! Booking API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Pagination, Patch, Result};

use crate::api::middleware::TeamsState;
use crate::domain::entities::{Booking, BookingStatus, Team};

/// Request for creating a booking
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub venue_id: Uuid,
    pub team_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Request for updating a booking.
///
/// Presence-tracking semantics: a provided `false` or `0` is applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookingRequest {
    #[serde(default)]
    pub status: Patch<BookingStatus>,
    #[serde(default)]
    pub total_cost: Patch<Decimal>,
    #[serde(default)]
    pub payment_id: Patch<Option<String>>,
    #[serde(default)]
    pub is_paid: Patch<bool>,
}

async fn load_team_as_leader(state: &TeamsState, team_id: Uuid, user_id: Uuid) -> Result<Team> {
    let team = state
        .repos
        .teams
        .get_by_id(team_id)
        .await?
        .ok_or_else(|| Error::NotFound("Team not found".to_string()))?;

    if !team.is_leader(user_id) {
        return Err(Error::Authorization(
            "Only the team leader can manage bookings".to_string(),
        ));
    }

    Ok(team)
}

/// Create a booking
///
/// **POST /v1/bookings**
///
/// Leader only. `total_cost` is computed here, once, from the booked window
/// and the venue's current hourly price (zero when the venue has no price).
pub async fn create_booking(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    load_team_as_leader(&state, request.team_id, auth.user_id()).await?;

    let rate = state
        .repos
        .bookings
        .venue_rate(request.venue_id)
        .await?
        .ok_or_else(|| Error::NotFound("Venue not found".to_string()))?;

    let booking = Booking::new(
        request.venue_id,
        request.team_id,
        request.start_time,
        request.end_time,
        rate.price_per_hour,
    )?;

    let created = state.repos.bookings.create(&booking).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Get booking details
///
/// **GET /v1/bookings/:id**
pub async fn get_booking(
    _auth: AuthUser,
    State(state): State<TeamsState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>> {
    let booking = state
        .repos
        .bookings
        .get_by_id(booking_id)
        .await?
        .ok_or_else(|| Error::NotFound("Booking not found".to_string()))?;

    Ok(Json(booking))
}

/// Update a booking
///
/// **PATCH /v1/bookings/:id**
///
/// Leader of the booking's team only.
pub async fn update_booking(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Path(booking_id): Path<Uuid>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>> {
    let mut booking = state
        .repos
        .bookings
        .get_by_id(booking_id)
        .await?
        .ok_or_else(|| Error::NotFound("Booking not found".to_string()))?;

    load_team_as_leader(&state, booking.team_id, auth.user_id()).await?;

    request.status.apply(&mut booking.status);
    request.total_cost.apply(&mut booking.total_cost);
    request.payment_id.apply(&mut booking.payment_id);
    request.is_paid.apply(&mut booking.is_paid);

    let updated = state.repos.bookings.update(&booking).await?;
    Ok(Json(updated))
}

/// Cancel a booking
///
/// **DELETE /v1/bookings/:id**
///
/// Leader only. Soft cancel; cancelling a cancelled booking is a no-op.
pub async fn cancel_booking(
    auth: AuthUser,
    State(state): State<TeamsState>,
    Path(booking_id): Path<Uuid>,
) -> Result<StatusCode> {
    let booking = state
        .repos
        .bookings
        .get_by_id(booking_id)
        .await?
        .ok_or_else(|| Error::NotFound("Booking not found".to_string()))?;

    load_team_as_leader(&state, booking.team_id, auth.user_id()).await?;

    state
        .repos
        .bookings
        .set_status(booking_id, BookingStatus::Cancelled)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List bookings for a team
///
/// **GET /v1/teams/:team_id/bookings**
pub async fn list_bookings_for_team(
    _auth: AuthUser,
    State(state): State<TeamsState>,
    Path(team_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Booking>>> {
    if state.repos.teams.get_by_id(team_id).await?.is_none() {
        return Err(Error::NotFound("Team not found".to_string()));
    }

    let bookings = state
        .repos
        .bookings
        .list_for_team(team_id, pagination.offset(), pagination.limit())
        .await?;

    Ok(Json(bookings))
}
