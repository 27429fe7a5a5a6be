//! Venue review API handlers

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
use pitchside_common::{Error, Pagination, Result, ValidatedJson};

use crate::api::middleware::VenuesState;
use crate::domain::entities::VenueReview;

/// Request for adding a review
#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    pub comment: Option<String>,
}

/// Reviews with the computed aggregate
#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<VenueReview>,
    pub average_rating: Option<Decimal>,
    pub review_count: i64,
}

/// Add a review to a venue
///
/// **POST /v1/venues/:venue_id/reviews**
pub async fn add_review(
    auth: AuthUser,
    State(state): State<VenuesState>,
    Path(venue_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<AddReviewRequest>,
) -> Result<(StatusCode, Json<VenueReview>)> {
    if state.repos.venues.get_by_id(venue_id).await?.is_none() {
        return Err(Error::NotFound("Venue not found".to_string()));
    }

    let review = VenueReview::new(venue_id, auth.user_id(), request.rating, request.comment)?;

    let created = state.repos.reviews.create(&review).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// List reviews for a venue with the rating aggregate
///
/// **GET /v1/venues/:venue_id/reviews**
pub async fn list_reviews(
    _auth: AuthUser,
    State(state): State<VenuesState>,
    Path(venue_id): Path<Uuid>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<ReviewsResponse>> {
    if state.repos.venues.get_by_id(venue_id).await?.is_none() {
        return Err(Error::NotFound("Venue not found".to_string()));
    }

    let reviews = state
        .repos
        .reviews
        .list_for_venue(venue_id, pagination.offset(), pagination.limit())
        .await?;
    let summary = state.repos.reviews.rating_summary(venue_id).await?;

    Ok(Json(ReviewsResponse {
        reviews,
        average_rating: summary.average_rating,
        review_count: summary.review_count,
    }))
}
