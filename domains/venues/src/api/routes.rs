//! Route definitions for the Venues domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{photos, reviews, venues};
use super::middleware::VenuesState;

/// Create venue management routes
fn venue_routes() -> Router<VenuesState> {
    Router::new()
        .route(
            "/v1/venues",
            get(venues::list_venues).post(venues::create_venue),
        )
        .route(
            "/v1/venues/{id}",
            get(venues::get_venue).patch(venues::update_venue),
        )
}

/// Create photo routes
fn photo_routes() -> Router<VenuesState> {
    Router::new()
        .route("/v1/venues/{venue_id}/photos", get(photos::list_photos))
        .route(
            "/v1/venues/{venue_id}/photos/{photo_id}/primary",
            post(photos::set_primary_photo),
        )
        .route(
            "/uploads/venue-photos/{venue_id}",
            post(photos::upload_venue_photos),
        )
}

/// Create review routes
fn review_routes() -> Router<VenuesState> {
    Router::new().route(
        "/v1/venues/{venue_id}/reviews",
        get(reviews::list_reviews).post(reviews::add_review),
    )
}

/// Create all Venues domain API routes
pub fn routes() -> Router<VenuesState> {
    Router::new()
        .merge(venue_routes())
        .merge(photo_routes())
        .merge(review_routes())
}
