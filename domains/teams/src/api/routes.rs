//! Route definitions for the Teams domain API

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{activities, bookings, memberships, teams};
use super::middleware::TeamsState;

/// Create team management routes
fn team_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/v1/teams/{id}",
            get(teams::get_team)
                .patch(teams::update_team)
                .delete(teams::archive_team),
        )
}

/// Create team membership routes
fn membership_routes() -> Router<TeamsState> {
    Router::new()
        .route(
            "/v1/teams/{team_id}/members",
            get(memberships::list_members).post(memberships::add_member),
        )
        .route(
            "/v1/teams/{team_id}/members/{user_id}",
            delete(memberships::remove_member),
        )
}

/// Create booking routes
fn booking_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/bookings", post(bookings::create_booking))
        .route(
            "/v1/bookings/{id}",
            get(bookings::get_booking)
                .patch(bookings::update_booking)
                .delete(bookings::cancel_booking),
        )
        .route(
            "/v1/teams/{team_id}/bookings",
            get(bookings::list_bookings_for_team),
        )
}

/// Create activity routes
fn activity_routes() -> Router<TeamsState> {
    Router::new()
        .route("/v1/activities", post(activities::create_activity))
        .route("/v1/activities/{id}", get(activities::get_activity))
        .route(
            "/v1/teams/{team_id}/activities",
            get(activities::list_activities_for_team),
        )
}

/// Create media upload routes
fn upload_routes() -> Router<TeamsState> {
    Router::new()
        .route(
            "/uploads/team-photo/{team_id}",
            post(teams::upload_team_photo),
        )
        .route(
            "/uploads/activity-photos/{activity_id}",
            post(activities::upload_activity_photos),
        )
}

/// Create all Teams domain API routes
pub fn routes() -> Router<TeamsState> {
    Router::new()
        .merge(team_routes())
        .merge(membership_routes())
        .merge(booking_routes())
        .merge(activity_routes())
        .merge(upload_routes())
}
