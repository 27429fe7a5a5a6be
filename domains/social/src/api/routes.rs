//! Route definitions for the Social domain API

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{auth, friendships, users};
use super::middleware::SocialState;

/// Create account auth routes.
///
/// These are the only routes served without a bearer token.
fn auth_routes() -> Router<SocialState> {
    Router::new()
        .route("/v1/auth/signup", post(auth::signup))
        .route("/v1/auth/confirm", post(auth::confirm))
        .route("/v1/auth/login", post(auth::login))
        .route("/v1/auth/refresh", post(auth::refresh))
}

/// Create account profile routes
fn account_routes() -> Router<SocialState> {
    Router::new()
        .route(
            "/v1/account",
            get(users::get_account).patch(users::update_account),
        )
        .route("/v1/users/{id}", get(users::get_user))
        .route(
            "/uploads/profile-picture",
            post(users::upload_profile_picture),
        )
}

/// Create friendship routes
fn friendship_routes() -> Router<SocialState> {
    Router::new()
        .route("/v1/friends", get(friendships::list_friends))
        .route(
            "/v1/friends/requests",
            get(friendships::list_pending_requests).post(friendships::send_friend_request),
        )
        .route(
            "/v1/friends/requests/{user_id}",
            post(friendships::respond_to_request),
        )
        .route("/v1/friends/{friend_id}", delete(friendships::remove_friend))
}

/// Create all Social domain API routes
pub fn routes() -> Router<SocialState> {
    Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(friendship_routes())
}
