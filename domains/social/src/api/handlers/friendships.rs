//! Friendship API handlers
//!
//! One friendship row exists per user pair, in either direction. Only the
//! addressee of a pending request may respond to it; accepting increments
//! both users' `friends_count` in the same transaction as the status flip.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use pitchside_auth::AuthUser;
use pitchside_common::{Error, Result};

use crate::api::middleware::SocialState;
use crate::domain::entities::{Friendship, User};
use crate::domain::state::{FriendshipEvent, FriendshipStateMachine, FriendshipStatus, StateError};
use crate::repository::transactions;

/// Request for sending a friend request
#[derive(Debug, Deserialize)]
pub struct SendFriendRequest {
    pub user_id: Uuid,
}

/// Request for responding to a friend request
#[derive(Debug, Deserialize)]
pub struct RespondToRequest {
    pub action: FriendshipEvent,
}

/// List accepted friends of the current user
///
/// **GET /v1/friends**
pub async fn list_friends(
    auth: AuthUser,
    State(state): State<SocialState>,
) -> Result<Json<Vec<User>>> {
    let friends = state.repos.friendships.list_friends(auth.user_id()).await?;
    Ok(Json(friends))
}

/// List pending friend requests addressed to the current user
///
/// **GET /v1/friends/requests**
pub async fn list_pending_requests(
    auth: AuthUser,
    State(state): State<SocialState>,
) -> Result<Json<Vec<Friendship>>> {
    let requests = state
        .repos
        .friendships
        .list_pending_for_user(auth.user_id())
        .await?;
    Ok(Json(requests))
}

/// Send a friend request
///
/// **POST /v1/friends/requests**
///
/// Rejected with a conflict if any row already exists between the pair,
/// whatever its status or direction.
pub async fn send_friend_request(
    auth: AuthUser,
    State(state): State<SocialState>,
    Json(request): Json<SendFriendRequest>,
) -> Result<(StatusCode, Json<Friendship>)> {
    let sender_id = auth.user_id();
    let friendship = Friendship::new(sender_id, request.user_id)?;

    state
        .repos
        .users
        .get_by_id(request.user_id)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if state
        .repos
        .friendships
        .get_between(sender_id, request.user_id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "A friendship or pending request already exists with this user".to_string(),
        ));
    }

    let created = state.repos.friendships.create(&friendship).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Respond to a pending friend request
///
/// **POST /v1/friends/requests/:user_id**
///
/// The path segment names the requester. Accepting commits the status flip
/// and both counter increments atomically; reject and block only flip the
/// status.
pub async fn respond_to_request(
    auth: AuthUser,
    State(state): State<SocialState>,
    Path(requester_id): Path<Uuid>,
    Json(request): Json<RespondToRequest>,
) -> Result<Json<Friendship>> {
    let responder_id = auth.user_id();

    let mut friendship = state
        .repos
        .friendships
        .get_between(responder_id, requester_id)
        .await?
        .ok_or_else(|| Error::NotFound("Friend request not found".to_string()))?;

    if !friendship.is_addressee(responder_id) {
        return Err(Error::Authorization(
            "Only the addressee can respond to a friend request".to_string(),
        ));
    }

    let next = FriendshipStateMachine::transition(friendship.status, request.action)
        .map_err(|e: StateError| Error::Conflict(e.to_string()))?;

    match next {
        FriendshipStatus::Accepted => {
            let mut tx = state.repos.begin().await?;
            transactions::accept_friendship_tx(
                &mut tx,
                friendship.id,
                friendship.user_id,
                friendship.friend_id,
            )
            .await?;
            tx.commit().await?;
        }
        _ => {
            state
                .repos
                .friendships
                .set_status(friendship.id, next)
                .await?;
        }
    }

    friendship.status = next;
    Ok(Json(friendship))
}

/// Remove an accepted friend
///
/// **DELETE /v1/friends/:friend_id**
///
/// Deletes the accepted row in either direction and decrements both users'
/// counters in one transaction.
pub async fn remove_friend(
    auth: AuthUser,
    State(state): State<SocialState>,
    Path(friend_id): Path<Uuid>,
) -> Result<StatusCode> {
    let user_id = auth.user_id();
    if user_id == friend_id {
        return Err(Error::Validation(
            "Cannot remove yourself as a friend".to_string(),
        ));
    }

    let mut tx = state.repos.begin().await?;
    transactions::remove_friendship_tx(&mut tx, user_id, friend_id).await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
