//! Account auth API handlers
//!
//! Signup registers the account with the identity provider first, then
//! creates the local user row keyed by the returned subject. Login and
//! refresh are straight passthroughs returning the provider's token set.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::Validate;

use pitchside_auth::{IdentityError, TokenSet};
use pitchside_common::{Error, Result, ValidatedJson};

use crate::api::middleware::SocialState;
use crate::domain::entities::User;

/// Request for creating a new account
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email)]
    pub email: String,

    /// Cognito enforces the pool's full password policy; this only rejects
    /// obviously short ones before the round trip.
    #[validate(length(min = 8))]
    pub password: String,

    #[validate(length(min = 1, max = 50))]
    pub username: String,
}

/// Request for confirming a pending account
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub code: String,
}

/// Request for logging in
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

/// Request for refreshing tokens
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Response for a successful signup
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub user: User,
    pub confirmation_required: bool,
}

fn map_identity_error(error: IdentityError) -> Error {
    match error {
        IdentityError::UsernameExists => Error::Conflict(error.to_string()),
        IdentityError::InvalidPassword
        | IdentityError::CodeMismatch
        | IdentityError::CodeExpired => Error::Validation(error.to_string()),
        IdentityError::NotAuthorized | IdentityError::UserNotConfirmed => {
            Error::Authentication(error.to_string())
        }
        IdentityError::Service(message) => Error::Internal(message),
    }
}

/// Register a new account
///
/// **POST /v1/auth/signup**
pub async fn signup(
    State(state): State<SocialState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>)> {
    if state
        .repos
        .users
        .get_by_email(&request.email)
        .await?
        .is_some()
    {
        return Err(Error::Conflict(
            "An account with this email already exists".to_string(),
        ));
    }

    let sub = state
        .identity
        .sign_up(&request.email, &request.password)
        .await
        .map_err(map_identity_error)?;

    let user = User::new(sub, request.email, request.username)?;
    let created = state.repos.users.create(&user).await?;

    tracing::info!(user_id = %created.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: created,
            confirmation_required: true,
        }),
    ))
}

/// Confirm a pending account with the emailed code
///
/// **POST /v1/auth/confirm**
pub async fn confirm(
    State(state): State<SocialState>,
    ValidatedJson(request): ValidatedJson<ConfirmRequest>,
) -> Result<Json<Value>> {
    state
        .identity
        .confirm_sign_up(&request.email, &request.code)
        .await
        .map_err(map_identity_error)?;

    Ok(Json(json!({ "confirmed": true })))
}

/// Exchange credentials for tokens
///
/// **POST /v1/auth/login**
pub async fn login(
    State(state): State<SocialState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenSet>> {
    let tokens = state
        .identity
        .login(&request.email, &request.password)
        .await
        .map_err(map_identity_error)?;

    Ok(Json(tokens))
}

/// Exchange a refresh token for fresh access/id tokens
///
/// **POST /v1/auth/refresh**
pub async fn refresh(
    State(state): State<SocialState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenSet>> {
    let tokens = state
        .identity
        .refresh(&request.refresh_token)
        .await
        .map_err(map_identity_error)?;

    Ok(Json(tokens))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_error_mapping() {
        assert!(matches!(
            map_identity_error(IdentityError::UsernameExists),
            Error::Conflict(_)
        ));
        assert!(matches!(
            map_identity_error(IdentityError::InvalidPassword),
            Error::Validation(_)
        ));
        assert!(matches!(
            map_identity_error(IdentityError::NotAuthorized),
            Error::Authentication(_)
        ));
        assert!(matches!(
            map_identity_error(IdentityError::UserNotConfirmed),
            Error::Authentication(_)
        ));
        assert!(matches!(
            map_identity_error(IdentityError::CodeMismatch),
            Error::Validation(_)
        ));
        assert!(matches!(
            map_identity_error(IdentityError::Service("boom".to_string())),
            Error::Internal(_)
        ));
    }
}
