//! Identity provider integration
//!
//! Signup, confirmation, and login delegate to Cognito through the
//! `IdentityProvider` trait so handlers can run against a mock in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Errors from the identity provider, normalized for API responses
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("An account with this email already exists")]
    UsernameExists,

    #[error("Password does not meet the pool's requirements")]
    InvalidPassword,

    #[error("Incorrect email or password")]
    NotAuthorized,

    #[error("Account is not confirmed")]
    UserNotConfirmed,

    #[error("Invalid confirmation code")]
    CodeMismatch,

    #[error("Confirmation code has expired")]
    CodeExpired,

    #[error("Identity provider error: {0}")]
    Service(String),
}

/// Tokens issued on a successful login or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: String,
    pub expires_in: i32,
}

/// User pool operations the API depends on
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Register a new account; returns the provider-assigned subject.
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, IdentityError>;

    /// Confirm a pending account with the emailed code.
    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError>;

    /// Exchange credentials for tokens.
    async fn login(&self, email: &str, password: &str) -> Result<TokenSet, IdentityError>;

    /// Exchange a refresh token for fresh access/id tokens.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, IdentityError>;
}

/// Cognito-backed implementation
pub struct CognitoIdentityProvider {
    client: aws_sdk_cognitoidentityprovider::Client,
    client_id: String,
}

impl CognitoIdentityProvider {
    pub async fn new(config: &AuthConfig) -> Self {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        Self {
            client: aws_sdk_cognitoidentityprovider::Client::new(&aws_config),
            client_id: config.client_id.clone(),
        }
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, IdentityError> {
        let email_attr = AttributeType::builder()
            .name("email")
            .value(email)
            .build()
            .map_err(|e| IdentityError::Service(e.to_string()))?;

        let output = self
            .client
            .sign_up()
            .client_id(&self.client_id)
            .username(email)
            .password(password)
            .user_attributes(email_attr)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_username_exists_exception() {
                    IdentityError::UsernameExists
                } else if service_error.is_invalid_password_exception() {
                    IdentityError::InvalidPassword
                } else {
                    tracing::error!(error = %service_error, "Cognito sign_up failed");
                    IdentityError::Service(service_error.to_string())
                }
            })?;

        Ok(output.user_sub().to_string())
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        self.client
            .confirm_sign_up()
            .client_id(&self.client_id)
            .username(email)
            .confirmation_code(code)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_code_mismatch_exception() {
                    IdentityError::CodeMismatch
                } else if service_error.is_expired_code_exception() {
                    IdentityError::CodeExpired
                } else {
                    tracing::error!(error = %service_error, "Cognito confirm_sign_up failed");
                    IdentityError::Service(service_error.to_string())
                }
            })?;

        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenSet, IdentityError> {
        let output = self
            .client
            .initiate_auth()
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", email)
            .auth_parameters("PASSWORD", password)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_not_authorized_exception() {
                    IdentityError::NotAuthorized
                } else if service_error.is_user_not_confirmed_exception() {
                    IdentityError::UserNotConfirmed
                } else if service_error.is_user_not_found_exception() {
                    // Same answer as a wrong password, no account probing
                    IdentityError::NotAuthorized
                } else {
                    tracing::error!(error = %service_error, "Cognito initiate_auth failed");
                    IdentityError::Service(service_error.to_string())
                }
            })?;

        token_set_from_auth_result(output.authentication_result())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, IdentityError> {
        let output = self
            .client
            .initiate_auth()
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::RefreshTokenAuth)
            .auth_parameters("REFRESH_TOKEN", refresh_token)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_not_authorized_exception() {
                    IdentityError::NotAuthorized
                } else {
                    tracing::error!(error = %service_error, "Cognito token refresh failed");
                    IdentityError::Service(service_error.to_string())
                }
            })?;

        token_set_from_auth_result(output.authentication_result())
    }
}

fn token_set_from_auth_result(
    result: Option<&aws_sdk_cognitoidentityprovider::types::AuthenticationResultType>,
) -> Result<TokenSet, IdentityError> {
    let result = result
        .ok_or_else(|| IdentityError::Service("No authentication result returned".to_string()))?;

    let access_token = result
        .access_token()
        .ok_or_else(|| IdentityError::Service("No access token returned".to_string()))?
        .to_string();

    Ok(TokenSet {
        access_token,
        id_token: result.id_token().map(str::to_string),
        refresh_token: result.refresh_token().map(str::to_string),
        token_type: result.token_type().unwrap_or("Bearer").to_string(),
        expires_in: result.expires_in(),
    })
}

/// In-memory provider for tests
#[derive(Default)]
pub struct MockIdentityProvider {
    /// email -> (password, sub, confirmed)
    accounts: Mutex<HashMap<String, MockAccount>>,
}

struct MockAccount {
    password: String,
    sub: String,
    confirmed: bool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a confirmed account directly
    pub fn with_confirmed_account(self, email: &str, password: &str, sub: &str) -> Self {
        self.accounts.lock().unwrap().insert(
            email.to_string(),
            MockAccount {
                password: password.to_string(),
                sub: sub.to_string(),
                confirmed: true,
            },
        );
        self
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<String, IdentityError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(IdentityError::UsernameExists);
        }
        let sub = uuid::Uuid::new_v4().to_string();
        accounts.insert(
            email.to_string(),
            MockAccount {
                password: password.to_string(),
                sub: sub.clone(),
                confirmed: false,
            },
        );
        Ok(sub)
    }

    async fn confirm_sign_up(&self, email: &str, code: &str) -> Result<(), IdentityError> {
        if code != "123456" {
            return Err(IdentityError::CodeMismatch);
        }
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(email) {
            Some(account) => {
                account.confirmed = true;
                Ok(())
            }
            None => Err(IdentityError::NotAuthorized),
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenSet, IdentityError> {
        let accounts = self.accounts.lock().unwrap();
        let account = accounts.get(email).ok_or(IdentityError::NotAuthorized)?;
        if account.password != password {
            return Err(IdentityError::NotAuthorized);
        }
        if !account.confirmed {
            return Err(IdentityError::UserNotConfirmed);
        }
        Ok(TokenSet {
            access_token: format!("mock-access-{}", account.sub),
            id_token: Some(format!("mock-id-{}", account.sub)),
            refresh_token: Some(format!("mock-refresh-{}", account.sub)),
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenSet, IdentityError> {
        let sub = refresh_token
            .strip_prefix("mock-refresh-")
            .ok_or(IdentityError::NotAuthorized)?;
        Ok(TokenSet {
            access_token: format!("mock-access-{sub}"),
            id_token: Some(format!("mock-id-{sub}")),
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expires_in: 3600,
        })
    }
}
