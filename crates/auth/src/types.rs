//! Authenticated identity types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The locally registered user behind a verified token.
///
/// Loaded from the `users` table by `cognito_sub`; handlers that need the
/// full profile fetch it through the social domain.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub cognito_sub: String,
    pub email: String,
    pub username: String,
    pub name: Option<String>,
}
