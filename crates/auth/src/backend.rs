//! Token-to-user resolution

use std::sync::Arc;

use sqlx::PgPool;

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::types::AuthIdentity;
use crate::verifier::TokenVerifier;

/// Authenticates bearer tokens and resolves them to registered users.
///
/// Shared across domain routers; each domain state exposes it via `FromRef`
/// so the `AuthUser` extractor can reach it.
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    verifier: Arc<TokenVerifier>,
}

impl AuthBackend {
    pub fn new(pool: PgPool, verifier: Arc<TokenVerifier>) -> Self {
        Self { pool, verifier }
    }

    /// Verify the token and load the matching local user.
    ///
    /// A valid token whose subject has no user row is rejected; signup
    /// creates the row before any authenticated endpoint is usable.
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = self.verifier.verify(token).await?;

        let user = sqlx::query_as::<_, AuthIdentity>(
            r#"
            SELECT id, cognito_sub, email, username, name
            FROM users
            WHERE cognito_sub = $1
            "#,
        )
        .bind(&claims.sub)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::UserNotFound)?;

        Ok(AuthContext { user })
    }
}
