//! Authentication configuration

/// Cognito user pool configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub region: String,
    pub user_pool_id: String,
    pub client_id: String,
}

impl AuthConfig {
    /// JWKS endpoint for the configured user pool
    pub fn jwks_url(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}/.well-known/jwks.json",
            self.region, self.user_pool_id
        )
    }

    /// Issuer string Cognito embeds in tokens for this pool
    pub fn issuer(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }
}
