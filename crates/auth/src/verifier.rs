//! Bearer token verification against the Cognito user pool

use axum::http::HeaderValue;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use crate::claims::CognitoClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::jwks::JwksCache;

/// Verifies RS256 tokens using the pool's cached JWKS.
#[derive(Clone)]
pub struct TokenVerifier {
    config: AuthConfig,
    jwks: JwksCache,
}

impl TokenVerifier {
    pub fn new(config: AuthConfig, jwks: JwksCache) -> Self {
        Self { config, jwks }
    }

    /// Verify signature, expiry, issuer, and app client; return the claims.
    pub async fn verify(&self, token: &str) -> Result<CognitoClaims, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!(error = %e, "Malformed token header");
            AuthError::InvalidToken
        })?;
        let kid = header.kid.ok_or(AuthError::InvalidToken)?;

        let decoding_key = self.jwks.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer()]);
        // Access tokens carry the app client in `client_id`, not `aud`;
        // checked explicitly below for both token kinds.
        validation.validate_aud = false;

        let token_data =
            decode::<CognitoClaims>(token, &decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                AuthError::InvalidToken
            })?;

        let claims = token_data.claims;
        let client_matches = claims.aud.as_deref() == Some(self.config.client_id.as_str())
            || claims.client_id.as_deref() == Some(self.config.client_id.as_str());
        if !client_matches {
            tracing::debug!("Token issued for a different app client");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    if let Some(token) = header_str.strip_prefix("Bearer ") {
        Ok(token.to_string())
    } else {
        Err(AuthError::InvalidAuthorizationFormat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwks::JwkSet;

    #[test]
    fn test_extract_bearer_token() {
        // Valid bearer token
        let header = HeaderValue::from_static("Bearer abc123");
        let result = extract_bearer_token(&header);
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "abc123");

        // Missing scheme
        let header = HeaderValue::from_static("abc123");
        assert!(extract_bearer_token(&header).is_err());

        // Basic auth (wrong type)
        let header = HeaderValue::from_static("Basic abc123");
        assert!(extract_bearer_token(&header).is_err());
    }

    #[tokio::test]
    async fn test_malformed_token_rejected() {
        let config = AuthConfig {
            region: "eu-west-1".to_string(),
            user_pool_id: "eu-west-1_Pool".to_string(),
            client_id: "client-1".to_string(),
        };
        let verifier = TokenVerifier::new(config, JwksCache::from_static(JwkSet::default()));

        let result = verifier.verify("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_token_without_kid_rejected() {
        let config = AuthConfig {
            region: "eu-west-1".to_string(),
            user_pool_id: "eu-west-1_Pool".to_string(),
            client_id: "client-1".to_string(),
        };
        let verifier = TokenVerifier::new(config, JwksCache::from_static(JwkSet::default()));

        // Structurally valid JWT (header.payload.signature) with no kid
        let token = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJ4In0.c2ln";
        let result = verifier.verify(token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }
}
