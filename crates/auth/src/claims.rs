//! JWT claims types

use serde::{Deserialize, Serialize};

/// Claims carried by Cognito-issued tokens.
///
/// Access tokens carry the app client in `client_id`; ID tokens carry it in
/// `aud`. Both carry the pool-scoped subject in `sub`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CognitoClaims {
    /// Subject: the Cognito user identifier
    pub sub: String,
    /// Issuer (the user pool URL)
    pub iss: String,
    /// Expires at
    pub exp: u64,
    /// Issued at
    pub iat: u64,
    /// "access" or "id"
    pub token_use: Option<String>,
    /// App client id (access tokens)
    pub client_id: Option<String>,
    /// Audience (ID tokens)
    pub aud: Option<String>,
    /// Email (ID tokens)
    pub email: Option<String>,
    /// Pool username
    #[serde(rename = "cognito:username")]
    pub username: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_claims_deserialize() {
        let json = r#"{
            "sub": "abc-123",
            "iss": "https://cognito-idp.eu-west-1.amazonaws.com/eu-west-1_Pool",
            "exp": 1900000000,
            "iat": 1800000000,
            "token_use": "access",
            "client_id": "client-1"
        }"#;
        let claims: CognitoClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.sub, "abc-123");
        assert_eq!(claims.client_id.as_deref(), Some("client-1"));
        assert!(claims.aud.is_none());
    }

    #[test]
    fn test_id_token_claims_deserialize() {
        let json = r#"{
            "sub": "abc-123",
            "iss": "https://cognito-idp.eu-west-1.amazonaws.com/eu-west-1_Pool",
            "exp": 1900000000,
            "iat": 1800000000,
            "token_use": "id",
            "aud": "client-1",
            "email": "player@example.com",
            "cognito:username": "player1"
        }"#;
        let claims: CognitoClaims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.aud.as_deref(), Some("client-1"));
        assert_eq!(claims.username.as_deref(), Some("player1"));
    }
}
