//! Cognito JWKS cache
//!
//! Fetches the user pool's JSON Web Key Set and caches it, refreshing at
//! most once per hour. Tokens signed with an unknown key id fail
//! verification until the next scheduled refresh.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::DecodingKey;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::error::AuthError;

/// Minimum interval between JWKS fetches
pub const JWKS_REFRESH_INTERVAL: Duration = Duration::from_secs(3600);

/// A single JSON Web Key (RSA components, base64url-encoded)
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kid: String,
    pub kty: String,
    pub n: String,
    pub e: String,
    #[serde(default)]
    pub alg: Option<String>,
    #[serde(default, rename = "use")]
    pub key_use: Option<String>,
}

/// JSON Web Key Set as served by Cognito
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}

struct CacheState {
    keys: JwkSet,
    fetched_at: Option<Instant>,
}

enum Source {
    Remote { url: String, http: reqwest::Client },
    /// Fixed key set, never refreshed. Used in tests.
    Static,
}

/// Cached JWKS lookup keyed by `kid`
#[derive(Clone)]
pub struct JwksCache {
    source: Arc<Source>,
    state: Arc<RwLock<CacheState>>,
}

impl JwksCache {
    /// Cache backed by the user pool's JWKS endpoint
    pub fn remote(url: String) -> Self {
        Self {
            source: Arc::new(Source::Remote {
                url,
                http: reqwest::Client::new(),
            }),
            state: Arc::new(RwLock::new(CacheState {
                keys: JwkSet::default(),
                fetched_at: None,
            })),
        }
    }

    /// Cache seeded with a fixed key set (tests, offline verification)
    pub fn from_static(keys: JwkSet) -> Self {
        Self {
            source: Arc::new(Source::Static),
            state: Arc::new(RwLock::new(CacheState {
                keys,
                fetched_at: Some(Instant::now()),
            })),
        }
    }

    /// Resolve a decoding key for a token's `kid`, refreshing the set when
    /// it is stale.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        {
            let state = self.state.read().await;
            let fresh = state
                .fetched_at
                .is_some_and(|at| at.elapsed() < JWKS_REFRESH_INTERVAL);
            if fresh {
                return match state.keys.find(kid) {
                    Some(jwk) => decoding_key_from_jwk(jwk),
                    None => Err(AuthError::InvalidToken),
                };
            }
        }

        self.refresh().await?;

        let state = self.state.read().await;
        match state.keys.find(kid) {
            Some(jwk) => decoding_key_from_jwk(jwk),
            None => Err(AuthError::InvalidToken),
        }
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        let Source::Remote { url, http } = self.source.as_ref() else {
            return Ok(());
        };

        let keys: JwkSet = http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch JWKS");
                AuthError::JwksUnavailable
            })?
            .json()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to parse JWKS");
                AuthError::JwksUnavailable
            })?;

        let mut state = self.state.write().await;
        state.keys = keys;
        state.fetched_at = Some(Instant::now());
        Ok(())
    }
}

fn decoding_key_from_jwk(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|e| {
        tracing::error!(error = %e, kid = %jwk.kid, "Malformed JWK in key set");
        AuthError::InvalidToken
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_set() -> JwkSet {
        // Modulus/exponent of a throwaway 2048-bit RSA key, base64url
        serde_json::from_str(
            r#"{"keys":[{
                "kid": "key-1",
                "kty": "RSA",
                "alg": "RS256",
                "use": "sig",
                "n": "xjlHQSs-qwGNEewHJAicsdWBJI7HyG1Vqkjr9ZFfFnZzFHRnPLLaHpnvrT78dzNAG7ghmxhlEsYWJLYYCtJ0yC56nc0wnmBmVKGBL0uC9NFt7eZRr5S5Y7T7kqbU2bj1EMpGTK8MxFnF0m2cf3Sf9XnQjxrGTFDtb33tdkvRk_2U8zANvZLJZvYzVYxj5vF0Tf0NwyFIN6ydAwVn6ZIQUOz0cfVCq6ZW6Es9ArMr0pUJ0SBsWeMqrmrCO3F5DRuhqkU4c0fPYC_vVnCzXJ7zdSxAYE9RkffuFcpuSfQ1mSkvoca1NMXbFyqbuzDQz3ZEXwMnqRRmEnjC0hXLYXH1-Q",
                "e": "AQAB"
            }]}"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_static_cache_resolves_known_kid() {
        let cache = JwksCache::from_static(fixture_set());
        assert!(cache.decoding_key("key-1").await.is_ok());
    }

    #[tokio::test]
    async fn test_static_cache_rejects_unknown_kid() {
        let cache = JwksCache::from_static(fixture_set());
        let err = cache.decoding_key("key-2").await.err().unwrap();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_jwk_set_parses_cognito_shape() {
        let set = fixture_set();
        assert_eq!(set.keys.len(), 1);
        assert_eq!(set.keys[0].key_use.as_deref(), Some("sig"));
    }
}
