//! Authentication gateway for the Pitchside API
//!
//! Verifies Cognito bearer tokens against the user pool's JWKS (cached,
//! refreshed at most hourly), resolves the token subject to a local user row,
//! and exposes axum extractors that work with any domain state implementing
//! `FromRef<S>` for `AuthBackend`.
//!
//! Verification is fail-closed: a missing or invalid token rejects the
//! request with 401 at the extractor boundary.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwks;
mod provider;
mod types;
mod verifier;

pub use backend::AuthBackend;
pub use claims::CognitoClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use jwks::{Jwk, JwkSet, JwksCache, JWKS_REFRESH_INTERVAL};
pub use provider::{
    CognitoIdentityProvider, IdentityError, IdentityProvider, MockIdentityProvider, TokenSet,
};
pub use types::AuthIdentity;
pub use verifier::TokenVerifier;
