//! Pitchside application composition root
//!
//! Composes all domain routers into a single application.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use pitchside_auth::{
    AuthBackend, AuthConfig, CognitoIdentityProvider, IdentityProvider, JwksCache, TokenVerifier,
};
use pitchside_common::config::Config;
use pitchside_social::SocialState;
use pitchside_storage::{ObjectStore, S3ObjectStore, StorageConfig};
use pitchside_teams::TeamsState;
use pitchside_venues::VenuesState;

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth_config = AuthConfig {
        region: config.cognito_region.clone(),
        user_pool_id: config.cognito_user_pool_id.clone(),
        client_id: config.cognito_client_id.clone(),
    };

    let jwks = JwksCache::remote(auth_config.jwks_url());
    let verifier = Arc::new(TokenVerifier::new(auth_config.clone(), jwks));
    let auth = AuthBackend::new(pool.clone(), verifier);

    let storage: Arc<dyn ObjectStore> = Arc::new(
        S3ObjectStore::new(StorageConfig {
            bucket: config.s3_bucket.clone(),
            region: config.s3_region.clone(),
            endpoint_url: config.s3_endpoint_url.clone(),
        })
        .await?,
    );

    let identity: Arc<dyn IdentityProvider> =
        Arc::new(CognitoIdentityProvider::new(&auth_config).await);

    let social_state = SocialState {
        repos: pitchside_social::SocialRepositories::new(pool.clone()),
        auth: auth.clone(),
        identity,
        storage: storage.clone(),
    };

    let teams_state = TeamsState {
        repos: pitchside_teams::TeamsRepositories::new(pool.clone()),
        auth: auth.clone(),
        storage: storage.clone(),
    };

    let venues_state = VenuesState {
        repos: pitchside_venues::VenuesRepositories::new(pool),
        auth,
        storage,
    };

    Ok(router(social_state, teams_state, venues_state))
}

/// Compose domain routers over already-built states.
///
/// Split out from [`create_app`] so tests can inject mock identity and
/// storage implementations.
pub fn router(
    social_state: SocialState,
    teams_state: TeamsState,
    venues_state: VenuesState,
) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(pitchside_social::routes().with_state(social_state))
        .merge(pitchside_teams::routes().with_state(teams_state))
        .merge(pitchside_venues::routes().with_state(venues_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
