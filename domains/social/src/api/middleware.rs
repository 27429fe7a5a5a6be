//! Social domain state and auth backend integration

use crate::SocialRepositories;
use axum::extract::FromRef;
use pitchside_auth::{AuthBackend, IdentityProvider};
use pitchside_storage::ObjectStore;
use std::sync::Arc;

/// Application state for the Social domain
///
/// Carries the identity provider because account signup and login live here,
/// not behind the token extractor.
#[derive(Clone)]
pub struct SocialState {
    pub repos: SocialRepositories,
    pub auth: AuthBackend,
    pub identity: Arc<dyn IdentityProvider>,
    pub storage: Arc<dyn ObjectStore>,
}

impl FromRef<SocialState> for AuthBackend {
    fn from_ref(state: &SocialState) -> Self {
        state.auth.clone()
    }
}
