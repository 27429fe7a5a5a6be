//! Venues domain state and auth backend integration

use crate::VenuesRepositories;
use axum::extract::FromRef;
use pitchside_auth::AuthBackend;
use pitchside_storage::ObjectStore;
use std::sync::Arc;

/// Application state for the Venues domain
#[derive(Clone)]
pub struct VenuesState {
    pub repos: VenuesRepositories,
    pub auth: AuthBackend,
    pub storage: Arc<dyn ObjectStore>,
}

impl FromRef<VenuesState> for AuthBackend {
    fn from_ref(state: &VenuesState) -> Self {
        state.auth.clone()
    }
}
