//! Request authentication context

use uuid::Uuid;

use crate::types::AuthIdentity;

/// Authentication context resolved for a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}
