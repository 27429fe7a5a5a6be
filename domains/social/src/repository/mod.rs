//! Repository layer for the Social domain

pub mod friendships;
pub mod transactions;
pub mod users;

pub use friendships::FriendshipRepository;
pub use transactions::{accept_friendship_tx, adjust_friends_count_tx, remove_friendship_tx};
pub use users::UserRepository;

use sqlx::{PgPool, Postgres, Transaction};

/// All repositories for the Social domain, sharing one pool
#[derive(Clone)]
pub struct SocialRepositories {
    pub users: UserRepository,
    pub friendships: FriendshipRepository,
    pool: PgPool,
}

impl SocialRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            friendships: FriendshipRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a transaction for multi-row operations
    pub async fn begin(&self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
