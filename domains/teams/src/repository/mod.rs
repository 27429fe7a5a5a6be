//! Repository layer for the Teams domain

pub mod activities;
pub mod bookings;
pub mod memberships;
pub mod teams;
pub mod transactions;

pub use activities::ActivityRepository;
pub use bookings::BookingRepository;
pub use memberships::MembershipRepository;
pub use teams::TeamRepository;
pub use transactions::{
    add_member_tx, adjust_teams_count_tx, create_team_tx, insert_membership_tx, remove_member_tx,
    update_team_tx,
};

use sqlx::{PgPool, Postgres, Transaction};

/// All repositories for the Teams domain, sharing one pool
#[derive(Clone)]
pub struct TeamsRepositories {
    pub teams: TeamRepository,
    pub memberships: MembershipRepository,
    pub bookings: BookingRepository,
    pub activities: ActivityRepository,
    pool: PgPool,
}

impl TeamsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            teams: TeamRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            activities: ActivityRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a transaction for multi-row operations
    pub async fn begin(&self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
