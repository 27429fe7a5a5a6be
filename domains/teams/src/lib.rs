//! Teams domain: teams, memberships, bookings, activities

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{
    add_member_tx, adjust_teams_count_tx, create_team_tx, insert_membership_tx, remove_member_tx,
    update_team_tx, ActivityRepository, BookingRepository, MembershipRepository, TeamRepository,
    TeamsRepositories,
};

// Re-export API types
pub use api::routes;
pub use api::TeamsState;
