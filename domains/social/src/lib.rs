//! Social domain: users, friendships, account auth

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::state::{FriendshipEvent, FriendshipStateMachine, FriendshipStatus, StateError};

// Re-export repository types
pub use repository::{
    accept_friendship_tx, adjust_friends_count_tx, remove_friendship_tx, FriendshipRepository,
    SocialRepositories, UserRepository,
};

// Re-export API types
pub use api::routes;
pub use api::SocialState;
