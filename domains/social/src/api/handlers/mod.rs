//! Social domain API handlers

pub mod auth;
pub mod friendships;
pub mod users;
