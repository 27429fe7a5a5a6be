//! API layer for the Social domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::SocialState;
pub use routes::routes;
