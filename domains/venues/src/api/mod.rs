//! API layer for the Venues domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::VenuesState;
pub use routes::routes;
