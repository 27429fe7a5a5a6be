//! API handlers for the Venues domain

pub mod photos;
pub mod reviews;
pub mod venues;
