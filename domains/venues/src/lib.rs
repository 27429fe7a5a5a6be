//! Venues domain: venues, photos, reviews

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{
    insert_photo_tx, set_primary_photo_tx, RatingSummary, ReviewRepository, VenuePhotoRepository,
    VenueRepository, VenuesRepositories,
};

// Re-export API types
pub use api::routes;
pub use api::VenuesState;
