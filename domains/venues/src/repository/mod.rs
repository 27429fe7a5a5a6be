//! Repository layer for the Venues domain

pub mod photos;
pub mod reviews;
pub mod transactions;
pub mod venues;

pub use photos::VenuePhotoRepository;
pub use reviews::{RatingSummary, ReviewRepository};
pub use transactions::{insert_photo_tx, set_primary_photo_tx};
pub use venues::VenueRepository;

use sqlx::{PgPool, Postgres, Transaction};

/// All repositories for the Venues domain, sharing one pool
#[derive(Clone)]
pub struct VenuesRepositories {
    pub venues: VenueRepository,
    pub photos: VenuePhotoRepository,
    pub reviews: ReviewRepository,
    pool: PgPool,
}

impl VenuesRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            venues: VenueRepository::new(pool.clone()),
            photos: VenuePhotoRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a transaction for multi-row operations
    pub async fn begin(&self) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
