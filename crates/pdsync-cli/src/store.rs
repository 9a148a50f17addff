//! Postgres-backed [`ListingStore`] adapter.

use sqlx::PgPool;

use pdsync_core::NewListing;
use pdsync_feed::ListingStore;

pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ListingStore for PgListingStore {
    type Error = sqlx::Error;

    async fn upsert_all(&self, listings: &[NewListing]) -> Result<(), Self::Error> {
        let (new_count, updated_count) = pdsync_db::upsert_listings(&self.pool, listings).await?;
        tracing::info!(
            new = new_count,
            updated = updated_count,
            "synchronized listings"
        );
        Ok(())
    }
}
