//! Storage seam for the import pipeline.

use std::future::Future;

use pdsync_core::NewListing;

/// Capability to bulk-synchronize normalized listings keyed by
/// `source_identifier`.
///
/// Contract: for each record, insert a new stored entity when no existing
/// entity shares the key, otherwise overwrite ALL of that entity's non-key
/// mapped fields with the new values — a full replace, not a merge. Any
/// failure is fatal to the import and propagates to the caller.
///
/// The pipeline never calls this with an empty batch.
pub trait ListingStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn upsert_all(
        &self,
        listings: &[NewListing],
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
