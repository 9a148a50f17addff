//! Full import orchestration: validate URL → fetch → parse/filter →
//! validate/transform per row → upsert → aggregate status.
//!
//! One invocation is one pass over the feed. Nothing survives between
//! invocations — the duplicate-check accumulator is local to the call.

use std::collections::HashSet;

use pdsync_core::{ImportStatus, NewListing};

use crate::error::ImportError;
use crate::fetch::{validate_feed_url, FeedSource};
use crate::parse::{qualifying_rows, RawRow};
use crate::store::ListingStore;
use crate::transform::transform;
use crate::validate::validate;

/// Outcome of one completed import run.
///
/// `invalid_rows` carries each rejected row verbatim, in feed order, for
/// operator follow-up. Rows dropped by the product/status filter are not
/// in here — they were never candidates.
#[derive(Debug)]
pub struct ImportReport {
    pub status: ImportStatus,
    pub invalid_rows: Vec<RawRow>,
}

/// Runs a full feed import against the given source and store.
///
/// Row-level defects (blank address, unparseable numbers, intra-batch
/// duplicates) divert the row into the report and processing continues.
/// The upsert is skipped entirely when no rows were accepted, so a feed
/// with zero qualifying rows touches nothing.
///
/// # Errors
///
/// - [`ImportError::Feed`] — the URL is not a valid HTTPS URL (checked
///   before any network access) or the feed could not be fetched.
/// - [`ImportError::Csv`] — the feed body is not structurally valid CSV.
/// - [`ImportError::Store`] — the store rejected the batch.
///
/// On any of these, no partial report is produced.
pub async fn run_import<F, S>(
    feed_url: &str,
    source: &F,
    store: &S,
) -> Result<ImportReport, ImportError>
where
    F: FeedSource,
    S: ListingStore,
{
    let url = validate_feed_url(feed_url)?;
    let feed_text = source.fetch(&url).await?;
    let rows = qualifying_rows(&feed_text)?;

    let mut listings: Vec<NewListing> = Vec::with_capacity(rows.len());
    let mut invalid_rows: Vec<RawRow> = Vec::new();
    let mut accepted_identifiers: HashSet<String> = HashSet::with_capacity(rows.len());

    for row in rows {
        match validate(&row, &accepted_identifiers).and_then(|()| transform(&row)) {
            Ok(listing) => {
                accepted_identifiers.insert(listing.source_identifier.clone());
                listings.push(listing);
            }
            Err(defect) => {
                tracing::debug!(
                    identifier = %row.source_identifier(),
                    %defect,
                    "rejecting feed row"
                );
                invalid_rows.push(row);
            }
        }
    }

    if !listings.is_empty() {
        store
            .upsert_all(&listings)
            .await
            .map_err(|e| ImportError::Store(Box::new(e)))?;
    }

    let status = if invalid_rows.is_empty() {
        ImportStatus::Success
    } else {
        ImportStatus::PartialSuccess
    };

    tracing::info!(
        accepted = listings.len(),
        rejected = invalid_rows.len(),
        %status,
        "feed import finished"
    );

    Ok(ImportReport {
        status,
        invalid_rows,
    })
}
