//! Shared domain types for the PDS listing feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Only rows advertising this product are imported.
pub const TARGET_PRODUCT_NAME: &str = "Long Term Office - 1 Workstation";

/// Only rows with this `center_status` value are imported.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Fixed business rules of this feed format — every imported listing is a
/// one-workstation office with the same size band and minimum term. These are
/// not derived from feed data.
pub const MINIMUM_SIZE: i32 = 80;
pub const MAXIMUM_SIZE: i32 = 1100;
pub const MINIMUM_TERM: i32 = 1;

/// A normalized, store-ready listing record.
///
/// `source_identifier` is the unique key (`"{centre_id}-{product_name}"`)
/// used for intra-batch deduplication and for the upsert conflict target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub source_identifier: String,
    pub street_address: String,
    pub suite_number: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub listing_description: Option<String>,
    pub building_description: Option<String>,
    pub minimum_size: i32,
    pub maximum_size: i32,
    pub minimum_term: i32,
    pub base_rent_per_month: Decimal,
    pub status: String,
    /// Building size in sqft. `None` when the feed left the field blank —
    /// never zero.
    pub building_size: Option<Decimal>,
}

/// Aggregate outcome of one import run.
///
/// `PartialSuccess` means the run completed and stored every valid row but
/// rejected at least one row for operator review. Fatal conditions (bad URL,
/// unreachable feed, store failure) surface as errors, not as a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Success,
    PartialSuccess,
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportStatus::Success => write!(f, "success"),
            ImportStatus::PartialSuccess => write!(f, "partial_success"),
        }
    }
}
