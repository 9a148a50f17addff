//! CSV parsing and the product/status filter.
//!
//! The feed is comma-delimited text with a required header row. Rows that do
//! not advertise the target product with ACTIVE status are dropped here —
//! they are neither imported nor reported as invalid.

use serde::{Deserialize, Serialize};

use pdsync_core::{ACTIVE_STATUS, TARGET_PRODUCT_NAME};

/// One feed row, field-for-field as it appeared in the source.
///
/// Every field is optional: the feed leaves columns blank freely, and a row
/// rejected by validation is reported back to the operator in exactly this
/// shape. Blank fields deserialize to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRow {
    pub centre_id: Option<String>,
    pub product_name: Option<String>,
    pub center_status: Option<String>,
    pub address_line1: Option<String>,
    pub suite_numbers: Option<String>,
    pub city: Option<String>,
    pub zip_or_postal_code: Option<String>,
    pub building_description: Option<String>,
    pub local_area_description: Option<String>,
    pub min_cost: Option<String>,
    pub total_building_size: Option<String>,
}

impl RawRow {
    /// Derives the unique key used for deduplication and upsert matching.
    #[must_use]
    pub fn source_identifier(&self) -> String {
        format!(
            "{}-{}",
            self.centre_id.as_deref().unwrap_or(""),
            self.product_name.as_deref().unwrap_or("")
        )
    }

    /// Whether this row survives the product/status filter. Both comparisons
    /// are exact string matches — the feed contract fixes the literals.
    #[must_use]
    pub fn is_qualifying(&self) -> bool {
        self.product_name.as_deref() == Some(TARGET_PRODUCT_NAME)
            && self.center_status.as_deref() == Some(ACTIVE_STATUS)
    }
}

/// Parses the feed text and returns qualifying rows in source order.
///
/// Source order matters downstream: the duplicate check is first-occurrence-
/// wins, so reordering here would change which of two duplicate rows is
/// accepted.
///
/// # Errors
///
/// Returns [`csv::Error`] if the feed is not structurally valid CSV — any
/// record whose field count disagrees with the header row. This is fatal to
/// the import — a half-parseable feed is not partially processed.
pub fn qualifying_rows(feed_text: &str) -> Result<Vec<RawRow>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(feed_text.as_bytes());

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<RawRow>() {
        let row = result?;
        if row.is_qualifying() {
            rows.push(row);
        } else {
            skipped += 1;
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "dropped non-qualifying feed rows");
    }

    Ok(rows)
}
