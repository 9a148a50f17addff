//! Transformation from a validated [`RawRow`] into a store-ready
//! [`NewListing`].
//!
//! All money/size arithmetic uses `Decimal` — the results land in
//! fixed-precision NUMERIC(8,2) columns and binary floating point would
//! drift on values like `10.764`.

use rust_decimal::{Decimal, RoundingStrategy};

use pdsync_core::{NewListing, MAXIMUM_SIZE, MINIMUM_SIZE, MINIMUM_TERM};

use crate::parse::RawRow;
use crate::validate::{is_blank, parse_decimal, RowDefect};

/// sqm → sqft conversion factor (10.764).
const SQM_TO_SQFT: Decimal = Decimal::from_parts(10_764, 0, 0, false, 3);

/// Rent rule fixed by the feed contract: `base_rent_per_month = min_cost / 80 * 12`.
const RENT_DIVISOR: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
const RENT_MONTHLY_FACTOR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Scale of the stored NUMERIC(8,2) money/size columns.
const STORED_SCALE: u32 = 2;

/// Maps a raw row to its normalized listing record.
///
/// Callers run [`crate::validate::validate`] first; the numeric re-parses
/// here return the same defects rather than panicking, so a missed
/// validation can never take the batch down.
pub(crate) fn transform(row: &RawRow) -> Result<NewListing, RowDefect> {
    let min_cost = parse_decimal(row.min_cost.as_deref())
        .ok_or_else(|| RowDefect::UnparseableMinCost(row.min_cost.clone().unwrap_or_default()))?;

    let building_size = if is_blank(row.total_building_size.as_deref()) {
        None
    } else {
        let sqm = parse_decimal(row.total_building_size.as_deref()).ok_or_else(|| {
            RowDefect::UnparseableBuildingSize(row.total_building_size.clone().unwrap_or_default())
        })?;
        Some(round_stored(sqm * SQM_TO_SQFT))
    };

    Ok(NewListing {
        source_identifier: row.source_identifier(),
        street_address: row.address_line1.clone().unwrap_or_default(),
        suite_number: row.suite_numbers.clone(),
        city: row.city.clone(),
        postal_code: row.zip_or_postal_code.clone(),
        listing_description: row.building_description.clone(),
        building_description: row.local_area_description.clone(),
        minimum_size: MINIMUM_SIZE,
        maximum_size: MAXIMUM_SIZE,
        minimum_term: MINIMUM_TERM,
        base_rent_per_month: round_stored(min_cost / RENT_DIVISOR * RENT_MONTHLY_FACTOR),
        status: row.center_status.clone().unwrap_or_default(),
        building_size,
    })
}

/// Rounds to the stored column scale. Midpoints round away from zero, the
/// same behavior Postgres applies when coercing into NUMERIC(8,2).
fn round_stored(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STORED_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row() -> RawRow {
        RawRow {
            centre_id: Some("first valid".to_string()),
            product_name: Some("Long Term Office - 1 Workstation".to_string()),
            center_status: Some("ACTIVE".to_string()),
            address_line1: Some("5201 Blue Lagoon Drive".to_string()),
            suite_numbers: None,
            city: Some("Miami".to_string()),
            zip_or_postal_code: Some("33126".to_string()),
            building_description: Some("building 1 description".to_string()),
            local_area_description: Some("local area 1 description".to_string()),
            min_cost: Some("335".to_string()),
            total_building_size: Some("30159.00".to_string()),
        }
    }

    #[test]
    fn maps_every_field_per_the_feed_contract() {
        let listing = transform(&raw_row()).expect("row should transform");

        assert_eq!(
            listing.source_identifier,
            "first valid-Long Term Office - 1 Workstation"
        );
        assert_eq!(listing.street_address, "5201 Blue Lagoon Drive");
        assert_eq!(listing.suite_number, None);
        assert_eq!(listing.city.as_deref(), Some("Miami"));
        assert_eq!(listing.postal_code.as_deref(), Some("33126"));
        assert_eq!(
            listing.listing_description.as_deref(),
            Some("building 1 description")
        );
        assert_eq!(
            listing.building_description.as_deref(),
            Some("local area 1 description")
        );
        assert_eq!(listing.status, "ACTIVE");
    }

    #[test]
    fn applies_the_fixed_size_and_term_constants() {
        let listing = transform(&raw_row()).expect("row should transform");

        assert_eq!(listing.minimum_size, 80);
        assert_eq!(listing.maximum_size, 1100);
        assert_eq!(listing.minimum_term, 1);
    }

    #[test]
    fn computes_monthly_rent_from_min_cost() {
        // 335 / 80 * 12 = 50.25
        let listing = transform(&raw_row()).expect("row should transform");
        assert_eq!(listing.base_rent_per_month, Decimal::new(5025, 2));
    }

    #[test]
    fn rent_rounds_to_two_decimal_places() {
        // 335.50 / 80 * 12 = 50.325, stored as 50.33
        let row = RawRow {
            min_cost: Some("335.50".to_string()),
            ..raw_row()
        };
        let listing = transform(&row).expect("row should transform");
        assert_eq!(listing.base_rent_per_month, Decimal::new(5033, 2));
    }

    #[test]
    fn computes_rent_from_scientific_notation_min_cost() {
        // 3.35e2 = 335 → 335 / 80 * 12 = 50.25
        let row = RawRow {
            min_cost: Some("3.35e2".to_string()),
            ..raw_row()
        };
        let listing = transform(&row).expect("row should transform");
        assert_eq!(listing.base_rent_per_month, Decimal::new(5025, 2));
    }

    #[test]
    fn converts_building_size_from_sqm_to_sqft() {
        // 30159.00 * 10.764 = 324631.476 → 324631.48 at stored scale
        let listing = transform(&raw_row()).expect("row should transform");
        assert_eq!(listing.building_size, Some(Decimal::new(32_463_148, 2)));
    }

    #[test]
    fn small_building_size_converts_exactly() {
        // 100 * 10.764 = 1076.40
        let row = RawRow {
            total_building_size: Some("100".to_string()),
            ..raw_row()
        };
        let listing = transform(&row).expect("row should transform");
        assert_eq!(listing.building_size, Some(Decimal::new(107_640, 2)));
    }

    #[test]
    fn blank_building_size_maps_to_none_not_zero() {
        for size in [None, Some(String::new()), Some("   ".to_string())] {
            let row = RawRow {
                total_building_size: size,
                ..raw_row()
            };
            let listing = transform(&row).expect("row should transform");
            assert_eq!(listing.building_size, None);
        }
    }

    #[test]
    fn unparseable_min_cost_is_a_defect_not_a_panic() {
        let row = RawRow {
            min_cost: Some("free!".to_string()),
            ..raw_row()
        };
        let defect = transform(&row).unwrap_err();
        assert!(matches!(defect, RowDefect::UnparseableMinCost(_)));
    }
}
