//! Row validation.
//!
//! Validation is order-dependent within one import: each row is checked
//! against the set of identifiers accepted so far, so the first occurrence
//! of a duplicated identifier wins and every later one is rejected. Numeric
//! parse failures are row defects, never fatal errors.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::parse::RawRow;

/// Why a single row was rejected. Used for structured logging; the operator
/// report carries the original [`RawRow`], not this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RowDefect {
    DuplicateIdentifier(String),
    MissingStreetAddress,
    UnparseableMinCost(String),
    UnparseableBuildingSize(String),
}

impl std::fmt::Display for RowDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowDefect::DuplicateIdentifier(id) => {
                write!(f, "duplicate source identifier \"{id}\" in this batch")
            }
            RowDefect::MissingStreetAddress => write!(f, "address_line1 is blank"),
            RowDefect::UnparseableMinCost(raw) => {
                write!(f, "min_cost \"{raw}\" is not a finite decimal")
            }
            RowDefect::UnparseableBuildingSize(raw) => {
                write!(f, "total_building_size \"{raw}\" is not a finite decimal")
            }
        }
    }
}

/// Checks one qualifying row against the batch state accumulated so far.
///
/// A row is valid iff its derived identifier has not been accepted yet,
/// `address_line1` is non-blank, `min_cost` parses as a decimal, and
/// `total_building_size` is blank or parses as a decimal. `Decimal` has no
/// NaN or infinity representation, so parse success doubles as the
/// finiteness check.
pub(crate) fn validate(
    row: &RawRow,
    accepted_identifiers: &HashSet<String>,
) -> Result<(), RowDefect> {
    let identifier = row.source_identifier();
    if accepted_identifiers.contains(&identifier) {
        return Err(RowDefect::DuplicateIdentifier(identifier));
    }

    if is_blank(row.address_line1.as_deref()) {
        return Err(RowDefect::MissingStreetAddress);
    }

    if parse_decimal(row.min_cost.as_deref()).is_none() {
        return Err(RowDefect::UnparseableMinCost(raw_text(&row.min_cost)));
    }

    if !is_blank(row.total_building_size.as_deref())
        && parse_decimal(row.total_building_size.as_deref()).is_none()
    {
        return Err(RowDefect::UnparseableBuildingSize(raw_text(
            &row.total_building_size,
        )));
    }

    Ok(())
}

/// Blank means absent or whitespace-only, matching how the feed pads
/// unfilled columns.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Parses a decimal, accepting both plain (`"335.50"`) and scientific
/// (`"3.355e2"`) notation. `Decimal::from_str` alone rejects exponents.
pub(crate) fn parse_decimal(value: Option<&str>) -> Option<Decimal> {
    value.and_then(|v| {
        let trimmed = v.trim();
        trimmed
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(trimmed))
            .ok()
    })
}

fn raw_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
