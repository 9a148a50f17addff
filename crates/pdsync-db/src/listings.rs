//! Read and write operations for the `listings` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use pdsync_core::NewListing;

/// A row from the `listings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRow {
    pub id: i64,
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
    pub building_size: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Bulk-upsert listings keyed by `source_identifier`.
///
/// Returns `(new_count, updated_count)` where:
/// - `new_count`: rows that did not exist before (were inserted)
/// - `updated_count`: rows that already existed (were overwritten)
///
/// Uses a single `INSERT … SELECT * FROM UNNEST(…) ON CONFLICT` so that the
/// entire batch is upserted in one round-trip regardless of batch size. The
/// conflict branch overwrites every mapped non-key column — a record that
/// loses a field between imports loses it in the store too.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails. The pipeline guarantees the
/// batch has pairwise-distinct identifiers; a unique violation here means a
/// concurrent import raced this one, and the error is for the caller.
pub async fn upsert_listings(
    pool: &PgPool,
    listings: &[NewListing],
) -> Result<(u64, u64), sqlx::Error> {
    if listings.is_empty() {
        return Ok((0, 0));
    }

    // Collect each column into a parallel Vec for UNNEST binding.
    let mut source_identifiers: Vec<String> = Vec::with_capacity(listings.len());
    let mut street_addresses: Vec<String> = Vec::with_capacity(listings.len());
    let mut suite_numbers: Vec<Option<String>> = Vec::with_capacity(listings.len());
    let mut cities: Vec<Option<String>> = Vec::with_capacity(listings.len());
    let mut postal_codes: Vec<Option<String>> = Vec::with_capacity(listings.len());
    let mut listing_descriptions: Vec<Option<String>> = Vec::with_capacity(listings.len());
    let mut building_descriptions: Vec<Option<String>> = Vec::with_capacity(listings.len());
    let mut minimum_sizes: Vec<i32> = Vec::with_capacity(listings.len());
    let mut maximum_sizes: Vec<i32> = Vec::with_capacity(listings.len());
    let mut minimum_terms: Vec<i32> = Vec::with_capacity(listings.len());
    let mut base_rents: Vec<Decimal> = Vec::with_capacity(listings.len());
    let mut statuses: Vec<String> = Vec::with_capacity(listings.len());
    let mut building_sizes: Vec<Option<Decimal>> = Vec::with_capacity(listings.len());

    for listing in listings {
        source_identifiers.push(listing.source_identifier.clone());
        street_addresses.push(listing.street_address.clone());
        suite_numbers.push(listing.suite_number.clone());
        cities.push(listing.city.clone());
        postal_codes.push(listing.postal_code.clone());
        listing_descriptions.push(listing.listing_description.clone());
        building_descriptions.push(listing.building_description.clone());
        minimum_sizes.push(listing.minimum_size);
        maximum_sizes.push(listing.maximum_size);
        minimum_terms.push(listing.minimum_term);
        base_rents.push(listing.base_rent_per_month);
        statuses.push(listing.status.clone());
        building_sizes.push(listing.building_size);
    }

    let rows: Vec<bool> = sqlx::query_scalar::<_, bool>(
        "INSERT INTO listings \
             (source_identifier, street_address, suite_number, city, postal_code, \
              listing_description, building_description, minimum_size, maximum_size, \
              minimum_term, base_rent_per_month, status, building_size) \
         SELECT * FROM UNNEST(\
              $1::text[], $2::text[], $3::text[], $4::text[], $5::text[], $6::text[], \
              $7::text[], $8::int4[], $9::int4[], $10::int4[], $11::numeric[], \
              $12::text[], $13::numeric[]) \
         ON CONFLICT (source_identifier) DO UPDATE SET \
             street_address       = EXCLUDED.street_address, \
             suite_number         = EXCLUDED.suite_number, \
             city                 = EXCLUDED.city, \
             postal_code          = EXCLUDED.postal_code, \
             listing_description  = EXCLUDED.listing_description, \
             building_description = EXCLUDED.building_description, \
             minimum_size         = EXCLUDED.minimum_size, \
             maximum_size         = EXCLUDED.maximum_size, \
             minimum_term         = EXCLUDED.minimum_term, \
             base_rent_per_month  = EXCLUDED.base_rent_per_month, \
             status               = EXCLUDED.status, \
             building_size        = EXCLUDED.building_size, \
             updated_at           = NOW() \
         RETURNING (xmax = 0) AS is_new",
    )
    .bind(&source_identifiers)
    .bind(&street_addresses)
    .bind(&suite_numbers)
    .bind(&cities)
    .bind(&postal_codes)
    .bind(&listing_descriptions)
    .bind(&building_descriptions)
    .bind(&minimum_sizes)
    .bind(&maximum_sizes)
    .bind(&minimum_terms)
    .bind(&base_rents)
    .bind(&statuses)
    .bind(&building_sizes)
    .fetch_all(pool)
    .await?;

    let new_count = rows.iter().filter(|&&is_new| is_new).count() as u64;
    let updated_count = rows.len() as u64 - new_count;

    Ok((new_count, updated_count))
}

/// Look up one listing by its unique `source_identifier`.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn get_listing_by_source_identifier(
    pool: &PgPool,
    source_identifier: &str,
) -> Result<Option<ListingRow>, sqlx::Error> {
    sqlx::query_as::<_, ListingRow>("SELECT * FROM listings WHERE source_identifier = $1")
        .bind(source_identifier)
        .fetch_optional(pool)
        .await
}

/// Total number of stored listings.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the query fails.
pub async fn count_listings(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM listings")
        .fetch_one(pool)
        .await
}
