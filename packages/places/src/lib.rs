#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Places provider abstraction and proximity search.
//!
//! The [`PlacesProvider`] trait covers the two provider operations the
//! insight pipeline consumes: a radius-bounded categorized search with
//! pagination continuation, and a distance-ranked categorized search.
//! [`search_nearby`] and [`nearest_of`] drive the trait; the concrete
//! [`google::GooglePlaces`] client lives in its own module so tests can
//! substitute mocks.
//!
//! Errors propagate out of this crate as [`PlacesError`] — callers decide
//! where to absorb them.

pub mod google;

use async_trait::async_trait;
use nearby_places_models::{AmenityCategory, PlaceRecord, PlacesPage};

/// Errors that can occur while querying the places provider.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsing failed.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },

    /// The provider reported a non-success status.
    #[error("Provider status: {status}")]
    Provider {
        /// Status string as reported by the provider.
        status: String,
    },
}

/// A radius-bounded categorized proximity query.
#[derive(Debug, Clone)]
pub struct NearbyQuery {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// Amenity type to search for.
    pub category: AmenityCategory,
    /// Search radius in meters. Must be positive.
    pub radius_meters: u32,
}

/// Trait for places-search providers.
///
/// Both operations must report failures as `Err` values; nothing may
/// escape uncaught. Continuation-token propagation delays (where the
/// provider imposes one) belong to the implementation, so mocks stay
/// delay-free.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Fetches one page of a radius-bounded categorized search.
    ///
    /// `page_token` is `None` for the initial page and the previous
    /// page's continuation token afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if the request or response parsing fails.
    async fn nearby_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Result<PlacesPage, PlacesError>;

    /// Fetches the first page of a distance-ranked categorized search.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError`] if the request or response parsing fails.
    async fn nearest_page(
        &self,
        latitude: f64,
        longitude: f64,
        category: AmenityCategory,
    ) -> Result<PlacesPage, PlacesError>;
}

/// Runs a categorized proximity search, paging through the provider up
/// to `page_limit` pages.
///
/// Results accumulate in arrival order. The provider may keep signalling
/// more pages; the cap wins regardless. `page_limit` is clamped to a
/// minimum of 1.
///
/// # Errors
///
/// Returns [`PlacesError`] if any page fetch fails. Partial results from
/// earlier pages are discarded with the error — the caller's failure
/// policy decides what an error collapses to.
pub async fn search_nearby(
    provider: &dyn PlacesProvider,
    query: &NearbyQuery,
    page_limit: u32,
) -> Result<Vec<PlaceRecord>, PlacesError> {
    let page_limit = page_limit.max(1);
    let mut records = Vec::new();
    let mut token: Option<String> = None;
    let mut pages_fetched: u32 = 0;

    loop {
        let page = provider.nearby_page(query, token.as_deref()).await?;
        records.extend(page.records);
        pages_fetched += 1;

        token = page.next_page_token;
        if token.is_none() || pages_fetched >= page_limit {
            break;
        }
    }

    log::debug!(
        "search_nearby({}): {} records across {pages_fetched} page(s)",
        query.category,
        records.len()
    );

    Ok(records)
}

/// Returns the single closest place of the given category, or `None` if
/// the provider has no results.
///
/// Distance-ranked, not rating-ranked: the provider orders by proximity
/// and only the first entry is taken.
///
/// # Errors
///
/// Returns [`PlacesError`] if the request or response parsing fails.
pub async fn nearest_of(
    provider: &dyn PlacesProvider,
    latitude: f64,
    longitude: f64,
    category: AmenityCategory,
) -> Result<Option<PlaceRecord>, PlacesError> {
    let page = provider.nearest_page(latitude, longitude, category).await?;
    Ok(page.records.into_iter().next())
}
