#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Amenity category taxonomy and normalized place record types.
//!
//! This crate defines the canonical amenity categories queried for each
//! address and the minimal [`PlaceRecord`] that every provider result is
//! normalized into before ranking and reporting.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// An amenity type used to filter a proximity query.
///
/// The wire name (snake_case) doubles as the provider's place-type
/// parameter, e.g. `shopping_mall`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AmenityCategory {
    /// Cafes and coffee shops.
    Cafe,
    /// Public parks and green spaces.
    Park,
    /// Gyms and fitness centers.
    Gym,
    /// Shopping malls (provider results require tag verification, see
    /// [`PlaceRecord::has_category`]).
    ShoppingMall,
    /// Schools of any level.
    School,
    /// Hospitals.
    Hospital,
    /// Pharmacies.
    Pharmacy,
    /// Subway / metro stations.
    SubwayStation,
}

impl AmenityCategory {
    /// All categories, in report assembly order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Cafe,
            Self::Park,
            Self::Gym,
            Self::ShoppingMall,
            Self::School,
            Self::Hospital,
            Self::Pharmacy,
            Self::SubwayStation,
        ]
    }
}

/// A place as reported to API consumers, normalized from a raw provider
/// result.
///
/// Fields the provider omits stay `None` — they sort as zero during
/// ranking but are reported as absent, never coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    /// Display name of the place.
    pub name: Option<String>,
    /// Average user rating (typically 1.0–5.0).
    pub rating: Option<f64>,
    /// Number of user ratings behind the average.
    pub rating_count: Option<u64>,
    /// Provider-assigned category tags.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl PlaceRecord {
    /// Normalizes a raw provider result into a `PlaceRecord`.
    ///
    /// Extracts `name`, `rating`, `user_ratings_total`, and `types`;
    /// missing tags default to an empty list.
    #[must_use]
    pub fn from_provider(raw: &serde_json::Value) -> Self {
        let categories = raw["types"]
            .as_array()
            .map(|types| {
                types
                    .iter()
                    .filter_map(|t| t.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name: raw["name"].as_str().map(String::from),
            rating: raw["rating"].as_f64(),
            rating_count: raw["user_ratings_total"].as_u64(),
            categories,
        }
    }

    /// Returns `true` if the provider tagged this place with the given
    /// category's wire name.
    #[must_use]
    pub fn has_category(&self, category: AmenityCategory) -> bool {
        let tag: &str = category.as_ref();
        self.categories.iter().any(|c| c.as_str() == tag)
    }
}

/// One page of normalized proximity-search results.
#[derive(Debug, Clone, Default)]
pub struct PlacesPage {
    /// Normalized records, in provider order.
    pub records: Vec<PlaceRecord>,
    /// Continuation token for the next page, if the provider has more.
    pub next_page_token: Option<String>,
}
