#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Report types for the neighborhood insights API.
//!
//! These types are serialized to JSON for the `POST /insights` response.
//! They are separate from the provider-facing types so the API contract
//! can evolve independently of the provider wire format.

use nearby_places_models::PlaceRecord;
use serde::{Deserialize, Serialize};

/// One amenity category's results within a report.
///
/// `count` always reflects the pre-truncation result size (post-filter
/// for categories that require a tag check), never the truncated length
/// of `top`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategorySection {
    /// Total matching results before truncation.
    pub count: u64,
    /// Ranked (or provider-ordered) entries, truncated to the configured
    /// top-N. Empty for categories reported via `alternatives`.
    pub top: Vec<PlaceRecord>,
    /// Closest place of this type, for categories that track one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest: Option<PlaceRecord>,
    /// Provider-ordered alternatives, for categories reported without
    /// ranking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<PlaceRecord>>,
}

/// Social-life amenity sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLife {
    /// Cafes, ranked.
    pub cafes: CategorySection,
    /// Tag-verified shopping malls, ranked.
    pub shopping_malls: CategorySection,
    /// Parks, ranked.
    pub parks: CategorySection,
    /// Gyms, ranked.
    pub gyms: CategorySection,
}

/// Family-life amenity sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyLife {
    /// Schools, ranked.
    pub schools: CategorySection,
    /// Hospitals, ranked, with the nearest one called out.
    pub hospitals: CategorySection,
    /// Pharmacies, provider order.
    pub pharmacies: CategorySection,
}

/// Transport amenity sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transport {
    /// Subway stations, with the nearest one called out and
    /// provider-ordered alternatives.
    pub subway: CategorySection,
}

/// Named call-outs derived from the ranked sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Highlights {
    /// Names of up to the first 3 ranked cafes.
    pub cafes_top: Vec<String>,
    /// Names of up to the first 3 ranked schools.
    pub schools_top: Vec<String>,
    /// Names of up to the first 3 ranked malls.
    pub malls_top: Vec<String>,
    /// Name of the closest hospital, if any.
    pub nearest_hospital: Option<String>,
    /// Name of the closest subway station, if any.
    pub nearest_subway: Option<String>,
}

/// One-line headline plus per-category call-outs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Human-readable sentence with raw counts and the resolved address.
    pub headline: String,
    /// Per-category name lists and nearest call-outs.
    pub highlights: Highlights,
}

/// Resolved coordinates for the queried address.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude (WGS84).
    pub lat: f64,
    /// Longitude (WGS84).
    pub lng: f64,
}

/// A successful insights report. Constructed once per request, never
/// mutated after return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    /// Always `true` for a successful report.
    pub ok: bool,
    /// The address string as submitted.
    pub query: String,
    /// The geocoder's canonical formatted address.
    pub address: String,
    /// Resolved coordinates.
    pub coordinates: Coordinates,
    /// Provenance tag of the geocoding provider.
    pub source: String,
    /// Cafes, malls, parks, gyms.
    pub social_life: SocialLife,
    /// Schools, hospitals, pharmacies.
    pub family_life: FamilyLife,
    /// Subway.
    pub transport: Transport,
    /// Headline and highlights.
    pub summary: Summary,
}

/// A structured failure result (e.g. the address could not be geocoded).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightFailure {
    /// Always `false`.
    pub ok: bool,
    /// Human-readable failure description.
    pub error: String,
    /// The address string as submitted.
    pub query: String,
}

impl InsightFailure {
    /// Creates a failure result for the given query.
    #[must_use]
    pub fn new(error: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            query: query.into(),
        }
    }
}

/// Terminal outcome of one aggregation run.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum InsightOutcome {
    /// Aggregation completed (possibly with degraded sections).
    Report(Box<InsightReport>),
    /// Geocoding failed; no category queries were attempted.
    Failure(InsightFailure),
}

impl InsightOutcome {
    /// Returns `true` for a successful report.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}
