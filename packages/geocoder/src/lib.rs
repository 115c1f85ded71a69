#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoding service for the insights pipeline.
//!
//! Converts a street address into latitude/longitude coordinates plus
//! the provider's canonical formatted address. The [`Geocoder`] trait is
//! the seam the aggregator consumes; [`google::GoogleGeocoder`] is the
//! production implementation.
//!
//! A result carries a provenance tag ([`GeocodingProvider`]) so reports
//! can say which upstream service resolved the address.

pub mod google;

use async_trait::async_trait;
use thiserror::Error;

/// A geocoding result with coordinates and metadata.
#[derive(Debug, Clone)]
pub struct GeocodedLocation {
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
    /// The canonical formatted address returned by the geocoder.
    pub formatted_address: String,
    /// Which provider resolved this address.
    pub provider: GeocodingProvider,
}

/// Which geocoding provider resolved an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodingProvider {
    /// Google Geocoding API.
    Google,
}

impl GeocodingProvider {
    /// Lowercase wire name used in report provenance fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
        }
    }
}

/// Errors from geocoding operations.
#[derive(Debug, Error)]
pub enum GeocodeError {
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

/// Trait for address geocoders.
///
/// `region` is a two-letter ccTLD bias hint (e.g. `"tr"`). A missing
/// match is `Ok(None)`, not an error.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves an address to coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError`] if the request or response parsing fails.
    async fn geocode(
        &self,
        address: &str,
        region: &str,
    ) -> Result<Option<GeocodedLocation>, GeocodeError>;
}
