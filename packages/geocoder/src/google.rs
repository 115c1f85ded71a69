//! Google Geocoding API client.
//!
//! See <https://developers.google.com/maps/documentation/geocoding/requests-geocoding>

use async_trait::async_trait;

use crate::{GeocodeError, GeocodedLocation, Geocoder, GeocodingProvider};

/// Default Geocoding API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Google Geocoding client.
pub struct GoogleGeocoder {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleGeocoder {
    /// Creates a client against the public Google Geocoding endpoint.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }

    /// Overrides the endpoint URL (local test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(
        &self,
        address: &str,
        region: &str,
    ) -> Result<Option<GeocodedLocation>, GeocodeError> {
        let body: serde_json::Value = self
            .client
            .get(&self.base_url)
            .query(&[
                ("address", address),
                ("region", region),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;
        parse_response(&body)
    }
}

/// Parses a Geocoding API response, taking the first candidate.
fn parse_response(body: &serde_json::Value) -> Result<Option<GeocodedLocation>, GeocodeError> {
    let status = body["status"]
        .as_str()
        .ok_or_else(|| GeocodeError::Parse {
            message: "missing status in Geocoding response".to_owned(),
        })?;

    match status {
        "OK" => {}
        "ZERO_RESULTS" => return Ok(None),
        other => {
            return Err(GeocodeError::Provider {
                status: other.to_owned(),
            });
        }
    }

    let Some(first) = body["results"].as_array().and_then(|r| r.first()) else {
        return Ok(None);
    };

    let location = &first["geometry"]["location"];
    let latitude = location["lat"].as_f64().ok_or_else(|| GeocodeError::Parse {
        message: "missing geometry.location.lat in Geocoding response".to_owned(),
    })?;
    let longitude = location["lng"].as_f64().ok_or_else(|| GeocodeError::Parse {
        message: "missing geometry.location.lng in Geocoding response".to_owned(),
    })?;

    let formatted_address = first["formatted_address"]
        .as_str()
        .unwrap_or_default()
        .to_owned();

    Ok(Some(GeocodedLocation {
        latitude,
        longitude,
        formatted_address,
        provider: GeocodingProvider::Google,
    }))
}
