//! Google Places API client.
//!
//! Implements [`PlacesProvider`] against the Places Nearby Search
//! endpoint. Continuation tokens need roughly two seconds to become
//! valid after being issued, so token-bearing requests wait before
//! sending — a provider-imposed constraint, not tunable.
//!
//! See <https://developers.google.com/maps/documentation/places/web-service/search-nearby>

use std::time::Duration;

use async_trait::async_trait;
use nearby_places_models::{AmenityCategory, PlaceRecord, PlacesPage};

use crate::{NearbyQuery, PlacesError, PlacesProvider};

/// Default Nearby Search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

/// How long a freshly issued continuation token takes to become valid.
const TOKEN_PROPAGATION_DELAY: Duration = Duration::from_secs(2);

/// Google Places client.
pub struct GooglePlaces {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlaces {
    /// Creates a client against the public Google Places endpoint.
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
impl PlacesProvider for GooglePlaces {
    async fn nearby_page(
        &self,
        query: &NearbyQuery,
        page_token: Option<&str>,
    ) -> Result<PlacesPage, PlacesError> {
        let location = format!("{},{}", query.latitude, query.longitude);
        let radius = query.radius_meters.to_string();
        let category = query.category.to_string();

        let request = if let Some(token) = page_token {
            // The token is the whole query; other parameters are ignored
            // by the provider once a token is supplied.
            tokio::time::sleep(TOKEN_PROPAGATION_DELAY).await;
            self.client
                .get(&self.base_url)
                .query(&[("pagetoken", token), ("key", self.api_key.as_str())])
        } else {
            self.client.get(&self.base_url).query(&[
                ("location", location.as_str()),
                ("radius", radius.as_str()),
                ("type", category.as_str()),
                ("key", self.api_key.as_str()),
            ])
        };

        let body: serde_json::Value = request.send().await?.json().await?;
        parse_response(&body)
    }

    async fn nearest_page(
        &self,
        latitude: f64,
        longitude: f64,
        category: AmenityCategory,
    ) -> Result<PlacesPage, PlacesError> {
        let location = format!("{latitude},{longitude}");
        let category = category.to_string();

        // rankby=distance excludes the radius parameter.
        let body: serde_json::Value = self
            .client
            .get(&self.base_url)
            .query(&[
                ("location", location.as_str()),
                ("rankby", "distance"),
                ("type", category.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .json()
            .await?;
        parse_response(&body)
    }
}

/// Parses a Nearby Search response body into a [`PlacesPage`].
fn parse_response(body: &serde_json::Value) -> Result<PlacesPage, PlacesError> {
    let status = body["status"].as_str().ok_or_else(|| PlacesError::Parse {
        message: "missing status in Places response".to_owned(),
    })?;

    match status {
        "OK" | "ZERO_RESULTS" => {}
        other => {
            return Err(PlacesError::Provider {
                status: other.to_owned(),
            });
        }
    }

    let records = body["results"]
        .as_array()
        .map(|results| results.iter().map(PlaceRecord::from_provider).collect())
        .unwrap_or_default();

    let next_page_token = body["next_page_token"].as_str().map(String::from);

    Ok(PlacesPage {
        records,
        next_page_token,
    })
}
