//! Orchestration of one aggregation run.
//!
//! One run walks `GEOCODING → COLLECTING → SUMMARIZING`: the address is
//! geocoded once, every configured category then fans out concurrently
//! (each category task owns its own accumulator and merges into a
//! disjoint report slot), and the summary is built from the collected
//! sections. A geocoding failure short-circuits to a structured failure
//! result with no category queries attempted.
//!
//! Provider errors and deadline expiries inside a single category are
//! collapsed to empty results here — visibly, with a log line — so
//! partial data is always preferred over no data.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt as _};
use nearby_geocoder::Geocoder;
use nearby_insights_models::{
    CategorySection, Coordinates, FamilyLife, InsightFailure, InsightOutcome, InsightReport,
    SocialLife, Summary, Transport,
};
use nearby_places::{NearbyQuery, PlacesError, PlacesProvider, nearest_of, search_nearby};
use nearby_places_models::{AmenityCategory, PlaceRecord};
use tokio::time::error::Elapsed;

use crate::plan::CategoryPlan;
use crate::rank::rank;
use crate::summary::build_summary;

/// Configuration handed to the aggregator at construction. Nothing is
/// read from the environment mid-pipeline.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Per-category radii and truncation limits.
    pub plan: CategoryPlan,
    /// Region bias hint passed to the geocoder.
    pub region: String,
    /// Deadline per category query; expiry degrades that category to an
    /// empty section instead of blocking the response.
    pub category_deadline: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            plan: CategoryPlan::default(),
            region: "tr".to_owned(),
            category_deadline: Duration::from_secs(30),
        }
    }
}

/// Collects multi-category neighborhood insights for one address at a
/// time.
pub struct InsightAggregator {
    geocoder: Arc<dyn Geocoder>,
    places: Arc<dyn PlacesProvider>,
    config: AggregatorConfig,
}

impl InsightAggregator {
    /// Creates an aggregator over the given collaborators.
    #[must_use]
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        places: Arc<dyn PlacesProvider>,
        config: AggregatorConfig,
    ) -> Self {
        Self {
            geocoder,
            places,
            config,
        }
    }

    /// Runs one aggregation and produces exactly one outcome. No
    /// internal retries.
    pub async fn run(&self, address: &str) -> InsightOutcome {
        log::info!("Getting insights for: {address}");

        let geo = match self.geocoder.geocode(address, &self.config.region).await {
            Ok(Some(geo)) => geo,
            Ok(None) => {
                log::warn!("No geocoding result for address: {address}");
                return InsightOutcome::Failure(InsightFailure::new(
                    format!("Could not geocode the address: {address}"),
                    address,
                ));
            }
            Err(e) => {
                log::warn!("Geocoding error for address '{address}': {e}");
                return InsightOutcome::Failure(InsightFailure::new(
                    format!("Could not geocode the address: {address}"),
                    address,
                ));
            }
        };

        let (lat, lng) = (geo.latitude, geo.longitude);
        log::info!(
            "Geocoded location: {} (lat: {lat}, lng: {lng})",
            geo.formatted_address
        );

        let collected = self.collect(lat, lng).await;

        let plan = &self.config.plan;
        let mut social = SocialLife::default();
        let mut family = FamilyLife::default();
        let mut transport = Transport::default();

        for (category, records, nearest) in collected {
            match category {
                AmenityCategory::Cafe => social.cafes = ranked_section(records, plan.top_n),
                AmenityCategory::Park => social.parks = ranked_section(records, plan.top_n),
                AmenityCategory::Gym => social.gyms = ranked_section(records, plan.top_n),
                AmenityCategory::ShoppingMall => {
                    // Generic mall queries return false positives (e.g.
                    // lodging tagged as retail); require the literal tag.
                    let filtered: Vec<PlaceRecord> = records
                        .into_iter()
                        .filter(|r| r.has_category(AmenityCategory::ShoppingMall))
                        .collect();
                    social.shopping_malls = ranked_section(filtered, plan.top_n);
                }
                AmenityCategory::School => family.schools = ranked_section(records, plan.top_n),
                AmenityCategory::Hospital => {
                    let mut section = ranked_section(records, plan.top_n);
                    section.nearest = nearest;
                    family.hospitals = section;
                }
                AmenityCategory::Pharmacy => {
                    family.pharmacies = unranked_section(records, plan.top_n);
                }
                AmenityCategory::SubwayStation => {
                    transport.subway = alternatives_section(records, nearest, plan.top_n);
                }
            }
        }

        let summary: Summary = build_summary(&geo.formatted_address, &social, &family, &transport);

        InsightOutcome::Report(Box::new(InsightReport {
            ok: true,
            query: address.to_owned(),
            address: geo.formatted_address,
            coordinates: Coordinates { lat, lng },
            source: geo.provider.as_str().to_owned(),
            social_life: social,
            family_life: family,
            transport,
            summary,
        }))
    }

    /// Fans out all category queries concurrently. Each tuple carries
    /// one category's accumulated records plus its nearest-of-type
    /// companion where the plan designates one.
    async fn collect(
        &self,
        lat: f64,
        lng: f64,
    ) -> Vec<(AmenityCategory, Vec<PlaceRecord>, Option<PlaceRecord>)> {
        let plan = &self.config.plan;
        let places = self.places.as_ref();
        let deadline = self.config.category_deadline;
        let categories = AmenityCategory::all();

        stream::iter(categories.iter().copied().map(|category| async move {
            let query = NearbyQuery {
                latitude: lat,
                longitude: lng,
                category,
                radius_meters: plan.radius_for(category),
            };
            let fetched =
                tokio::time::timeout(deadline, search_nearby(places, &query, plan.page_limit))
                    .await;
            let records = collapse_records(category, fetched);

            let nearest = if plan.has_nearest(category) {
                let fetched =
                    tokio::time::timeout(deadline, nearest_of(places, lat, lng, category)).await;
                collapse_nearest(category, fetched)
            } else {
                None
            };

            (category, records, nearest)
        }))
        .buffer_unordered(categories.len())
        .collect()
        .await
    }
}

/// Collapses a proximity-query outcome to its records, degrading any
/// failure to an empty list. One category's failure must never abort the
/// whole aggregation.
fn collapse_records(
    category: AmenityCategory,
    outcome: Result<Result<Vec<PlaceRecord>, PlacesError>, Elapsed>,
) -> Vec<PlaceRecord> {
    match outcome {
        Ok(Ok(records)) => records,
        Ok(Err(e)) => {
            log::warn!("Places query failed for {category}: {e}");
            Vec::new()
        }
        Err(_) => {
            log::warn!("Places query for {category} exceeded the deadline");
            Vec::new()
        }
    }
}

/// Collapses a nearest-of-type outcome, degrading any failure to absent.
fn collapse_nearest(
    category: AmenityCategory,
    outcome: Result<Result<Option<PlaceRecord>, PlacesError>, Elapsed>,
) -> Option<PlaceRecord> {
    match outcome {
        Ok(Ok(nearest)) => nearest,
        Ok(Err(e)) => {
            log::warn!("Nearest query failed for {category}: {e}");
            None
        }
        Err(_) => {
            log::warn!("Nearest query for {category} exceeded the deadline");
            None
        }
    }
}

/// Ranks, then truncates. `count` keeps the pre-truncation size.
fn ranked_section(mut records: Vec<PlaceRecord>, top_n: usize) -> CategorySection {
    let count = records.len() as u64;
    rank(&mut records);
    records.truncate(top_n);
    CategorySection {
        count,
        top: records,
        nearest: None,
        alternatives: None,
    }
}

/// Truncates in provider order without ranking.
fn unranked_section(mut records: Vec<PlaceRecord>, top_n: usize) -> CategorySection {
    let count = records.len() as u64;
    records.truncate(top_n);
    CategorySection {
        count,
        top: records,
        nearest: None,
        alternatives: None,
    }
}

/// Provider-ordered alternatives plus the nearest call-out; used for
/// categories reported without a ranked `top` list.
fn alternatives_section(
    mut records: Vec<PlaceRecord>,
    nearest: Option<PlaceRecord>,
    top_n: usize,
) -> CategorySection {
    let count = records.len() as u64;
    records.truncate(top_n);
    CategorySection {
        count,
        top: Vec::new(),
        nearest,
        alternatives: Some(records),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use nearby_geocoder::{GeocodeError, GeocodedLocation, GeocodingProvider};
    use nearby_places_models::PlacesPage;

    use super::*;

    struct StaticGeocoder {
        location: Option<GeocodedLocation>,
        calls: AtomicUsize,
    }

    impl StaticGeocoder {
        fn resolving(lat: f64, lng: f64, formatted: &str) -> Self {
            Self {
                location: Some(GeocodedLocation {
                    latitude: lat,
                    longitude: lng,
                    formatted_address: formatted.to_owned(),
                    provider: GeocodingProvider::Google,
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn unresolvable() -> Self {
            Self {
                location: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Geocoder for StaticGeocoder {
        async fn geocode(
            &self,
            _address: &str,
            _region: &str,
        ) -> Result<Option<GeocodedLocation>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.location.clone())
        }
    }

    struct MockPlaces {
        responses: BTreeMap<AmenityCategory, Vec<PlaceRecord>>,
        fail_category: Option<AmenityCategory>,
        nearby_calls: AtomicUsize,
        nearest_calls: AtomicUsize,
    }

    impl MockPlaces {
        fn with_responses(responses: BTreeMap<AmenityCategory, Vec<PlaceRecord>>) -> Self {
            Self {
                responses,
                fail_category: None,
                nearby_calls: AtomicUsize::new(0),
                nearest_calls: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self::with_responses(BTreeMap::new())
        }

        fn failing_for(mut self, category: AmenityCategory) -> Self {
            self.fail_category = Some(category);
            self
        }

        fn records_for(&self, category: AmenityCategory) -> Result<Vec<PlaceRecord>, PlacesError> {
            if self.fail_category == Some(category) {
                return Err(PlacesError::Provider {
                    status: "UNKNOWN_ERROR".into(),
                });
            }
            Ok(self.responses.get(&category).cloned().unwrap_or_default())
        }
    }

    #[async_trait]
    impl PlacesProvider for MockPlaces {
        async fn nearby_page(
            &self,
            query: &NearbyQuery,
            _page_token: Option<&str>,
        ) -> Result<PlacesPage, PlacesError> {
            self.nearby_calls.fetch_add(1, Ordering::SeqCst);
            Ok(PlacesPage {
                records: self.records_for(query.category)?,
                next_page_token: None,
            })
        }

        async fn nearest_page(
            &self,
            _latitude: f64,
            _longitude: f64,
            category: AmenityCategory,
        ) -> Result<PlacesPage, PlacesError> {
            self.nearest_calls.fetch_add(1, Ordering::SeqCst);
            let mut records = self.records_for(category)?;
            records.truncate(1);
            Ok(PlacesPage {
                records,
                next_page_token: None,
            })
        }
    }

    fn record(name: &str, rating: f64, rating_count: u64, tag: &str) -> PlaceRecord {
        PlaceRecord {
            name: Some(name.to_owned()),
            rating: Some(rating),
            rating_count: Some(rating_count),
            categories: vec![tag.to_owned()],
        }
    }

    /// Two sample places per category, tagged with the category's wire
    /// name.
    fn two_per_category() -> BTreeMap<AmenityCategory, Vec<PlaceRecord>> {
        AmenityCategory::all()
            .iter()
            .map(|&category| {
                let tag = category.to_string();
                (
                    category,
                    vec![
                        record(&format!("{tag} one"), 4.5, 100, &tag),
                        record(&format!("{tag} two"), 4.0, 50, &tag),
                    ],
                )
            })
            .collect()
    }

    fn aggregator(geocoder: StaticGeocoder, places: MockPlaces) -> InsightAggregator {
        InsightAggregator::new(
            Arc::new(geocoder),
            Arc::new(places),
            AggregatorConfig::default(),
        )
    }

    #[tokio::test]
    async fn geocode_failure_skips_all_category_queries() {
        let places = Arc::new(MockPlaces::empty());
        let aggregator = InsightAggregator::new(
            Arc::new(StaticGeocoder::unresolvable()),
            Arc::clone(&places) as Arc<dyn PlacesProvider>,
            AggregatorConfig::default(),
        );

        let outcome = aggregator.run("Atlantis Boulevard 1").await;
        assert!(!outcome.is_ok());

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["query"], "Atlantis Boulevard 1");
        assert!(
            value["error"]
                .as_str()
                .unwrap()
                .contains("Atlantis Boulevard 1")
        );
        assert_eq!(places.nearby_calls.load(Ordering::SeqCst), 0);
        assert_eq!(places.nearest_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn full_run_assembles_all_sections() {
        let geocoder = StaticGeocoder::resolving(37.4, -122.08, "1600 Amphitheatre Pkwy");
        let outcome = aggregator(geocoder, MockPlaces::with_responses(two_per_category()))
            .run("1600 Amphitheatre Parkway")
            .await;
        assert!(outcome.is_ok());

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["query"], "1600 Amphitheatre Parkway");
        assert_eq!(value["address"], "1600 Amphitheatre Pkwy");
        assert_eq!(value["coordinates"]["lat"], 37.4);
        assert_eq!(value["coordinates"]["lng"], -122.08);
        assert_eq!(value["source"], "google");

        for section in [
            &value["social_life"]["cafes"],
            &value["social_life"]["shopping_malls"],
            &value["social_life"]["parks"],
            &value["social_life"]["gyms"],
            &value["family_life"]["schools"],
            &value["family_life"]["hospitals"],
            &value["family_life"]["pharmacies"],
            &value["transport"]["subway"],
        ] {
            assert_eq!(section["count"], 2);
        }

        let headline = value["summary"]["headline"].as_str().unwrap();
        assert!(headline.contains("2 cafes"));
        assert!(headline.contains("2 parks"));
        assert!(headline.contains("1600 Amphitheatre Pkwy"));

        // Nearest call-outs come from the distance-ranked first entry.
        assert_eq!(
            value["family_life"]["hospitals"]["nearest"]["name"],
            "hospital one"
        );
        assert_eq!(
            value["summary"]["highlights"]["nearest_subway"],
            "subway_station one"
        );

        // Subway is reported via alternatives, not a ranked top list.
        assert!(value["transport"]["subway"]["top"].as_array().unwrap().is_empty());
        assert_eq!(
            value["transport"]["subway"]["alternatives"]
                .as_array()
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn one_failing_category_leaves_the_rest_intact() {
        let geocoder = StaticGeocoder::resolving(41.04, 28.99, "Nisantasi, Istanbul");
        let places = MockPlaces::with_responses(two_per_category())
            .failing_for(AmenityCategory::Cafe);
        let outcome = aggregator(geocoder, places).run("Nisantasi").await;

        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["social_life"]["cafes"]["count"], 0);
        assert!(
            value["social_life"]["cafes"]["top"]
                .as_array()
                .unwrap()
                .is_empty()
        );
        assert_eq!(value["social_life"]["parks"]["count"], 2);
        assert_eq!(value["family_life"]["schools"]["count"], 2);
    }

    #[tokio::test]
    async fn mall_section_requires_the_literal_tag() {
        let mut responses = two_per_category();
        responses.insert(
            AmenityCategory::ShoppingMall,
            vec![
                record("Kanyon", 4.4, 60000, "shopping_mall"),
                record("Hotel tagged as retail", 4.8, 900, "lodging"),
                record("Zorlu Center", 4.5, 80000, "shopping_mall"),
            ],
        );
        let geocoder = StaticGeocoder::resolving(41.07, 29.01, "Levent, Istanbul");
        let outcome = aggregator(geocoder, MockPlaces::with_responses(responses))
            .run("Levent")
            .await;

        let value = serde_json::to_value(&outcome).unwrap();
        let malls = &value["social_life"]["shopping_malls"];
        assert_eq!(malls["count"], 2);
        let names: Vec<&str> = malls["top"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Zorlu Center", "Kanyon"]);
    }

    #[tokio::test]
    async fn ranked_sections_truncate_after_ranking() {
        let mut responses = BTreeMap::new();
        responses.insert(
            AmenityCategory::Cafe,
            (0u32..7)
                .map(|i| record(&format!("cafe {i}"), f64::from(i), u64::from(i), "cafe"))
                .collect(),
        );
        let geocoder = StaticGeocoder::resolving(41.0, 29.0, "Kadikoy, Istanbul");
        let outcome = aggregator(geocoder, MockPlaces::with_responses(responses))
            .run("Kadikoy")
            .await;

        let value = serde_json::to_value(&outcome).unwrap();
        let cafes = &value["social_life"]["cafes"];
        assert_eq!(cafes["count"], 7);
        let top = cafes["top"].as_array().unwrap();
        assert_eq!(top.len(), 5);
        // Best-rated first; truncation never reorders beyond the ranking.
        assert_eq!(top[0]["name"], "cafe 6");
        assert_eq!(top[4]["name"], "cafe 2");
    }
}
