#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the nearby insights endpoint.
//!
//! One inbound request produces one outbound JSON response; no state
//! persists between calls. The provider credential is read once at
//! startup and handed to the aggregator at construction — a missing
//! credential turns every request into a configuration error, reported
//! before any collaborator call.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use nearby_geocoder::google::GoogleGeocoder;
use nearby_insights::{AggregatorConfig, InsightAggregator};
use nearby_places::google::GooglePlaces;

/// Shared application state.
pub struct AppState {
    /// The aggregation pipeline, or `None` when the provider credential
    /// is missing.
    pub aggregator: Option<Arc<InsightAggregator>>,
}

/// Builds the aggregator from the process environment, if the provider
/// credential is present.
#[must_use]
pub fn aggregator_from_env() -> Option<Arc<InsightAggregator>> {
    let api_key = std::env::var("GOOGLE_MAPS_API_KEY").ok()?;

    let mut config = AggregatorConfig::default();
    if let Ok(region) = std::env::var("GEOCODE_REGION") {
        config.region = region;
    }

    Some(Arc::new(InsightAggregator::new(
        Arc::new(GoogleGeocoder::new(&api_key)),
        Arc::new(GooglePlaces::new(&api_key)),
        config,
    )))
}

/// Starts the nearby API server.
///
/// This is a regular async function — the caller is responsible for
/// providing the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let aggregator = aggregator_from_env();
    if aggregator.is_none() {
        log::warn!("GOOGLE_MAPS_API_KEY not set; /insights will report a configuration error");
    }

    let state = web::Data::new(AppState { aggregator });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route("/insights", web::post().to(handlers::insights))
            .default_service(web::route().to(handlers::method_not_allowed))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
