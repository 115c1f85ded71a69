//! HTTP handler functions for the nearby API.

use actix_web::{HttpResponse, web};
use nearby_server_models::{ErrorBody, InsightsRequest};

use crate::AppState;

/// `POST /insights`
///
/// Validates the request, then runs one aggregation. Geocoding failures
/// come back as a structured `{ok:false}` body with status 200 — they
/// are a lookup result, not a transport error.
pub async fn insights(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let Some(aggregator) = &state.aggregator else {
        return HttpResponse::InternalServerError()
            .json(ErrorBody::new("GOOGLE_MAPS_API_KEY not set"));
    };

    let Ok(request) = serde_json::from_slice::<InsightsRequest>(&body) else {
        return HttpResponse::BadRequest().json(ErrorBody::new("Invalid JSON"));
    };

    let address = request
        .address
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if address.is_empty() {
        return HttpResponse::BadRequest().json(ErrorBody::new("Address is required"));
    }

    let outcome = aggregator.run(address).await;
    HttpResponse::Ok().json(outcome)
}

/// Fallback for every route/method without a handler. The API exposes a
/// single POST operation; pre-flight OPTIONS is answered by the CORS
/// layer before reaching this.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorBody::new("Method not allowed. Use POST."))
}
