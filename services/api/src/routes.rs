use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use listing_search::leads::{lead_router, LeadRelay, LeadService};
use listing_search::listings::{listing_router, CityRepository, ListingService, PropertyRepository};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_platform_routes<P, C, L>(
    listings: Arc<ListingService<P, C>>,
    leads: Arc<LeadService<L>>,
) -> axum::Router
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
    L: LeadRelay + 'static,
{
    listing_router(listings)
        .merge(lead_router(leads))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
