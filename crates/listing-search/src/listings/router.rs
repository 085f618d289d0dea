use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;

use super::drafts::{CityDraft, PropertyDraft};
use super::repository::{CityRepository, PropertyRepository, RepositoryError};
use super::service::{ListingService, ListingServiceError};
use crate::catalog::PropertyId;
use crate::locations::{CityCounts, LocationSelector};
use crate::search::FilterCriteria;

/// Router builder exposing catalog search and the admin listing endpoints.
pub fn listing_router<P, C>(service: Arc<ListingService<P, C>>) -> Router
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    Router::new()
        .route("/api/v1/properties/search", post(search_handler::<P, C>))
        .route(
            "/api/v1/properties",
            get(list_handler::<P, C>).post(create_handler::<P, C>),
        )
        .route(
            "/api/v1/properties/:property_id",
            get(detail_handler::<P, C>)
                .put(update_handler::<P, C>)
                .delete(delete_handler::<P, C>),
        )
        .route("/api/v1/cities/sectors", get(sectors_handler::<P, C>))
        .route("/api/v1/cities/options", post(city_options_handler::<P, C>))
        .route("/api/v1/cities", post(add_city_handler::<P, C>))
        .route(
            "/api/v1/cities/:city_name",
            put(update_city_handler::<P, C>).delete(remove_city_handler::<P, C>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    axum::Json(criteria): axum::Json<FilterCriteria>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    let outcome = service.search(&criteria);
    (StatusCode::OK, axum::Json(outcome)).into_response()
}

pub(crate) async fn list_handler<P, C>(State(service): State<Arc<ListingService<P, C>>>) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    let (properties, source) = service.load_properties();
    let payload = json!({
        "source": source,
        "properties": properties,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn detail_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    Path(property_id): Path<String>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    match service.get_property(&PropertyId(property_id)) {
        Ok(property) => (StatusCode::OK, axum::Json(property)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    axum::Json(draft): axum::Json<PropertyDraft>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    match service.create_property(draft) {
        Ok(property) => (StatusCode::CREATED, axum::Json(property)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    Path(property_id): Path<String>,
    axum::Json(draft): axum::Json<PropertyDraft>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    match service.update_property(&PropertyId(property_id), draft) {
        Ok(property) => (StatusCode::OK, axum::Json(property)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    Path(property_id): Path<String>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    match service.delete_property(&PropertyId(property_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn sectors_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    let payload = json!({ "sectors": service.sectors() });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

/// Selector rows for the cities in `criteria`, annotated with counts under the other filters.
pub(crate) async fn city_options_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    axum::Json(criteria): axum::Json<FilterCriteria>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    let (properties, _) = service.load_properties();
    let counts = CityCounts::from(service.engine().city_counts(&properties, &criteria));
    let selector = LocationSelector::new(criteria.cities.iter().cloned());
    let directory = service.sectors();

    let payload = json!({
        "all_cities": selector.is_all(),
        "sectors": selector.options(&directory, &counts),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn add_city_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    axum::Json(draft): axum::Json<CityDraft>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    match service.add_city(draft) {
        Ok(city) => (StatusCode::CREATED, axum::Json(city)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_city_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    Path(city_name): Path<String>,
    axum::Json(draft): axum::Json<CityDraft>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    match service.update_city(&city_name, draft) {
        Ok(city) => (StatusCode::OK, axum::Json(city)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn remove_city_handler<P, C>(
    State(service): State<Arc<ListingService<P, C>>>,
    Path(city_name): Path<String>,
) -> Response
where
    P: PropertyRepository + 'static,
    C: CityRepository + 'static,
{
    match service.remove_city(&city_name) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ListingServiceError) -> Response {
    let status = match &err {
        ListingServiceError::Draft(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ListingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ListingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ListingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
