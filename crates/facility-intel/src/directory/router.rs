use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::FacilityId;
use super::grade::{grade_legend, grade_of, SafetyScore};
use super::intelligence::IntelligenceLookup;
use super::repository::FacilityRepository;
use super::service::{CityResolutionOutcome, DirectoryService, DirectoryServiceError};

pub const CITY_ROUTE_PREFIX: &str = "/api/v1/cities";

/// Router builder exposing the directory read endpoints.
pub fn directory_router<F, L>(service: Arc<DirectoryService<F, L>>) -> Router
where
    F: FacilityRepository + 'static,
    L: IntelligenceLookup + 'static,
{
    Router::new()
        .route("/api/v1/directory", get(overview_handler::<F, L>))
        .route(CITY_ROUTE_PREFIX, get(cities_handler::<F, L>))
        .route("/api/v1/cities/:city", get(city_handler::<F, L>))
        .route(
            "/api/v1/facilities/:facility_id",
            get(facility_handler::<F, L>),
        )
        .route("/api/v1/search", get(search_handler::<F, L>))
        .route("/api/v1/grades", get(grade_legend_handler))
        .route("/api/v1/grades/:score", get(grade_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    #[serde(default)]
    q: String,
}

pub(crate) async fn overview_handler<F, L>(
    State(service): State<Arc<DirectoryService<F, L>>>,
) -> Response
where
    F: FacilityRepository + 'static,
    L: IntelligenceLookup + 'static,
{
    match service.overview() {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn cities_handler<F, L>(
    State(service): State<Arc<DirectoryService<F, L>>>,
) -> Response
where
    F: FacilityRepository + 'static,
    L: IntelligenceLookup + 'static,
{
    match service.city_hubs() {
        Ok(hubs) => {
            let cities: Vec<_> = hubs.iter().map(|city| city.summary()).collect();
            (StatusCode::OK, axum::Json(cities)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn city_handler<F, L>(
    State(service): State<Arc<DirectoryService<F, L>>>,
    Path(city): Path<String>,
) -> Response
where
    F: FacilityRepository + 'static,
    L: IntelligenceLookup + 'static,
{
    match service.city(&city) {
        Ok(CityResolutionOutcome::Found(view)) => {
            (StatusCode::OK, axum::Json(*view)).into_response()
        }
        Ok(CityResolutionOutcome::Redirect { slug }) => (
            StatusCode::PERMANENT_REDIRECT,
            [(header::LOCATION, canonical_city_path(&slug))],
        )
            .into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn facility_handler<F, L>(
    State(service): State<Arc<DirectoryService<F, L>>>,
    Path(facility_id): Path<String>,
) -> Response
where
    F: FacilityRepository + 'static,
    L: IntelligenceLookup + 'static,
{
    match service.facility_profile(&FacilityId(facility_id)) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn search_handler<F, L>(
    State(service): State<Arc<DirectoryService<F, L>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    F: FacilityRepository + 'static,
    L: IntelligenceLookup + 'static,
{
    match service.search(&params.q) {
        Ok(hits) => (StatusCode::OK, axum::Json(hits)).into_response(),
        Err(other) => error_response(other),
    }
}

pub(crate) async fn grade_legend_handler() -> Response {
    (StatusCode::OK, axum::Json(grade_legend())).into_response()
}

pub(crate) async fn grade_handler(Path(score): Path<i64>) -> Response {
    match SafetyScore::new(score) {
        Ok(score) => (StatusCode::OK, axum::Json(grade_of(score))).into_response(),
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

/// Slugs keep punctuation and non-ASCII letters, so the segment is encoded.
pub(crate) fn canonical_city_path(slug: &str) -> String {
    format!("{CITY_ROUTE_PREFIX}/{}", urlencoding::encode(slug))
}

fn error_response(error: DirectoryServiceError) -> Response {
    let status = match error {
        DirectoryServiceError::CityNotFound(_) | DirectoryServiceError::FacilityNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        DirectoryServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
