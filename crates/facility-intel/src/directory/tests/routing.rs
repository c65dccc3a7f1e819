use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use crate::directory::intelligence::IntelligenceStore;
use crate::directory::router::{city_handler, directory_router, grade_handler};
use crate::directory::service::DirectoryService;
use crate::directory::repository::CsvFacilityRepository;

async fn get(uri: &str) -> axum::response::Response {
    directory_router(Arc::new(build_service()))
        .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
        .await
        .expect("route executes")
}

#[tokio::test]
async fn city_route_returns_hub_payload() {
    let response = get("/api/v1/cities/houston").await;
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["name"], "Houston");
    assert_eq!(payload["slug"], "houston");
    assert_eq!(payload["total_facilities"], 2);
    assert_eq!(payload["avg_safety_score"], 68);
    assert_eq!(payload["rankings"]["layout"], "unified");
    assert_eq!(payload["facilities"][0]["name"], "Oak Manor");
    assert_eq!(payload["facilities"][0]["intelligence"]["safety_score"], 95);
}

#[tokio::test]
async fn city_route_redirects_to_canonical_slug() {
    let response = get("/api/v1/cities/San%20Antonio").await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/api/v1/cities/san-antonio"
    );
}

#[tokio::test]
async fn redirects_encode_slugs_that_are_not_url_safe() {
    let repository = CsvFacilityRepository::new(
        vec![
            facility("p1", "Border Rose", "Foo/Bar"),
            facility("p2", "Franklin Ridge", "él paso"),
        ],
        "TX",
    );
    let service = Arc::new(DirectoryService::new(
        Arc::new(repository),
        Arc::new(store(&[("p1", 82, 3), ("p2", 71, 5)])),
    ));
    let router = directory_router(service);
    let fetch = |uri: &'static str| {
        router
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
    };

    let response = fetch("/api/v1/cities/FOO%2FBAR").await.expect("route executes");
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/api/v1/cities/foo%2Fbar"
    );
    let response = fetch("/api/v1/cities/foo%2Fbar").await.expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = fetch("/api/v1/cities/%C3%89L%20PASO").await.expect("route executes");
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "/api/v1/cities/%C3%A9l-paso"
    );
    let response = fetch("/api/v1/cities/%C3%A9l-paso").await.expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["name"], "Él Paso");
}

#[tokio::test]
async fn city_handler_returns_not_found_for_unknown_city() {
    let service = Arc::new(build_service());
    let response = city_handler::<CsvFacilityRepository, IntelligenceStore>(
        State(service),
        Path("atlantis".to_string()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("atlantis"));
}

#[tokio::test]
async fn split_rankings_serialize_both_panels() {
    let payload = read_json_body(get("/api/v1/cities/san-antonio").await).await;
    let rankings = &payload["rankings"];
    assert_eq!(rankings["layout"], "split");
    assert_eq!(rankings["title"], "Top Rated Facilities");
    assert_eq!(rankings["top"].as_array().expect("top panel").len(), 3);
    assert_eq!(rankings["worst"][0]["name"], "Southside Rehab");
}

#[tokio::test]
async fn cities_route_lists_summaries() {
    let payload = read_json_body(get("/api/v1/cities").await).await;
    let cities = payload.as_array().expect("array payload");
    assert_eq!(cities.len(), 3);
    assert!(cities.iter().all(|city| city.get("facilities").is_none()));
}

#[tokio::test]
async fn directory_route_returns_overview() {
    let payload = read_json_body(get("/api/v1/directory").await).await;
    assert_eq!(payload["statewide"]["total_facilities"], 11);
    assert_eq!(payload["index"]["H"][0]["name"], "Houston");
}

#[tokio::test]
async fn facility_route_handles_found_and_missing() {
    let response = get("/api/v1/facilities/a").await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["assessment"]["grade"], "A");
    assert_eq!(payload["assessment"]["tone"], "positive");

    let response = get("/api/v1/facilities/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_route_uses_query_string() {
    let payload = read_json_body(get("/api/v1/search?q=oak").await).await;
    let names: Vec<&str> = payload
        .as_array()
        .expect("array payload")
        .iter()
        .filter_map(|hit| hit["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Oak Manor", "Mission Oaks", "Stone Oak"]);

    let payload = read_json_body(get("/api/v1/search").await).await;
    assert_eq!(payload, serde_json::json!([]));
}

#[tokio::test]
async fn grade_handler_rejects_out_of_range_scores() {
    let response = grade_handler(Path(85)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["grade"], "B");
    assert_eq!(payload["grade_label"], "Safety First");

    let response = grade_handler(Path(101)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn grade_legend_lists_every_band() {
    let payload = read_json_body(get("/api/v1/grades").await).await;
    let bands = payload.as_array().expect("legend is an array");
    assert_eq!(bands.len(), 5);
    assert_eq!(bands[0]["grade"], "A");
    assert_eq!(bands[0]["range"], "90-100");
    assert_eq!(bands[4]["grade"], "F");
    assert_eq!(bands[4]["tone"], "warning");
}

#[tokio::test]
async fn repository_outage_is_an_internal_error() {
    let service = Arc::new(DirectoryService::new(
        Arc::new(UnavailableRepository),
        Arc::new(IntelligenceStore::default()),
    ));
    let response = directory_router(service)
        .oneshot(
            Request::get("/api/v1/cities")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
