//! In-process coverage of the read-side REST surface: liveness,
//! diagnostics, listing, proximity search, detail, reviews, and
//! recommendations.

mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use serde_json::Value;

use backend::domain::ports::ReviewRepository;
use backend::domain::{NewReview, Rating};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::UnconfiguredStore;

use support::{get_json, seed, spawn_app};

#[actix_web::test]
async fn the_root_path_reports_liveness() {
    let (_store, app) = spawn_app().await;
    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hospital Bed Finder Backend Running");
}

#[actix_web::test]
async fn diagnostics_report_the_backing_store() {
    let (_store, app) = spawn_app().await;
    let (status, body) = get_json(&app, "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["backend"], "running");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["connection_status"], "connected");
    let collections: Vec<&str> = body["collections"]
        .as_array()
        .expect("collections array")
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(collections, vec!["hospital", "review"]);
}

#[actix_web::test]
async fn health_probes_answer() {
    let (_store, app) = spawn_app().await;
    let (ready, _) = get_json(&app, "/health/ready").await;
    assert_eq!(ready, StatusCode::OK);
    let (live, _) = get_json(&app, "/health/live").await;
    assert_eq!(live, StatusCode::OK);
}

#[actix_web::test]
async fn listing_filters_by_specialty_substring() {
    let (_store, app) = spawn_app().await;
    seed(&app).await;

    let (status, all) = get_json(&app, "/hospitals").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().expect("array").len(), 12);

    let (status, filtered) = get_json(&app, "/hospitals?specialty=CARDIO").await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().expect("array");
    assert!(!filtered.is_empty());
    for hospital in filtered {
        let matched = hospital["specialties"]
            .as_array()
            .expect("specialties array")
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.to_lowercase().contains("cardio"));
        assert!(matched, "unexpected hit: {hospital}");
        assert!(hospital["id"].is_string(), "id must be a string");
    }

    let (status, none) = get_json(&app, "/hospitals?specialty=no-such-specialty").await;
    assert_eq!(status, StatusCode::OK);
    assert!(none.as_array().expect("array").is_empty());
}

#[actix_web::test]
async fn nearby_results_are_in_radius_and_sorted() {
    let (_store, app) = spawn_app().await;
    seed(&app).await;

    let (status, body) = get_json(&app, "/hospitals/nearby?lat=28.6139&lng=77.2090").await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().expect("array");
    assert!(!results.is_empty());

    let mut previous = f64::MIN;
    for hit in results {
        let distance = hit["distance_km"].as_f64().expect("distance_km");
        assert!(distance <= 25.0, "distance {distance} beyond default radius");
        assert!(distance >= previous, "results must be sorted ascending");
        previous = distance;
    }

    let (_, wide) = get_json(
        &app,
        "/hospitals/nearby?lat=28.6139&lng=77.2090&radius_km=1000",
    )
    .await;
    assert_eq!(wide.as_array().expect("array").len(), 12);
}

#[actix_web::test]
async fn nearby_validates_its_parameters() {
    let (_store, app) = spawn_app().await;

    // Missing required parameters fail in deserialisation.
    let (status, _) = get_json(&app, "/hospitals/nearby?lat=28.6").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get_json(&app, "/hospitals/nearby?lat=95.0&lng=77.0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");

    let (status, body) =
        get_json(&app, "/hospitals/nearby?lat=28.6&lng=77.2&radius_km=-4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn detail_returns_the_rating_aggregate() {
    let (store, app) = spawn_app().await;
    seed(&app).await;

    let (_, hospitals) = get_json(&app, "/hospitals").await;
    let first_id = hospitals[0]["id"].as_str().expect("id string").to_owned();

    // Pin the aggregate by replacing reviews with a known set.
    for rating in [3, 4, 5] {
        store
            .insert(
                NewReview::new(
                    first_id.clone(),
                    "Integration",
                    Rating::new(rating).expect("valid rating"),
                    None,
                    None,
                )
                .expect("valid review"),
            )
            .await
            .expect("insert review");
    }

    let (status, detail) = get_json(&app, &format!("/hospitals/{first_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["id"], Value::String(first_id.clone()));
    let count = detail["reviews_count"].as_u64().expect("reviews_count");
    assert!(count >= 3);
    assert!(detail["avg_rating"].is_f64() || detail["avg_rating"].is_u64());
    assert!(
        detail.get("avg_rating").is_some(),
        "avg_rating key must be present"
    );
}

#[actix_web::test]
async fn detail_distinguishes_bad_ids_from_missing_hospitals() {
    let (_store, app) = spawn_app().await;
    seed(&app).await;

    let (status, body) = get_json(&app, "/hospitals/not-a-real-id").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_id");

    let (status, body) = get_json(&app, "/hospitals/ffffffffffffffffffffffff").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[actix_web::test]
async fn review_listings_are_orphan_safe() {
    let (store, app) = spawn_app().await;
    store
        .insert(
            NewReview::new(
                "dangling-reference",
                "Maya",
                Rating::new(4).expect("valid rating"),
                Some("left after the hospital record vanished".to_owned()),
                None,
            )
            .expect("valid review"),
        )
        .await
        .expect("insert review");

    // The reference is not even a well-formed id; listing must still work.
    let (status, body) = get_json(&app, "/hospitals/dangling-reference/reviews").await;
    assert_eq!(status, StatusCode::OK);
    let reviews = body.as_array().expect("array");
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["user_name"], "Maya");
    assert_eq!(reviews[0]["rating"], 4);

    let (status, body) = get_json(&app, "/hospitals/65f1a2b3c4d5e6f708192a3b/reviews").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("array").is_empty());
}

#[actix_web::test]
async fn recommendations_are_capped_scored_and_sorted() {
    let (_store, app) = spawn_app().await;
    seed(&app).await;

    let (status, body) = get_json(&app, "/recommend?lat=28.6139&lng=77.2090").await;
    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().expect("array");
    assert!(!results.is_empty());
    assert!(results.len() <= 10);

    let mut previous = f64::MAX;
    for hit in results {
        let score = hit["score"].as_f64().expect("score");
        assert!((0.0..=1.0).contains(&score), "score {score} out of range");
        assert!(score <= previous, "results must be sorted descending");
        previous = score;
        assert!(hit["id"].is_string());
        assert!(hit.get("avg_rating").is_some(), "avg_rating key present");
    }

    let (status, filtered) = get_json(&app, "/recommend?lat=28.6139&lng=77.2090&specialty=onco").await;
    assert_eq!(status, StatusCode::OK);
    for hit in filtered.as_array().expect("array") {
        let matched = hit["specialties"]
            .as_array()
            .expect("specialties")
            .iter()
            .filter_map(Value::as_str)
            .any(|s| s.to_lowercase().contains("onco"));
        assert!(matched);
    }
}

#[actix_web::test]
async fn an_unconfigured_store_maps_to_500() {
    let stub = Arc::new(UnconfiguredStore);
    let state = HttpState::new(stub.clone(), stub.clone(), stub);
    let health = actix_web::web::Data::new(backend::inbound::http::health::HealthState::new());
    let app = actix_web::test::init_service(
        actix_web::App::new()
            .app_data(actix_web::web::Data::new(state))
            .app_data(health)
            .configure(backend::server::configure_api),
    )
    .await;

    let (status, body) = get_json(&app, "/hospitals").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "store_unavailable");
    assert_eq!(body["message"], "database unavailable");

    // The diagnostics surface still answers.
    let (status, body) = get_json(&app, "/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "not configured");
}
