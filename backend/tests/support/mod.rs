//! Shared helpers for the in-process HTTP integration tests.

// Each test binary compiles this module independently and uses a subset of
// the helpers.
#![allow(dead_code)]

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web, App, Error};
use serde_json::Value;

use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::InMemoryStore;
use backend::server::configure_api;

/// Build the full REST surface over a fresh in-memory store.
///
/// Returns the store handle as well so tests can pre-load records without
/// going through HTTP.
pub async fn spawn_app() -> (
    Arc<InMemoryStore>,
    impl Service<Request, Response = ServiceResponse, Error = Error>,
) {
    let store = Arc::new(InMemoryStore::new());
    let state = HttpState::new(store.clone(), store.clone(), store.clone());
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(health)
            .configure(configure_api),
    )
    .await;
    (store, app)
}

/// POST /seed and return the parsed body.
pub async fn seed<S>(app: &S) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post().uri("/seed").to_request(),
    )
    .await;
    assert!(response.status().is_success(), "seed must succeed");
    actix_test::read_body_json(response).await
}

/// GET a path and return (status, parsed JSON body).
///
/// Non-JSON bodies (e.g. actix's own 400 for undeserialisable queries)
/// come back as `Value::Null`.
pub async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let response =
        actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, value)
}

/// POST a JSON body and return (status, parsed JSON body).
pub async fn post_json<S>(app: &S, uri: &str, body: &Value) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri(uri)
            .set_json(body)
            .to_request(),
    )
    .await;
    let status = response.status();
    let bytes = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
