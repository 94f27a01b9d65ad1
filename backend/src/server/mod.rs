//! Server wiring: adapter construction, route registration, bootstrap.

pub mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{diagnostics, health, hospitals, recommend, seed};
use crate::outbound::persistence::{MongoStore, UnconfiguredStore};

/// Register every REST endpoint on an actix service config.
///
/// `HttpState` and `HealthState` must be provided as app data by the
/// caller. The nearby resource is registered before the `{id}` matcher so
/// `/hospitals/nearby` is never read as an id.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(diagnostics::index)
        .service(diagnostics::test_database)
        .service(seed::seed)
        .service(hospitals::nearby_hospitals)
        .service(hospitals::list_hospitals)
        .service(hospitals::hospital_reviews)
        .service(hospitals::update_beds)
        .service(hospitals::hospital_detail)
        .service(recommend::recommend)
        .service(health::ready)
        .service(health::live);
}

/// Build the HTTP state from the configured store.
///
/// With no connection string every data operation reports the store
/// unavailable, matching the diagnostic surface's "not configured" answer.
pub async fn build_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    match &config.database_url {
        Some(url) => {
            let store = MongoStore::connect(url, &config.database_name)
                .await
                .map_err(|err| {
                    std::io::Error::other(format!("invalid database configuration: {err}"))
                })?;
            Ok(HttpState::new(
                Arc::new(store.hospitals()),
                Arc::new(store.reviews()),
                Arc::new(store.diagnostics()),
            ))
        }
        None => {
            warn!("DATABASE_URL is not set; data endpoints will report the store unavailable");
            let stub = Arc::new(UnconfiguredStore);
            Ok(HttpState::new(stub.clone(), stub.clone(), stub))
        }
    }
}

/// Bootstrap and run the server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(build_state(&config).await?);
    let health = web::Data::new(HealthState::new());

    let server_state = state.clone();
    let server_health = health.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(server_state.clone())
            .app_data(server_health.clone())
            .configure(configure_api);
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(config.bind_addr())?;

    info!(addr = %config.bind_addr(), "hospital directory listening");
    health.mark_ready();
    server.run().await
}
