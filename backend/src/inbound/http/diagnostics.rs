//! Root liveness message and backend/database diagnostics.

use actix_web::{get, web};

use crate::inbound::http::schemas::{DiagnosticsResponse, MessageResponse};
use crate::inbound::http::state::HttpState;

/// Liveness message for the root path.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = MessageResponse)),
    tags = ["diagnostics"],
    operation_id = "root"
)]
#[get("/")]
pub async fn index() -> web::Json<MessageResponse> {
    web::Json(MessageResponse {
        message: "Hospital Bed Finder Backend Running".to_owned(),
    })
}

/// Backend and database reachability report.
///
/// Never fails: an unreachable database is the report, not an error.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Diagnostics snapshot", body = DiagnosticsResponse)),
    tags = ["diagnostics"],
    operation_id = "testDatabase"
)]
#[get("/test")]
pub async fn test_database(state: web::Data<HttpState>) -> web::Json<DiagnosticsResponse> {
    let status = state.diagnostics.status().await;
    let database = if !status.configured {
        "not configured"
    } else if status.reachable {
        "connected"
    } else {
        "unreachable"
    };
    let connection_status = if status.reachable {
        "connected"
    } else {
        "not connected"
    };
    web::Json(DiagnosticsResponse {
        backend: "running".to_owned(),
        database: database.to_owned(),
        database_name: status.database_name,
        connection_status: connection_status.to_owned(),
        collections: status.collections,
        error: status.error,
    })
}
