//! Idempotent sample-data seeding endpoint.

use actix_web::{post, web};

use crate::inbound::http::schemas::SeedResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Populate the store with fixture data when it is empty.
///
/// A populated store is reported as-is (`status: "exists"`), so the call is
/// safe to repeat.
#[utoipa::path(
    post,
    path = "/seed",
    responses(
        (status = 200, description = "Seeding outcome with the resulting hospital count", body = SeedResponse),
        (status = 500, description = "Store unavailable")
    ),
    tags = ["admin"],
    operation_id = "seed"
)]
#[post("/seed")]
pub async fn seed(state: web::Data<HttpState>) -> ApiResult<web::Json<SeedResponse>> {
    let outcome = state.seeding.seed_if_empty().await?;
    Ok(web::Json(outcome.into()))
}
