//! Recommendation endpoint: top scored hospitals near an origin.

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::inbound::http::hospitals::parse_origin;
use crate::inbound::http::schemas::RecommendationResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters for the recommendation pass.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecommendQuery {
    /// Origin latitude in degrees.
    pub lat: f64,
    /// Origin longitude in degrees.
    pub lng: f64,
    /// Case-insensitive substring matched against any specialty entry.
    pub specialty: Option<String>,
}

/// Top-10 hospitals within 50 km, scored by bed availability and review
/// ratings.
#[utoipa::path(
    get,
    path = "/recommend",
    params(RecommendQuery),
    responses(
        (status = 200, description = "Scored recommendations, best first", body = [RecommendationResponse]),
        (status = 400, description = "Origin out of range"),
        (status = 500, description = "Store unavailable")
    ),
    tags = ["recommendations"],
    operation_id = "recommend"
)]
#[get("/recommend")]
pub async fn recommend(
    state: web::Data<HttpState>,
    query: web::Query<RecommendQuery>,
) -> ApiResult<web::Json<Vec<RecommendationResponse>>> {
    let origin = parse_origin(query.lat, query.lng)?;
    let results = state
        .directory
        .recommend(origin, query.specialty.as_deref())
        .await?;
    Ok(web::Json(
        results
            .into_iter()
            .map(RecommendationResponse::from)
            .collect(),
    ))
}
