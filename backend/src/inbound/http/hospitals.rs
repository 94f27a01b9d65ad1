//! Hospital endpoints: list, proximity search, detail, reviews, and bed
//! updates.

use actix_web::{get, post, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::directory::DEFAULT_NEARBY_RADIUS_KM;
use crate::domain::{Coordinates, DomainError};
use crate::inbound::http::schemas::{
    HospitalDetailResponse, HospitalResponse, NearbyHospitalResponse, ReviewResponse,
    StatusResponse,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Query parameters for the hospital list.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Case-insensitive substring matched against any specialty entry.
    pub specialty: Option<String>,
}

/// List hospitals, optionally filtered by specialty.
#[utoipa::path(
    get,
    path = "/hospitals",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching hospitals", body = [HospitalResponse]),
        (status = 500, description = "Store unavailable")
    ),
    tags = ["hospitals"],
    operation_id = "listHospitals"
)]
#[get("/hospitals")]
pub async fn list_hospitals(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<web::Json<Vec<HospitalResponse>>> {
    let hospitals = state.directory.list(query.specialty.as_deref()).await?;
    Ok(web::Json(
        hospitals.into_iter().map(HospitalResponse::from).collect(),
    ))
}

/// Query parameters for the proximity search.
#[derive(Debug, Deserialize, IntoParams)]
pub struct NearbyQuery {
    /// Origin latitude in degrees.
    pub lat: f64,
    /// Origin longitude in degrees.
    pub lng: f64,
    /// Search radius in kilometres; defaults to 25.
    pub radius_km: Option<f64>,
    /// Case-insensitive substring matched against any specialty entry.
    pub specialty: Option<String>,
}

/// Hospitals within a radius of the origin, nearest first.
#[utoipa::path(
    get,
    path = "/hospitals/nearby",
    params(NearbyQuery),
    responses(
        (status = 200, description = "Hospitals within the radius, sorted by distance", body = [NearbyHospitalResponse]),
        (status = 400, description = "Origin or radius out of range"),
        (status = 500, description = "Store unavailable")
    ),
    tags = ["hospitals"],
    operation_id = "nearbyHospitals"
)]
#[get("/hospitals/nearby")]
pub async fn nearby_hospitals(
    state: web::Data<HttpState>,
    query: web::Query<NearbyQuery>,
) -> ApiResult<web::Json<Vec<NearbyHospitalResponse>>> {
    let origin = parse_origin(query.lat, query.lng)?;
    let radius_km = parse_radius(query.radius_km)?;
    let results = state
        .directory
        .nearby(origin, radius_km, query.specialty.as_deref())
        .await?;
    Ok(web::Json(
        results.into_iter().map(NearbyHospitalResponse::from).collect(),
    ))
}

/// One hospital with its rating aggregate.
#[utoipa::path(
    get,
    path = "/hospitals/{id}",
    params(("id" = String, Path, description = "Hospital id (hex ObjectId)")),
    responses(
        (status = 200, description = "Hospital detail", body = HospitalDetailResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such hospital"),
        (status = 500, description = "Store unavailable")
    ),
    tags = ["hospitals"],
    operation_id = "hospitalDetail"
)]
#[get("/hospitals/{id}")]
pub async fn hospital_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<HospitalDetailResponse>> {
    let detail = state.directory.detail(&path.into_inner()).await?;
    Ok(web::Json(detail.into()))
}

/// Reviews referencing a hospital id.
#[utoipa::path(
    get,
    path = "/hospitals/{id}/reviews",
    params(("id" = String, Path, description = "Hospital id as referenced by reviews")),
    responses(
        (status = 200, description = "Reviews for the id; empty when none reference it", body = [ReviewResponse]),
        (status = 500, description = "Store unavailable")
    ),
    tags = ["hospitals"],
    operation_id = "hospitalReviews"
)]
#[get("/hospitals/{id}/reviews")]
pub async fn hospital_reviews(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ReviewResponse>>> {
    let reviews = state.directory.reviews(&path.into_inner()).await?;
    Ok(web::Json(
        reviews.into_iter().map(ReviewResponse::from).collect(),
    ))
}

/// Body for the bed-update endpoint.
///
/// Unknown fields are rejected so typos fail loudly instead of silently
/// updating nothing.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateBedsRequest {
    /// New available-bed count; must not exceed the hospital's capacity.
    pub available_beds: i64,
}

/// Update a hospital's available-bed count.
#[utoipa::path(
    post,
    path = "/hospitals/{id}/beds",
    params(("id" = String, Path, description = "Hospital id (hex ObjectId)")),
    request_body = UpdateBedsRequest,
    responses(
        (status = 200, description = "Updated", body = StatusResponse),
        (status = 400, description = "Malformed id or body"),
        (status = 404, description = "No such hospital"),
        (status = 422, description = "Count is negative or exceeds capacity"),
        (status = 500, description = "Store unavailable")
    ),
    tags = ["hospitals"],
    operation_id = "updateBeds"
)]
#[post("/hospitals/{id}/beds")]
pub async fn update_beds(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<UpdateBedsRequest>,
) -> ApiResult<web::Json<StatusResponse>> {
    let available_beds = u32::try_from(body.available_beds).map_err(|_| {
        DomainError::validation("available_beds must be a non-negative integer")
            .with_details(json!({ "field": "available_beds", "value": body.available_beds }))
    })?;
    state
        .directory
        .update_beds(&path.into_inner(), available_beds)
        .await?;
    Ok(web::Json(StatusResponse {
        status: "ok".to_owned(),
    }))
}

pub(crate) fn parse_origin(lat: f64, lng: f64) -> Result<Coordinates, DomainError> {
    Coordinates::new(lat, lng).map_err(|err| {
        DomainError::invalid_request(err.to_string())
            .with_details(json!({ "lat": lat, "lng": lng }))
    })
}

pub(crate) fn parse_radius(radius_km: Option<f64>) -> Result<f64, DomainError> {
    let radius_km = radius_km.unwrap_or(DEFAULT_NEARBY_RADIUS_KM);
    if !radius_km.is_finite() || radius_km <= 0.0 {
        return Err(DomainError::invalid_request(
            "radius_km must be a positive number",
        )
        .with_details(json!({ "radius_km": radius_km })));
    }
    Ok(radius_km)
}
