//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI specification for the REST surface.
//! Swagger UI serves it in debug builds at `/docs`.

use utoipa::OpenApi;

use crate::domain::{DomainError, ErrorCode};
use crate::inbound::http::schemas::{
    DiagnosticsResponse, HospitalDetailResponse, HospitalResponse, LocationResponse,
    MessageResponse, NearbyHospitalResponse, RecommendationResponse, ReviewResponse,
    SeedResponse, StatusResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hospital directory API",
        description = "Location-aware hospital directory: specialty filtering, \
                       proximity search, review aggregates, and recommendation \
                       scoring."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::diagnostics::index,
        crate::inbound::http::diagnostics::test_database,
        crate::inbound::http::seed::seed,
        crate::inbound::http::hospitals::list_hospitals,
        crate::inbound::http::hospitals::nearby_hospitals,
        crate::inbound::http::hospitals::hospital_detail,
        crate::inbound::http::hospitals::hospital_reviews,
        crate::inbound::http::hospitals::update_beds,
        crate::inbound::http::recommend::recommend,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        LocationResponse,
        HospitalResponse,
        NearbyHospitalResponse,
        HospitalDetailResponse,
        RecommendationResponse,
        ReviewResponse,
        MessageResponse,
        StatusResponse,
        SeedResponse,
        DiagnosticsResponse,
    )),
    tags(
        (name = "hospitals", description = "Hospital directory queries and bed updates"),
        (name = "recommendations", description = "Scored proximity recommendations"),
        (name = "admin", description = "Sample-data seeding"),
        (name = "diagnostics", description = "Liveness message and store diagnostics"),
        (name = "health", description = "Orchestration probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_compat_path_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/test",
            "/seed",
            "/hospitals",
            "/hospitals/nearby",
            "/hospitals/{id}",
            "/hospitals/{id}/reviews",
            "/hospitals/{id}/beds",
            "/recommend",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "missing OpenAPI entry for {path}"
            );
        }
    }
}
