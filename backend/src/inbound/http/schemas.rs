//! Response DTOs for the REST surface.
//!
//! Wire names stay snake_case with the identity field rendered as `id`
//! (hex string); this is the compatibility contract of the service, so the
//! DTOs are the only place domain types meet serde.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Hospital, HospitalDetail, NearbyHospital, RecommendedHospital, Review, SeedOutcome,
};

/// Geo-coordinates as stored on hospital records.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LocationResponse {
    #[schema(example = 28.6139)]
    pub lat: f64,
    #[schema(example = 77.2090)]
    pub lng: f64,
}

/// A hospital record as returned by list and nearby queries.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HospitalResponse {
    /// Stable identity (hex ObjectId string).
    #[schema(example = "65f1a2b3c4d5e6f708192a3b")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: LocationResponse,
    pub specialties: Vec<String>,
    pub total_beds: u32,
    pub available_beds: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl From<Hospital> for HospitalResponse {
    fn from(value: Hospital) -> Self {
        Self {
            id: value.id.to_hex(),
            name: value.name,
            address: value.address,
            location: LocationResponse {
                lat: value.location.lat(),
                lng: value.location.lng(),
            },
            specialties: value.specialties,
            total_beds: value.total_beds,
            available_beds: value.available_beds,
            image_url: value.image_url,
        }
    }
}

/// A proximity-search hit: the hospital plus its computed distance.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NearbyHospitalResponse {
    #[serde(flatten)]
    pub hospital: HospitalResponse,
    /// Kilometres from the query origin, rounded to 2 decimal places.
    pub distance_km: f64,
}

impl From<NearbyHospital> for NearbyHospitalResponse {
    fn from(value: NearbyHospital) -> Self {
        Self {
            hospital: value.hospital.into(),
            distance_km: value.distance_km,
        }
    }
}

/// Detail view: the hospital plus its review aggregate.
///
/// `avg_rating` is always present as a key and `null` without reviews;
/// clients distinguish "unrated" from 0.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HospitalDetailResponse {
    #[serde(flatten)]
    pub hospital: HospitalResponse,
    pub avg_rating: Option<f64>,
    pub reviews_count: usize,
}

impl From<HospitalDetail> for HospitalDetailResponse {
    fn from(value: HospitalDetail) -> Self {
        Self {
            hospital: value.hospital.into(),
            avg_rating: value.avg_rating,
            reviews_count: value.reviews_count,
        }
    }
}

/// A scored recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub hospital: HospitalResponse,
    /// Kilometres from the query origin, rounded to 2 decimal places.
    pub distance_km: f64,
    /// Composite score in [0, 1], rounded to 3 decimal places.
    pub score: f64,
    pub avg_rating: Option<f64>,
}

impl From<RecommendedHospital> for RecommendationResponse {
    fn from(value: RecommendedHospital) -> Self {
        Self {
            hospital: value.hospital.into(),
            distance_km: value.distance_km,
            score: value.score,
            avg_rating: value.avg_rating,
        }
    }
}

/// A review as listed under a hospital.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReviewResponse {
    /// Stable identity (hex ObjectId string).
    pub id: String,
    /// Weak reference to the reviewed hospital.
    pub hospital_id: String,
    pub user_name: String,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visit_date: Option<DateTime<Utc>>,
}

impl From<Review> for ReviewResponse {
    fn from(value: Review) -> Self {
        Self {
            id: value.id.to_hex(),
            hospital_id: value.hospital_id,
            user_name: value.user_name,
            rating: value.rating.value(),
            comment: value.comment,
            visit_date: value.visit_date,
        }
    }
}

/// Liveness message for the root endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Outcome of a bed update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Outcome of the seeding operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SeedResponse {
    /// `"seeded"` on first population, `"exists"` when data was present.
    #[schema(example = "seeded")]
    pub status: String,
    /// Hospital count after the call.
    pub count: u64,
}

impl From<SeedOutcome> for SeedResponse {
    fn from(value: SeedOutcome) -> Self {
        match value {
            SeedOutcome::Seeded { hospitals } => Self {
                status: "seeded".to_owned(),
                count: hospitals,
            },
            SeedOutcome::AlreadyPopulated { hospitals } => Self {
                status: "exists".to_owned(),
                count: hospitals,
            },
        }
    }
}

/// Backend/database diagnostics for the `/test` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DiagnosticsResponse {
    #[schema(example = "running")]
    pub backend: String,
    /// `"connected"`, `"unreachable"`, or `"not configured"`.
    pub database: String,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
