//! Directory query service: list, proximity search, detail aggregation,
//! bed updates, and recommendation scoring.
//!
//! The service owns the scan limits and scoring weights; adapters stay
//! mechanical. All reads scan at most a few hundred records, so proximity
//! search is a plain in-process pass over an unindexed fetch.

use std::sync::Arc;

use serde_json::json;

use crate::domain::error::DomainError;
use crate::domain::geo::{haversine_km, Coordinates};
use crate::domain::hospital::{Hospital, HospitalId};
use crate::domain::ports::{specialty_matches, HospitalFilter, HospitalRepository, ReviewRepository};
use crate::domain::review::{mean_rating, Review};

/// Cap on plain list queries.
pub const LIST_LIMIT: u32 = 100;
/// Cap on the proximity scan.
pub const NEARBY_SCAN_LIMIT: u32 = 300;
/// Cap on review listings.
pub const REVIEWS_LIMIT: u32 = 100;
/// Radius applied when a nearby query does not specify one.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 25.0;
/// Fixed radius used by the recommendation pass.
pub const RECOMMEND_RADIUS_KM: f64 = 50.0;
/// Maximum number of recommendations returned.
pub const RECOMMEND_LIMIT: usize = 10;

const AVAILABILITY_WEIGHT: f64 = 0.6;
const RATING_WEIGHT: f64 = 0.4;
const MAX_RATING: f64 = 5.0;

/// A hospital with its computed distance from a query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyHospital {
    pub hospital: Hospital,
    /// Kilometres from the origin, rounded to 2 decimal places.
    pub distance_km: f64,
}

/// A hospital enriched with the detail-view rating aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalDetail {
    pub hospital: Hospital,
    /// Mean review rating rounded to 1 decimal place; absent without
    /// reviews.
    pub avg_rating: Option<f64>,
    pub reviews_count: usize,
}

/// A nearby hospital with its composite recommendation score.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedHospital {
    pub hospital: Hospital,
    pub distance_km: f64,
    /// Weighted score in [0, 1], rounded to 3 decimal places.
    pub score: f64,
    /// Mean review rating rounded to 1 decimal place; absent without
    /// reviews.
    pub avg_rating: Option<f64>,
}

/// Stateless query service over the injected store ports.
#[derive(Clone)]
pub struct DirectoryService {
    hospitals: Arc<dyn HospitalRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl DirectoryService {
    /// Construct the service with its store adapters.
    pub fn new(hospitals: Arc<dyn HospitalRepository>, reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { hospitals, reviews }
    }

    /// List up to [`LIST_LIMIT`] hospitals, optionally filtered by
    /// specialty (case-insensitive substring, pushed down to the store).
    pub async fn list(&self, specialty: Option<&str>) -> Result<Vec<Hospital>, DomainError> {
        let filter = match specialty {
            Some(s) => HospitalFilter::SpecialtyContains(s.to_owned()),
            None => HospitalFilter::All,
        };
        Ok(self.hospitals.find(&filter, LIST_LIMIT).await?)
    }

    /// Proximity search around `origin`.
    ///
    /// Scans up to [`NEARBY_SCAN_LIMIT`] hospitals, filters by specialty
    /// in-process, keeps those within `radius_km`, and sorts ascending by
    /// distance with ties broken by descending available beds. Distances
    /// are rounded to 2 decimals before the radius check and sort, so the
    /// reported value and the ordering always agree.
    pub async fn nearby(
        &self,
        origin: Coordinates,
        radius_km: f64,
        specialty: Option<&str>,
    ) -> Result<Vec<NearbyHospital>, DomainError> {
        let candidates = self
            .hospitals
            .find(&HospitalFilter::All, NEARBY_SCAN_LIMIT)
            .await?;

        let mut results: Vec<NearbyHospital> = candidates
            .into_iter()
            .filter(|h| {
                specialty.is_none_or(|needle| specialty_matches(needle, &h.specialties))
            })
            .filter_map(|h| {
                let distance_km = round_to(haversine_km(origin, h.location), 2);
                (distance_km <= radius_km).then_some(NearbyHospital {
                    hospital: h,
                    distance_km,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| b.hospital.available_beds.cmp(&a.hospital.available_beds))
        });
        Ok(results)
    }

    /// Fetch one hospital with its rating aggregate.
    pub async fn detail(&self, raw_id: &str) -> Result<HospitalDetail, DomainError> {
        let id = parse_id(raw_id)?;
        let hospital = self
            .hospitals
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("hospital not found"))?;

        let reviews = self.reviews.find_for_hospital(&id.to_hex(), None).await?;
        Ok(HospitalDetail {
            hospital,
            avg_rating: mean_rating(&reviews).map(|avg| round_to(avg, 1)),
            reviews_count: reviews.len(),
        })
    }

    /// Reviews referencing the given hospital id, capped at
    /// [`REVIEWS_LIMIT`].
    ///
    /// No id validation and no existence check: the reference is weak, so
    /// an unknown or malformed id yields an empty list rather than an
    /// error.
    pub async fn reviews(&self, raw_id: &str) -> Result<Vec<Review>, DomainError> {
        Ok(self
            .reviews
            .find_for_hospital(raw_id, Some(REVIEWS_LIMIT))
            .await?)
    }

    /// Persist a new available-bed count.
    ///
    /// Enforces `available_beds <= total_beds` against the current record
    /// before writing; the write itself is the store's atomic single-field
    /// update.
    pub async fn update_beds(&self, raw_id: &str, available_beds: u32) -> Result<(), DomainError> {
        let id = parse_id(raw_id)?;
        let hospital = self
            .hospitals
            .find_by_id(&id)
            .await?
            .ok_or_else(|| DomainError::not_found("hospital not found"))?;

        if available_beds > hospital.total_beds {
            return Err(DomainError::validation(
                "available_beds cannot exceed total_beds",
            )
            .with_details(json!({
                "field": "available_beds",
                "value": available_beds,
                "total_beds": hospital.total_beds,
            })));
        }

        let matched = self.hospitals.set_available_beds(&id, available_beds).await?;
        if !matched {
            // Deleted between the read and the write; absence wins.
            return Err(DomainError::not_found("hospital not found"));
        }
        Ok(())
    }

    /// Top-[`RECOMMEND_LIMIT`] hospitals near `origin`, scored by bed
    /// availability and review ratings.
    ///
    /// Runs the nearby search at a fixed [`RECOMMEND_RADIUS_KM`], then
    /// scores each candidate as `0.6 * availability_ratio +
    /// 0.4 * mean_rating / 5` (mean rating 0 without reviews). The sort is
    /// a stable descending pass over the rounded score, so ties keep their
    /// distance order from the nearby search.
    pub async fn recommend(
        &self,
        origin: Coordinates,
        specialty: Option<&str>,
    ) -> Result<Vec<RecommendedHospital>, DomainError> {
        let candidates = self.nearby(origin, RECOMMEND_RADIUS_KM, specialty).await?;

        let mut scored = Vec::with_capacity(candidates.len());
        for NearbyHospital {
            hospital,
            distance_km,
        } in candidates
        {
            let reviews = self
                .reviews
                .find_for_hospital(&hospital.id.to_hex(), None)
                .await?;
            let rating = mean_rating(&reviews);
            let score = AVAILABILITY_WEIGHT * hospital.availability_ratio()
                + RATING_WEIGHT * (rating.unwrap_or(0.0) / MAX_RATING);
            scored.push(RecommendedHospital {
                hospital,
                distance_km,
                score: round_to(score, 3),
                avg_rating: rating.map(|avg| round_to(avg, 1)),
            });
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(RECOMMEND_LIMIT);
        Ok(scored)
    }
}

fn parse_id(raw: &str) -> Result<HospitalId, DomainError> {
    HospitalId::parse(raw).map_err(|err| {
        DomainError::invalid_id("invalid hospital id").with_details(json!({ "value": err.raw }))
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    //! Service-level coverage over mocked store ports.

    use super::*;
    use crate::domain::error::ErrorCode;
    use crate::domain::hospital::NewHospital;
    use crate::domain::ports::{MockHospitalRepository, MockReviewRepository, StoreError};
    use crate::domain::review::{NewReview, Rating, ReviewId};
    use mongodb::bson::oid::ObjectId;

    const KNOWN_ID: &str = "65f1a2b3c4d5e6f708192a3b";

    fn coords(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).expect("test coordinates in range")
    }

    fn hospital(
        name: &str,
        lat: f64,
        lng: f64,
        specialties: &[&str],
        total: u32,
        available: u32,
    ) -> Hospital {
        Hospital::from_new(
            HospitalId::from_object_id(ObjectId::new()),
            NewHospital::new(
                name,
                "1 Healthcare Ave, Delhi",
                coords(lat, lng),
                specialties.iter().map(|s| (*s).to_owned()).collect(),
                total,
                available,
                None,
            )
            .expect("valid test hospital"),
        )
    }

    fn review_with_rating(hospital_id: &str, rating: i64) -> Review {
        Review::from_new(
            ReviewId::from_object_id(ObjectId::new()),
            NewReview::new(
                hospital_id,
                "Aarav",
                Rating::new(rating).expect("valid rating"),
                Some("fine".to_owned()),
                None,
            )
            .expect("valid test review"),
        )
    }

    fn service_with(
        hospitals: Vec<Hospital>,
        reviews: Vec<Review>,
    ) -> DirectoryService {
        let mut hospital_repo = MockHospitalRepository::new();
        hospital_repo
            .expect_find()
            .returning(move |filter, limit| {
                Ok(hospitals
                    .iter()
                    .filter(|h| filter.matches(h))
                    .take(limit as usize)
                    .cloned()
                    .collect())
            });
        let mut review_repo = MockReviewRepository::new();
        review_repo
            .expect_find_for_hospital()
            .returning(move |hospital_id, limit| {
                let matching: Vec<Review> = reviews
                    .iter()
                    .filter(|r| r.hospital_id == hospital_id)
                    .cloned()
                    .collect();
                Ok(match limit {
                    Some(cap) => matching.into_iter().take(cap as usize).collect(),
                    None => matching,
                })
            });
        DirectoryService::new(Arc::new(hospital_repo), Arc::new(review_repo))
    }

    #[actix_web::test]
    async fn nearby_respects_the_radius_and_sorts_by_distance() {
        // ~0.1 deg latitude is ~11 km; the far hospital sits outside 25 km.
        let service = service_with(
            vec![
                hospital("Far", 29.4, 77.2, &[], 100, 10),
                hospital("Mid", 28.7139, 77.2090, &[], 100, 10),
                hospital("Close", 28.6239, 77.2090, &[], 100, 10),
            ],
            vec![],
        );
        let results = service
            .nearby(coords(28.6139, 77.2090), DEFAULT_NEARBY_RADIUS_KM, None)
            .await
            .expect("nearby succeeds");

        let names: Vec<&str> = results.iter().map(|r| r.hospital.name.as_str()).collect();
        assert_eq!(names, vec!["Close", "Mid"]);
        for r in &results {
            assert!(r.distance_km <= DEFAULT_NEARBY_RADIUS_KM);
        }
        assert!(results[0].distance_km <= results[1].distance_km);
    }

    #[actix_web::test]
    async fn nearby_breaks_distance_ties_by_available_beds() {
        // Same location, so identical distance; more beds must come first.
        let service = service_with(
            vec![
                hospital("Lean", 28.65, 77.25, &[], 100, 5),
                hospital("Stocked", 28.65, 77.25, &[], 100, 80),
            ],
            vec![],
        );
        let results = service
            .nearby(coords(28.6139, 77.2090), 25.0, None)
            .await
            .expect("nearby succeeds");
        let names: Vec<&str> = results.iter().map(|r| r.hospital.name.as_str()).collect();
        assert_eq!(names, vec!["Stocked", "Lean"]);
    }

    #[actix_web::test]
    async fn nearby_applies_the_specialty_filter_case_insensitively() {
        let service = service_with(
            vec![
                hospital("Cardiac", 28.62, 77.21, &["Cardiology"], 100, 10),
                hospital("Skin", 28.62, 77.21, &["Dermatology"], 100, 10),
            ],
            vec![],
        );
        let results = service
            .nearby(coords(28.6139, 77.2090), 25.0, Some("cardio"))
            .await
            .expect("nearby succeeds");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].hospital.name, "Cardiac");
    }

    #[actix_web::test]
    async fn detail_attaches_the_rating_aggregate() {
        let h = hospital("Rated", 28.62, 77.21, &[], 100, 10);
        let hex = h.id.to_hex();
        let mut hospital_repo = MockHospitalRepository::new();
        let found = h.clone();
        hospital_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));
        let reviews = vec![
            review_with_rating(&hex, 3),
            review_with_rating(&hex, 4),
            review_with_rating(&hex, 5),
        ];
        let mut review_repo = MockReviewRepository::new();
        review_repo
            .expect_find_for_hospital()
            .returning(move |_, _| Ok(reviews.clone()));
        let service = DirectoryService::new(Arc::new(hospital_repo), Arc::new(review_repo));

        let detail = service.detail(&hex).await.expect("detail succeeds");
        assert_eq!(detail.avg_rating, Some(4.0));
        assert_eq!(detail.reviews_count, 3);
    }

    #[actix_web::test]
    async fn detail_with_no_reviews_has_an_absent_rating() {
        let h = hospital("Quiet", 28.62, 77.21, &[], 100, 10);
        let hex = h.id.to_hex();
        let mut hospital_repo = MockHospitalRepository::new();
        hospital_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(h.clone())));
        let mut review_repo = MockReviewRepository::new();
        review_repo
            .expect_find_for_hospital()
            .returning(|_, _| Ok(vec![]));
        let service = DirectoryService::new(Arc::new(hospital_repo), Arc::new(review_repo));

        let detail = service.detail(&hex).await.expect("detail succeeds");
        assert_eq!(detail.avg_rating, None);
        assert_eq!(detail.reviews_count, 0);
    }

    #[actix_web::test]
    async fn detail_distinguishes_malformed_ids_from_missing_records() {
        let mut hospital_repo = MockHospitalRepository::new();
        hospital_repo.expect_find_by_id().returning(|_| Ok(None));
        let review_repo = MockReviewRepository::new();
        let service = DirectoryService::new(Arc::new(hospital_repo), Arc::new(review_repo));

        let malformed = service.detail("not-an-id").await.expect_err("must fail");
        assert_eq!(malformed.code(), ErrorCode::InvalidId);
        let missing = service.detail(KNOWN_ID).await.expect_err("must fail");
        assert_eq!(missing.code(), ErrorCode::NotFound);
    }

    #[actix_web::test]
    async fn reviews_listing_is_orphan_safe() {
        let service = service_with(vec![], vec![review_with_rating("orphan-ref", 4)]);
        // A raw, even malformed, id is looked up verbatim.
        let listed = service.reviews("orphan-ref").await.expect("listable");
        assert_eq!(listed.len(), 1);
        let empty = service.reviews("no-such-ref").await.expect("listable");
        assert!(empty.is_empty());
    }

    #[actix_web::test]
    async fn update_beds_enforces_capacity() {
        let h = hospital("Capped", 28.62, 77.21, &[], 50, 10);
        let hex = h.id.to_hex();
        let mut hospital_repo = MockHospitalRepository::new();
        hospital_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(h.clone())));
        hospital_repo.expect_set_available_beds().never();
        let service =
            DirectoryService::new(Arc::new(hospital_repo), Arc::new(MockReviewRepository::new()));

        let err = service.update_beds(&hex, 51).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[actix_web::test]
    async fn update_beds_reports_missing_and_malformed_ids() {
        let mut hospital_repo = MockHospitalRepository::new();
        hospital_repo.expect_find_by_id().returning(|_| Ok(None));
        let service =
            DirectoryService::new(Arc::new(hospital_repo), Arc::new(MockReviewRepository::new()));

        let missing = service.update_beds(KNOWN_ID, 1).await.expect_err("fails");
        assert_eq!(missing.code(), ErrorCode::NotFound);
        let malformed = service.update_beds("xyz", 1).await.expect_err("fails");
        assert_eq!(malformed.code(), ErrorCode::InvalidId);
    }

    #[actix_web::test]
    async fn update_beds_writes_through_the_port() {
        let h = hospital("Writable", 28.62, 77.21, &[], 50, 10);
        let hex = h.id.to_hex();
        let mut hospital_repo = MockHospitalRepository::new();
        hospital_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(h.clone())));
        hospital_repo
            .expect_set_available_beds()
            .withf(|_, beds| *beds == 25)
            .times(1)
            .returning(|_, _| Ok(true));
        let service =
            DirectoryService::new(Arc::new(hospital_repo), Arc::new(MockReviewRepository::new()));

        service.update_beds(&hex, 25).await.expect("update succeeds");
    }

    #[actix_web::test]
    async fn recommend_caps_scores_and_result_count() {
        let mut hospitals = Vec::new();
        for i in 0..12 {
            hospitals.push(hospital(
                &format!("H{i}"),
                28.6 + f64::from(i) * 0.001,
                77.2,
                &[],
                100,
                i * 8,
            ));
        }
        let service = service_with(hospitals, vec![]);
        let results = service
            .recommend(coords(28.6139, 77.2090), None)
            .await
            .expect("recommend succeeds");

        assert_eq!(results.len(), RECOMMEND_LIMIT);
        for r in &results {
            assert!((0.0..=1.0).contains(&r.score), "score {} out of range", r.score);
        }
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[actix_web::test]
    async fn recommend_scores_zero_for_empty_unreviewed_hospitals() {
        let h = hospital("Empty", 28.62, 77.21, &[], 100, 0);
        let service = service_with(vec![h], vec![]);
        let results = service
            .recommend(coords(28.6139, 77.2090), None)
            .await
            .expect("recommend succeeds");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0.0);
        assert_eq!(results[0].avg_rating, None);
    }

    #[actix_web::test]
    async fn recommend_weights_availability_and_rating() {
        let h = hospital("Scored", 28.62, 77.21, &[], 100, 50);
        let hex = h.id.to_hex();
        let reviews = vec![review_with_rating(&hex, 4), review_with_rating(&hex, 4)];
        let service = service_with(vec![h], reviews);
        let results = service
            .recommend(coords(28.6139, 77.2090), None)
            .await
            .expect("recommend succeeds");
        // 0.6 * 0.5 + 0.4 * (4 / 5) = 0.62
        assert_eq!(results[0].score, 0.62);
        assert_eq!(results[0].avg_rating, Some(4.0));
    }

    #[actix_web::test]
    async fn store_unavailability_surfaces_as_a_distinct_error() {
        let mut hospital_repo = MockHospitalRepository::new();
        hospital_repo
            .expect_find()
            .returning(|_, _| Err(StoreError::unavailable("connection refused")));
        let service =
            DirectoryService::new(Arc::new(hospital_repo), Arc::new(MockReviewRepository::new()));

        let err = service.list(None).await.expect_err("must fail");
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
    }
}
