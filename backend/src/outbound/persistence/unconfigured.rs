//! Stand-in store used when no connection string was supplied.
//!
//! The process still starts and serves its liveness, diagnostics, and
//! documentation surface; every data operation reports the store as
//! unavailable, which the HTTP layer maps to a 500.

use async_trait::async_trait;

use crate::domain::hospital::{Hospital, HospitalId, NewHospital};
use crate::domain::ports::{
    HospitalFilter, HospitalRepository, ReviewRepository, StoreDiagnostics, StoreError,
    StoreStatus,
};
use crate::domain::review::{NewReview, Review, ReviewId};

const NOT_CONFIGURED: &str = "DATABASE_URL is not set";

/// Adapter whose every operation fails with [`StoreError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredStore;

#[async_trait]
impl HospitalRepository for UnconfiguredStore {
    async fn find(
        &self,
        _filter: &HospitalFilter,
        _limit: u32,
    ) -> Result<Vec<Hospital>, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    async fn find_by_id(&self, _id: &HospitalId) -> Result<Option<Hospital>, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    async fn insert(&self, _hospital: NewHospital) -> Result<HospitalId, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    async fn set_available_beds(
        &self,
        _id: &HospitalId,
        _available_beds: u32,
    ) -> Result<bool, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }
}

#[async_trait]
impl ReviewRepository for UnconfiguredStore {
    async fn find_for_hospital(
        &self,
        _hospital_id: &str,
        _limit: Option<u32>,
    ) -> Result<Vec<Review>, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }

    async fn insert(&self, _review: NewReview) -> Result<ReviewId, StoreError> {
        Err(StoreError::unavailable(NOT_CONFIGURED))
    }
}

#[async_trait]
impl StoreDiagnostics for UnconfiguredStore {
    async fn status(&self) -> StoreStatus {
        StoreStatus {
            configured: false,
            reachable: false,
            database_name: None,
            collections: Vec::new(),
            error: Some(NOT_CONFIGURED.to_owned()),
        }
    }
}
