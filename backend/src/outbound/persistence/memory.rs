//! In-process store used by unit and integration tests.
//!
//! Behaviour mirrors the MongoDB adapter closely enough for the service
//! contract: identities are real ObjectIds, filters share the domain
//! predicate, and absence is reported the same way.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::hospital::{Hospital, HospitalId, NewHospital};
use crate::domain::ports::{
    HospitalFilter, HospitalRepository, ReviewRepository, StoreDiagnostics, StoreError,
    StoreStatus,
};
use crate::domain::review::{NewReview, Review, ReviewId};

/// Shared in-memory collections; clone an `Arc<InMemoryStore>` into every
/// port seat.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    hospitals: RwLock<Vec<Hospital>>,
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryStore {
    /// Fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl std::fmt::Debug) -> StoreError {
    StoreError::query("in-memory store lock poisoned")
}

#[async_trait]
impl HospitalRepository for InMemoryStore {
    async fn find(
        &self,
        filter: &HospitalFilter,
        limit: u32,
    ) -> Result<Vec<Hospital>, StoreError> {
        let hospitals = self.hospitals.read().map_err(poisoned)?;
        Ok(hospitals
            .iter()
            .filter(|h| filter.matches(h))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &HospitalId) -> Result<Option<Hospital>, StoreError> {
        let hospitals = self.hospitals.read().map_err(poisoned)?;
        Ok(hospitals.iter().find(|h| h.id == *id).cloned())
    }

    async fn insert(&self, hospital: NewHospital) -> Result<HospitalId, StoreError> {
        let id = HospitalId::from_object_id(ObjectId::new());
        let mut hospitals = self.hospitals.write().map_err(poisoned)?;
        hospitals.push(Hospital::from_new(id, hospital));
        Ok(id)
    }

    async fn set_available_beds(
        &self,
        id: &HospitalId,
        available_beds: u32,
    ) -> Result<bool, StoreError> {
        let mut hospitals = self.hospitals.write().map_err(poisoned)?;
        match hospitals.iter_mut().find(|h| h.id == *id) {
            Some(hospital) => {
                hospital.available_beds = available_beds;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let hospitals = self.hospitals.read().map_err(poisoned)?;
        Ok(hospitals.len() as u64)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn find_for_hospital(
        &self,
        hospital_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Review>, StoreError> {
        let reviews = self.reviews.read().map_err(poisoned)?;
        let matching = reviews.iter().filter(|r| r.hospital_id == hospital_id);
        Ok(match limit {
            Some(cap) => matching.take(cap as usize).cloned().collect(),
            None => matching.cloned().collect(),
        })
    }

    async fn insert(&self, review: NewReview) -> Result<ReviewId, StoreError> {
        let id = ReviewId::from_object_id(ObjectId::new());
        let mut reviews = self.reviews.write().map_err(poisoned)?;
        reviews.push(Review::from_new(id, review));
        Ok(id)
    }
}

#[async_trait]
impl StoreDiagnostics for InMemoryStore {
    async fn status(&self) -> StoreStatus {
        StoreStatus {
            configured: true,
            reachable: true,
            database_name: Some("memory".to_owned()),
            collections: vec!["hospital".to_owned(), "review".to_owned()],
            error: None,
        }
    }
}
