//! Driven port for the hospital collection.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::hospital::{Hospital, HospitalId, NewHospital};

/// Simple predicate pushed down to the store on filtered finds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HospitalFilter {
    /// No filtering; every record matches.
    #[default]
    All,
    /// Case-insensitive substring match against any entry of the
    /// specialties set.
    SpecialtyContains(String),
}

impl HospitalFilter {
    /// Evaluate the predicate against a record.
    ///
    /// Adapters that cannot push the predicate into the database (the
    /// in-memory store) use this directly; the in-process specialty filter
    /// of the nearby scan shares it so both paths match identically.
    pub fn matches(&self, hospital: &Hospital) -> bool {
        match self {
            Self::All => true,
            Self::SpecialtyContains(needle) => {
                specialty_matches(needle, &hospital.specialties)
            }
        }
    }
}

/// Case-insensitive substring match against any specialties entry.
pub fn specialty_matches(needle: &str, specialties: &[String]) -> bool {
    let needle = needle.to_lowercase();
    specialties
        .iter()
        .any(|entry| entry.to_lowercase().contains(&needle))
}

/// Port for reading and mutating hospital records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HospitalRepository: Send + Sync {
    /// Fetch up to `limit` hospitals matching `filter`.
    async fn find(
        &self,
        filter: &HospitalFilter,
        limit: u32,
    ) -> Result<Vec<Hospital>, StoreError>;

    /// Fetch a single hospital; `None` when absent.
    async fn find_by_id(&self, id: &HospitalId) -> Result<Option<Hospital>, StoreError>;

    /// Insert a validated record and return the store-assigned identity.
    async fn insert(&self, hospital: NewHospital) -> Result<HospitalId, StoreError>;

    /// Atomically update the available-bed count for one hospital.
    ///
    /// Returns whether a record matched the id; `false` maps to `NotFound`
    /// at the service layer.
    async fn set_available_beds(
        &self,
        id: &HospitalId,
        available_beds: u32,
    ) -> Result<bool, StoreError>;

    /// Number of hospital records in the collection.
    async fn count(&self) -> Result<u64, StoreError>;
}
