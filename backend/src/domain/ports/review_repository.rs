//! Driven port for the review collection.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::review::{NewReview, Review, ReviewId};

/// Port for reading and appending reviews.
///
/// Lookups key on the raw `hospital_id` string: the reference is weak and
/// unvalidated, so a malformed or orphaned id simply matches nothing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Fetch reviews referencing `hospital_id`, optionally capped at
    /// `limit`. `None` fetches every matching review (used by rating
    /// aggregation, which averages over all reviews).
    async fn find_for_hospital(
        &self,
        hospital_id: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Review>, StoreError>;

    /// Insert a validated review and return the store-assigned identity.
    async fn insert(&self, review: NewReview) -> Result<ReviewId, StoreError>;
}
