//! Review aggregate: immutable patient feedback referencing a hospital.

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

/// Opaque review identity (ObjectId wire format).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReviewId(ObjectId);

impl ReviewId {
    /// Wrap an identifier produced by a store adapter.
    pub fn from_object_id(id: ObjectId) -> Self {
        Self(id)
    }

    /// The underlying ObjectId, for store adapters.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    /// Wire representation: lowercase hexadecimal.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A star rating in the closed range 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

/// Raised for ratings outside 1–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rating {0} is outside the range 1-5")]
pub struct RatingOutOfRange(pub i64);

impl Rating {
    /// Validate a raw rating value.
    ///
    /// Accepts `i64` so adapters can funnel untrusted wire integers through
    /// without a separate bounds check.
    pub fn new(value: i64) -> Result<Self, RatingOutOfRange> {
        match u8::try_from(value) {
            Ok(v @ 1..=5) => Ok(Self(v)),
            _ => Err(RatingOutOfRange(value)),
        }
    }

    /// The validated star count.
    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Constraint violations raised when constructing reviews.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewValidationError {
    /// The reviewer name is empty or whitespace.
    #[error("reviewer name must not be empty")]
    EmptyUserName,
}

/// A review before an identity has been assigned by the store.
///
/// `hospital_id` is a weak string reference: it is NOT validated against
/// existing hospitals (or even against the id format), so orphaned reviews
/// are representable and must stay harmless everywhere they are read.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub hospital_id: String,
    pub user_name: String,
    pub rating: Rating,
    pub comment: Option<String>,
    pub visit_date: Option<DateTime<Utc>>,
}

impl NewReview {
    /// Validate and assemble a review.
    pub fn new(
        hospital_id: impl Into<String>,
        user_name: impl Into<String>,
        rating: Rating,
        comment: Option<String>,
        visit_date: Option<DateTime<Utc>>,
    ) -> Result<Self, ReviewValidationError> {
        let user_name = user_name.into();
        if user_name.trim().is_empty() {
            return Err(ReviewValidationError::EmptyUserName);
        }
        Ok(Self {
            hospital_id: hospital_id.into(),
            user_name,
            rating,
            comment,
            visit_date,
        })
    }
}

/// A persisted review. Immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub hospital_id: String,
    pub user_name: String,
    pub rating: Rating,
    pub comment: Option<String>,
    pub visit_date: Option<DateTime<Utc>>,
}

impl Review {
    /// Attach a store-assigned identity to a validated review.
    pub fn from_new(id: ReviewId, record: NewReview) -> Self {
        let NewReview {
            hospital_id,
            user_name,
            rating,
            comment,
            visit_date,
        } = record;
        Self {
            id,
            hospital_id,
            user_name,
            rating,
            comment,
            visit_date,
        }
    }
}

/// Mean rating across a slice of reviews; `None` when there are none.
pub fn mean_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: f64 = reviews.iter().map(|r| f64::from(r.rating.value())).sum();
    Some(sum / reviews.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn review(rating: i64) -> Review {
        Review::from_new(
            ReviewId::from_object_id(mongodb::bson::oid::ObjectId::new()),
            NewReview::new(
                "65f1a2b3c4d5e6f708192a3b",
                "Maya",
                Rating::new(rating).expect("valid rating"),
                None,
                None,
            )
            .expect("valid review"),
        )
    }

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn ratings_in_range_are_accepted(#[case] value: i64) {
        assert_eq!(i64::from(Rating::new(value).expect("valid").value()), value);
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(i64::MAX)]
    fn ratings_out_of_range_are_rejected(#[case] value: i64) {
        assert_eq!(Rating::new(value), Err(RatingOutOfRange(value)));
    }

    #[test]
    fn empty_reviewer_name_is_rejected() {
        let err = NewReview::new("hid", "   ", Rating::new(4).expect("valid"), None, None)
            .expect_err("must reject");
        assert_eq!(err, ReviewValidationError::EmptyUserName);
    }

    #[test]
    fn mean_rating_of_three_four_five_is_four() {
        let reviews = vec![review(3), review(4), review(5)];
        assert_eq!(mean_rating(&reviews), Some(4.0));
    }

    #[test]
    fn mean_rating_is_absent_without_reviews() {
        assert_eq!(mean_rating(&[]), None);
    }
}
