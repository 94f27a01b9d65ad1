//! Domain layer: typed records, geo math, services, and store ports.
//!
//! Everything here is transport agnostic. Inbound adapters translate HTTP
//! requests into these types and map [`DomainError`] to status codes;
//! outbound adapters implement the ports against a concrete store.

pub mod directory;
pub mod error;
pub mod geo;
pub mod hospital;
pub mod ports;
pub mod review;
pub mod seeding;

pub use self::directory::{
    DirectoryService, HospitalDetail, NearbyHospital, RecommendedHospital,
};
pub use self::error::{DomainError, ErrorCode};
pub use self::geo::{haversine_km, Coordinates, CoordinatesError, EARTH_RADIUS_KM};
pub use self::hospital::{
    Hospital, HospitalId, HospitalValidationError, InvalidHospitalId, NewHospital,
};
pub use self::review::{
    mean_rating, NewReview, Rating, RatingOutOfRange, Review, ReviewId, ReviewValidationError,
};
pub use self::seeding::{SeedOutcome, SeedingService};
