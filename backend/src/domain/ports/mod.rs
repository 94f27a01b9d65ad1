//! Driven ports over the external document store.
//!
//! Services depend on these traits only; concrete adapters live in
//! `outbound::persistence`. Every port is mockable in tests via `mockall`.

mod diagnostics;
mod error;
mod hospital_repository;
mod review_repository;

pub use self::diagnostics::{StoreDiagnostics, StoreStatus};
pub use self::error::StoreError;
pub use self::hospital_repository::{specialty_matches, HospitalFilter, HospitalRepository};
pub use self::review_repository::ReviewRepository;

#[cfg(test)]
pub use self::diagnostics::MockStoreDiagnostics;
#[cfg(test)]
pub use self::hospital_repository::MockHospitalRepository;
#[cfg(test)]
pub use self::review_repository::MockReviewRepository;
