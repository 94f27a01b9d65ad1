//! Document-store persistence adapters.
//!
//! Thin adapters only: each implementation translates between store
//! documents and domain types and maps driver failures onto [`StoreError`]
//! (`crate::domain::ports::StoreError`). No business logic lives here.
//!
//! Three implementations cover the deployment modes:
//! - [`mongo`]: the production MongoDB adapter with typed documents.
//! - [`unconfigured`]: used when no connection string is supplied; every
//!   operation reports the store as unavailable.
//! - [`memory`]: an in-process store for tests (`test-support` feature).

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod mongo;
pub mod unconfigured;

#[cfg(any(test, feature = "test-support"))]
pub use self::memory::InMemoryStore;
pub use self::mongo::{MongoStore, HOSPITAL_COLLECTION, REVIEW_COLLECTION};
pub use self::unconfigured::UnconfiguredStore;
