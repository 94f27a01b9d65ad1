//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend on the
//! domain services and ports only and stay testable against the in-memory
//! store.

use std::sync::Arc;

use crate::domain::ports::{HospitalRepository, ReviewRepository, StoreDiagnostics};
use crate::domain::{DirectoryService, SeedingService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: DirectoryService,
    pub seeding: SeedingService,
    pub diagnostics: Arc<dyn StoreDiagnostics>,
}

impl HttpState {
    /// Wire the services from a set of store adapters.
    pub fn new(
        hospitals: Arc<dyn HospitalRepository>,
        reviews: Arc<dyn ReviewRepository>,
        diagnostics: Arc<dyn StoreDiagnostics>,
    ) -> Self {
        Self {
            directory: DirectoryService::new(hospitals.clone(), reviews.clone()),
            seeding: SeedingService::new(hospitals, reviews),
            diagnostics,
        }
    }
}
