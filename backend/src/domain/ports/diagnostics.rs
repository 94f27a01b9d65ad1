//! Driven port for the `/test` backend/database diagnostics endpoint.

use async_trait::async_trait;

/// Snapshot of the store's reachability, reported without failing.
///
/// Diagnostics never return an error: an unreachable database is itself the
/// information the endpoint exists to report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoreStatus {
    /// Whether a connection string was supplied at startup.
    pub configured: bool,
    /// Whether the database answered a round trip just now.
    pub reachable: bool,
    /// Name of the backing database, when configured.
    pub database_name: Option<String>,
    /// Collection names visible in the database, when reachable.
    pub collections: Vec<String>,
    /// Driver-level cause when the round trip failed.
    pub error: Option<String>,
}

/// Port answering the diagnostics probe.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreDiagnostics: Send + Sync {
    /// Probe the store and describe what was found.
    async fn status(&self) -> StoreStatus;
}
