//! HTTP server configuration object.

use std::net::SocketAddr;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) database_url: Option<String>,
    pub(crate) database_name: String,
}

/// Database selected when none is configured explicitly.
pub const DEFAULT_DATABASE_NAME: &str = "hospital_finder";

impl ServerConfig {
    /// Construct a configuration listening on `bind_addr` with no database
    /// configured.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            database_url: None,
            database_name: DEFAULT_DATABASE_NAME.to_owned(),
        }
    }

    /// Attach a MongoDB connection string. `None` leaves the store
    /// unconfigured: the process still serves its diagnostics surface while
    /// data endpoints report the store unavailable.
    #[must_use]
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        self.database_url = url;
        self
    }

    /// Select the database within the cluster.
    #[must_use]
    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
