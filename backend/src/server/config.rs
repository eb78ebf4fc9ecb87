//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use movies_backend::domain::ports::MovieCatalogue;
use movies_backend::outbound::memory::InMemoryMovieCatalogue;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) catalogue: Arc<dyn MovieCatalogue>,
}

impl ServerConfig {
    /// Construct a configuration backed by an empty in-memory catalogue.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            catalogue: Arc::new(InMemoryMovieCatalogue::new()),
        }
    }

    /// Replace the catalogue adapter.
    #[cfg_attr(
        not(test),
        expect(
            dead_code,
            reason = "Only tests substitute the catalogue; the binary keeps the in-memory default"
        )
    )]
    #[must_use]
    pub fn with_catalogue(mut self, catalogue: Arc<dyn MovieCatalogue>) -> Self {
        self.catalogue = catalogue;
        self
    }

    /// Return the socket address the server will bind to.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Exercised by unit tests; retained for fixture access")
    )]
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
