//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::MovieCatalogue;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub movies: Arc<dyn MovieCatalogue>,
}

impl HttpState {
    /// Construct state around a movie catalogue.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use movies_backend::inbound::http::state::HttpState;
    /// use movies_backend::outbound::memory::InMemoryMovieCatalogue;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryMovieCatalogue::default()));
    /// let _movies = state.movies.clone();
    /// ```
    pub fn new(movies: Arc<dyn MovieCatalogue>) -> Self {
        Self { movies }
    }
}
