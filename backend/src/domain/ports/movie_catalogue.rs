//! Driven port for movie storage.
//!
//! Handlers and validators depend on this trait only; the in-memory adapter
//! lives under `outbound`, and tests substitute mocks.

use async_trait::async_trait;

use crate::domain::{Fault, Movie, MovieDraft, MovieId};

/// Storage operations for movies.
///
/// Missing identifiers surface as [`Fault::not_found`] with
/// [`crate::domain::ErrorCode::MOVIE_NOT_FOUND`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalogue: Send + Sync {
    /// Whether a movie other than `excluding` already uses `title`.
    ///
    /// Titles compare case-insensitively after trimming.
    async fn title_exists(&self, title: &str, excluding: Option<MovieId>) -> Result<bool, Fault>;

    /// Store a new movie.
    async fn create(&self, draft: MovieDraft) -> Result<Movie, Fault>;

    /// Fetch a movie by identifier.
    async fn get(&self, id: MovieId) -> Result<Movie, Fault>;

    /// List every movie ordered by title.
    async fn list(&self) -> Result<Vec<Movie>, Fault>;

    /// Replace the fields of an existing movie.
    async fn update(&self, id: MovieId, draft: MovieDraft) -> Result<Movie, Fault>;

    /// Remove a movie.
    async fn delete(&self, id: MovieId) -> Result<(), Fault>;
}
