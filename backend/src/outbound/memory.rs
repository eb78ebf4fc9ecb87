//! In-process movie catalogue.
//!
//! Backs the `MovieCatalogue` port with a `HashMap` behind a `std` `RwLock`.
//! Guards are dropped before each method returns, so no lock is held across
//! an await point. A poisoned lock surfaces as an unexpected fault.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::MovieCatalogue;
use crate::domain::{ErrorCode, Fault, Movie, MovieDraft, MovieId};

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Movie catalogue held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryMovieCatalogue {
    movies: RwLock<HashMap<MovieId, Movie>>,
}

impl InMemoryMovieCatalogue {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<MovieId, Movie>>, Fault> {
        self.movies
            .read()
            .map_err(|_| Fault::unexpected_message("movie catalogue lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<MovieId, Movie>>, Fault> {
        self.movies
            .write()
            .map_err(|_| Fault::unexpected_message("movie catalogue lock poisoned"))
    }
}

fn title_taken(movies: &HashMap<MovieId, Movie>, title: &str, excluding: Option<MovieId>) -> bool {
    let key = title_key(title);
    movies
        .values()
        .any(|movie| Some(movie.id()) != excluding && title_key(movie.title()) == key)
}

#[async_trait]
impl MovieCatalogue for InMemoryMovieCatalogue {
    async fn title_exists(&self, title: &str, excluding: Option<MovieId>) -> Result<bool, Fault> {
        Ok(title_taken(&*self.read()?, title, excluding))
    }

    async fn create(&self, draft: MovieDraft) -> Result<Movie, Fault> {
        let mut movies = self.write()?;
        if title_taken(&movies, &draft.title, None) {
            return Err(Fault::conflict(ErrorCode::DUPLICATE_TITLE));
        }
        let movie = Movie::new(MovieId::random(), draft);
        movies.insert(movie.id(), movie.clone());
        Ok(movie)
    }

    async fn get(&self, id: MovieId) -> Result<Movie, Fault> {
        self.read()?
            .get(&id)
            .cloned()
            .ok_or_else(|| Fault::not_found(ErrorCode::MOVIE_NOT_FOUND))
    }

    async fn list(&self) -> Result<Vec<Movie>, Fault> {
        let mut movies: Vec<Movie> = self.read()?.values().cloned().collect();
        movies.sort_by_cached_key(|movie| (title_key(movie.title()), *movie.id().as_uuid()));
        Ok(movies)
    }

    async fn update(&self, id: MovieId, draft: MovieDraft) -> Result<Movie, Fault> {
        let mut movies = self.write()?;
        if !movies.contains_key(&id) {
            return Err(Fault::not_found(ErrorCode::MOVIE_NOT_FOUND));
        }
        if title_taken(&movies, &draft.title, Some(id)) {
            return Err(Fault::conflict(ErrorCode::DUPLICATE_TITLE));
        }
        let movie = Movie::new(id, draft);
        movies.insert(id, movie.clone());
        Ok(movie)
    }

    async fn delete(&self, id: MovieId) -> Result<(), Fault> {
        self.write()?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Fault::not_found(ErrorCode::MOVIE_NOT_FOUND))
    }
}
