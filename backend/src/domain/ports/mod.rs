//! Domain ports implemented by outbound adapters.

mod movie_catalogue;

#[cfg(test)]
pub use movie_catalogue::MockMovieCatalogue;
pub use movie_catalogue::MovieCatalogue;
