//! Movie CRUD endpoints.
//!
//! ```text
//! POST   /api/v1/movies
//! GET    /api/v1/movies
//! GET    /api/v1/movies/{id}
//! PUT    /api/v1/movies/{id}
//! DELETE /api/v1/movies/{id}
//! ```
//!
//! Handlers return `ApiResult`; every failure is rendered by the exception
//! boundary, so nothing here builds an error body by hand.

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{
    ApiResponse, ErrorCode, Fault, Movie, MovieId, MovieSubmission, MovieValidator,
    RequestContext,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    ErrorResponseSchema, MovieListResponseSchema, MovieResponseSchema, MovieSubmissionSchema,
};
use crate::inbound::http::state::HttpState;

/// Resolve a path segment to a movie id.
///
/// A segment that is not a UUID cannot name any movie, so it is reported as
/// not found rather than malformed.
fn movie_id(raw: &str) -> Result<MovieId, Fault> {
    MovieId::parse(raw).ok_or_else(|| Fault::not_found(ErrorCode::MOVIE_NOT_FOUND))
}

/// Create a movie.
#[utoipa::path(
    post,
    path = "/api/v1/movies",
    request_body = MovieSubmissionSchema,
    responses(
        (status = 201, description = "Movie created", body = MovieResponseSchema),
        (status = 400, description = "Validation failed", body = ErrorResponseSchema),
        (status = 409, description = "Title already taken", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tags = ["movies"],
    operation_id = "createMovie"
)]
#[post("/movies")]
pub async fn create_movie(
    state: web::Data<HttpState>,
    context: RequestContext,
    payload: web::Json<MovieSubmission>,
) -> ApiResult<HttpResponse> {
    let submission = payload.into_inner();
    let draft = MovieValidator::new(state.movies.as_ref())
        .validate_new(&submission)
        .await?;
    let movie = state.movies.create(draft).await?;
    info!(
        correlation_id = %context.correlation_id(),
        movie_id = %movie.id(),
        "movie created"
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(movie)))
}

/// List every movie ordered by title.
#[utoipa::path(
    get,
    path = "/api/v1/movies",
    responses(
        (status = 200, description = "Movies", body = MovieListResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tags = ["movies"],
    operation_id = "listMovies"
)]
#[get("/movies")]
pub async fn list_movies(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let movies = state.movies.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(movies)))
}

/// Fetch one movie.
#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "Movie", body = MovieResponseSchema),
        (status = 404, description = "Movie not found", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tags = ["movies"],
    operation_id = "getMovie"
)]
#[get("/movies/{id}")]
pub async fn get_movie(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = movie_id(&path)?;
    let movie = state.movies.get(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(movie)))
}

/// Replace a movie's fields.
#[utoipa::path(
    put,
    path = "/api/v1/movies/{id}",
    params(("id" = String, Path, description = "Movie identifier")),
    request_body = MovieSubmissionSchema,
    responses(
        (status = 200, description = "Movie updated", body = MovieResponseSchema),
        (status = 400, description = "Validation failed", body = ErrorResponseSchema),
        (status = 404, description = "Movie not found", body = ErrorResponseSchema),
        (status = 409, description = "Title already taken", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tags = ["movies"],
    operation_id = "updateMovie"
)]
#[put("/movies/{id}")]
pub async fn update_movie(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<String>,
    payload: web::Json<MovieSubmission>,
) -> ApiResult<HttpResponse> {
    let id = movie_id(&path)?;
    // A missing movie is reported before any validation failure.
    state.movies.get(id).await?;
    let submission = payload.into_inner();
    let draft = MovieValidator::new(state.movies.as_ref())
        .validate_update(id, &submission)
        .await?;
    let movie: Movie = state.movies.update(id, draft).await?;
    info!(
        correlation_id = %context.correlation_id(),
        movie_id = %id,
        "movie updated"
    );
    Ok(HttpResponse::Ok().json(ApiResponse::success(movie)))
}

/// Remove a movie.
#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    params(("id" = String, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "Movie removed; `data` is null"),
        (status = 404, description = "Movie not found", body = ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = ErrorResponseSchema)
    ),
    tags = ["movies"],
    operation_id = "deleteMovie"
)]
#[delete("/movies/{id}")]
pub async fn delete_movie(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = movie_id(&path)?;
    state.movies.delete(id).await?;
    info!(
        correlation_id = %context.correlation_id(),
        movie_id = %id,
        "movie deleted"
    );
    Ok(HttpResponse::Ok().json(ApiResponse::<Movie>::empty()))
}
