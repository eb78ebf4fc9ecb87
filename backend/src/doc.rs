//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the movie endpoints, the health probes, and the
//! schema wrappers from [`crate::inbound::http::schemas`], which keep domain
//! types free of utoipa derives. The document is served by Swagger UI in
//! debug builds and exported via `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ApiErrorSchema, ErrorResponseSchema, MovieListResponseSchema, MovieResponseSchema,
    MovieSchema, MovieSubmissionSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Movies API",
        description = "Movie catalogue CRUD with a uniform error envelope. Every \
                       response carries an `x-correlation-id` header."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::movies::create_movie,
        crate::inbound::http::movies::list_movies,
        crate::inbound::http::movies::get_movie,
        crate::inbound::http::movies::update_movie,
        crate::inbound::http::movies::delete_movie,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ApiErrorSchema,
        ErrorResponseSchema,
        MovieSchema,
        MovieSubmissionSchema,
        MovieResponseSchema,
        MovieListResponseSchema
    )),
    tags(
        (name = "movies", description = "Movie catalogue operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
