//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ApiError`].
#[derive(ToSchema)]
#[schema(as = ApiError)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApiErrorSchema {
    /// Five-digit registry code: HTTP class, domain block, sequence.
    #[schema(example = 40101)]
    code: u32,
    /// Registered description of the code.
    #[schema(example = "Title is required")]
    message: String,
}

/// OpenAPI schema for a failed [`crate::domain::ApiResponse`].
#[derive(ToSchema)]
#[schema(as = ErrorResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorResponseSchema {
    /// `null` unless a domain fault attached a payload.
    data: Option<serde_json::Value>,
    /// Every error reported for the request, in order.
    errors: Vec<ApiErrorSchema>,
}

/// OpenAPI schema for [`crate::domain::Movie`].
#[derive(ToSchema)]
#[schema(as = Movie, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MovieSchema {
    /// Stable movie identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Title, unique across the catalogue.
    #[schema(example = "Alien")]
    title: String,
    /// Free-form description.
    #[schema(example = "A crew meets something nasty in deep space.")]
    description: String,
    /// Release year.
    #[schema(example = 1979)]
    release_year: Option<u16>,
}

/// OpenAPI schema for [`crate::domain::MovieSubmission`].
#[derive(ToSchema)]
#[schema(as = MovieSubmission, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MovieSubmissionSchema {
    /// Required; 2 to 100 characters.
    #[schema(example = "Alien")]
    title: Option<String>,
    /// Required; 10 to 1000 characters.
    #[schema(example = "A crew meets something nasty in deep space.")]
    description: Option<String>,
    /// Optional; 1888 to 2100.
    #[schema(example = 1979)]
    release_year: Option<i64>,
}

/// OpenAPI schema for a successful single-movie response.
#[derive(ToSchema)]
#[schema(as = MovieResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MovieResponseSchema {
    /// The movie.
    data: MovieSchema,
}

/// OpenAPI schema for a successful movie list response.
#[derive(ToSchema)]
#[schema(as = MovieListResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct MovieListResponseSchema {
    /// Movies ordered by title.
    data: Vec<MovieSchema>,
}
