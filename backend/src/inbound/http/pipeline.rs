//! Request pipeline composition.
//!
//! Stage order, outermost first:
//!
//! ```text
//! Correlation -> ExceptionBoundary -> routing / handlers
//! ```
//!
//! Actix runs the last `wrap` first on the way in, so `ExceptionBoundary` is
//! registered before `Correlation`.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use super::correlation::Correlation;
use super::error::json_error_handler;
use super::exception::ExceptionBoundary;
use super::health::{HealthState, live, ready};
use super::movies::{create_movie, delete_movie, get_movie, list_movies, update_movie};
use super::state::HttpState;
use crate::domain::{ErrorCode, Fault, FaultClassifier};

/// Collaborators needed to assemble the application.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub classifier: FaultClassifier,
}

async fn route_not_found() -> Result<actix_web::HttpResponse, Fault> {
    Err(Fault::not_found(ErrorCode::ROUTE_NOT_FOUND))
}

/// Build the application with both pipeline stages installed.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::web;
/// use movies_backend::domain::FaultClassifier;
/// use movies_backend::inbound::http::health::HealthState;
/// use movies_backend::inbound::http::pipeline::{AppDependencies, build_app};
/// use movies_backend::inbound::http::state::HttpState;
/// use movies_backend::outbound::memory::InMemoryMovieCatalogue;
///
/// let _app = build_app(AppDependencies {
///     health_state: web::Data::new(HealthState::new()),
///     http_state: web::Data::new(HttpState::new(Arc::new(InMemoryMovieCatalogue::default()))),
///     classifier: FaultClassifier::default(),
/// });
/// ```
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        classifier,
    } = deps;

    let api = web::scope("/api/v1")
        .service(create_movie)
        .service(list_movies)
        .service(get_movie)
        .service(update_movie)
        .service(delete_movie);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(ExceptionBoundary::new(classifier))
        .wrap(Correlation)
        .service(api)
        .service(ready)
        .service(live)
        .default_service(web::to(route_not_found))
}
