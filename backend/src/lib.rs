//! Movies API backend: request pipeline, fault handling, and movie CRUD.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use inbound::http::correlation::Correlation;
pub use inbound::http::exception::ExceptionBoundary;
