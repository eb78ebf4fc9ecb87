//! HTTP adapter mapping for domain faults.
//!
//! Purpose: keep the fault taxonomy HTTP-agnostic while letting Actix
//! handlers return `Result<_, Fault>` directly. The exception boundary
//! re-classifies faults with logging; the [`ResponseError`] impl here is the
//! silent fallback used when a fault is rendered outside that boundary.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::domain::classifier::render;
use crate::domain::{ApiError, ApiResponse, ErrorCode, Fault, FaultStatus};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Fault>;

/// HTTP status for a fault status.
#[must_use]
pub fn status_for(status: FaultStatus) -> StatusCode {
    match status {
        FaultStatus::BadRequest => StatusCode::BAD_REQUEST,
        FaultStatus::Unauthorized => StatusCode::UNAUTHORIZED,
        FaultStatus::NotFound => StatusCode::NOT_FOUND,
        FaultStatus::Conflict => StatusCode::CONFLICT,
        FaultStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Serialise a classified body with its status.
pub(crate) fn json_response(status: FaultStatus, body: &ApiResponse<Value>) -> HttpResponse {
    HttpResponse::build(status_for(status)).json(body)
}

impl ResponseError for Fault {
    fn status_code(&self) -> StatusCode {
        status_for(self.status())
    }

    fn error_response(&self) -> HttpResponse {
        let (status, body) = render(self).into_parts();
        json_response(status, &body)
    }
}

/// Fault for a request body that could not be read or parsed.
#[must_use]
pub fn malformed_request() -> Fault {
    Fault::Validation {
        status: FaultStatus::BadRequest,
        errors: vec![ApiError::from_code(ErrorCode::MALFORMED_REQUEST)],
    }
}

/// `JsonConfig` error handler turning payload errors into faults.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = %req.path(), "rejecting malformed JSON payload");
    malformed_request().into()
}

/// Re-express an error raised by Actix itself as a fault.
///
/// Client-class errors keep a client-facing code; anything else is
/// unexpected so its detail reaches the logs and never the body.
#[must_use]
pub fn fault_from_actix(err: &actix_web::Error) -> Fault {
    let status = err.as_response_error().status_code();
    if status == StatusCode::NOT_FOUND {
        Fault::not_found(ErrorCode::ROUTE_NOT_FOUND)
    } else if status == StatusCode::UNAUTHORIZED {
        Fault::domain(
            FaultStatus::Unauthorized,
            ApiError::from_code(ErrorCode::AUTHENTICATION_REQUIRED),
        )
    } else if status.is_client_error() {
        malformed_request()
    } else {
        Fault::unexpected_message(format!("actix error ({status}): {err}"))
    }
}
