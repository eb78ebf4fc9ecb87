//! Middleware establishing the request correlation identifier.
//!
//! The inbound `x-correlation-id` header is adopted verbatim when present
//! and non-blank; otherwise a fresh UUID is generated. The identifier is
//! stored as a [`RequestContext`] in the request extensions, recorded on the
//! request span, and echoed on every response, including error responses.
//! An inner `Err` is rendered, stamped, and handed on as an
//! [`InternalError`] holding that response.

use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, debug, error, info_span};

use crate::domain::{CORRELATION_ID_HEADER, CorrelationId, RequestContext};

/// Correlation id of the request, or a fresh one when no context was
/// attached.
#[must_use]
pub fn correlation_id_of(req: &ServiceRequest) -> CorrelationId {
    req.extensions()
        .get::<RequestContext>()
        .map(|context| context.correlation_id().clone())
        .unwrap_or_else(CorrelationId::generate)
}

/// Handlers receive the request context as an extractor.
impl FromRequest for RequestContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let context = req
            .extensions()
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_else(|| RequestContext::new(CorrelationId::generate()));
        ready(Ok(context))
    }
}

fn inbound_correlation_id(req: &ServiceRequest) -> CorrelationId {
    let Some(value) = req.headers().get(CORRELATION_ID_HEADER) else {
        return CorrelationId::generate();
    };
    // Header values may carry non-ASCII bytes; any UTF-8 text is kept.
    match std::str::from_utf8(value.as_bytes()) {
        Ok(raw) => CorrelationId::adopt_or_generate(Some(raw)),
        Err(error) => {
            let generated = CorrelationId::generate();
            debug!(
                %error,
                correlation_id = %generated,
                "inbound correlation header is not UTF-8; generated a new identifier"
            );
            generated
        }
    }
}

fn stamp(headers: &mut HeaderMap, correlation_id: &CorrelationId) {
    match HeaderValue::from_bytes(correlation_id.as_ref().as_bytes()) {
        Ok(value) => {
            headers.insert(HeaderName::from_static(CORRELATION_ID_HEADER), value);
        }
        Err(error) => {
            error!(
                %error,
                correlation_id = %correlation_id,
                "failed to encode correlation identifier header"
            );
        }
    }
}

/// Outermost pipeline stage attaching the correlation identifier.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use movies_backend::Correlation;
///
/// let app = App::new().wrap(Correlation);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Correlation;

impl<S, B> Transform<S, ServiceRequest> for Correlation
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = CorrelationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CorrelationMiddleware { service }))
    }
}

/// Service wrapper produced by [`Correlation`].
pub struct CorrelationMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for CorrelationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let correlation_id = inbound_correlation_id(&req);
        req.extensions_mut()
            .insert(RequestContext::new(correlation_id.clone()));
        let span = info_span!(
            "http_request",
            correlation_id = %correlation_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = self.service.call(req);

        Box::pin(
            async move {
                match fut.await {
                    Ok(res) => {
                        let mut res = res.map_into_boxed_body();
                        stamp(res.response_mut().headers_mut(), &correlation_id);
                        Ok(res)
                    }
                    Err(err) => {
                        let mut response = err.error_response();
                        stamp(response.headers_mut(), &correlation_id);
                        Err(InternalError::from_response(err, response).into())
                    }
                }
            }
            .instrument(span),
        )
    }
}
