//! Exception boundary rendering every failure as an `ApiResponse`.
//!
//! Runs inside [`super::correlation::Correlation`] so the correlation id is
//! already attached. Handler faults, errors raised by Actix itself, and
//! panics all pass through the [`FaultClassifier`], which logs each one
//! exactly once and produces the client body. Successful responses pass
//! through untouched.
//!
//! Failures that leave no `ServiceResponse` behind (inner `Err` values and
//! panics) are returned as an [`InternalError`] carrying the rendered
//! response, which Actix writes out unchanged.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::{Error, HttpResponse};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};

use super::correlation::correlation_id_of;
use super::error::{fault_from_actix, json_response};
use crate::domain::{Classification, CorrelationId, Fault, FaultClassifier};

/// Pipeline stage converting failures into structured responses.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use movies_backend::{Correlation, ExceptionBoundary};
///
/// let app = App::new()
///     .wrap(ExceptionBoundary::default())
///     .wrap(Correlation);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExceptionBoundary {
    classifier: FaultClassifier,
}

impl ExceptionBoundary {
    /// Boundary classifying faults with `classifier`.
    #[must_use]
    pub fn new(classifier: FaultClassifier) -> Self {
        Self { classifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ExceptionBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = ExceptionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ExceptionMiddleware {
            service,
            classifier: self.classifier.clone(),
        }))
    }
}

/// Service wrapper produced by [`ExceptionBoundary`].
pub struct ExceptionMiddleware<S> {
    service: S,
    classifier: FaultClassifier,
}

impl<S, B> Service<ServiceRequest> for ExceptionMiddleware<S>
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
        let correlation_id = correlation_id_of(&req);
        let classifier = self.classifier.clone();
        let started = std::panic::catch_unwind(AssertUnwindSafe(|| self.service.call(req)));

        Box::pin(async move {
            let outcome = match started {
                Ok(fut) => AssertUnwindSafe(fut).catch_unwind().await,
                Err(panic) => Err(panic),
            };
            match outcome {
                Ok(Ok(res)) => {
                    let classification = res
                        .response()
                        .error()
                        .map(|err| classify_error(&classifier, err, &correlation_id));
                    match classification {
                        Some(classification) => Ok(res.into_response(render(classification))),
                        None => Ok(res.map_into_boxed_body()),
                    }
                }
                // The request was consumed by the inner service, so the
                // rendered body travels inside the error instead.
                Ok(Err(err)) => {
                    let response = render(classify_error(&classifier, &err, &correlation_id));
                    Err(InternalError::from_response(err, response).into())
                }
                Err(panic) => {
                    let fault = Fault::unexpected_message(format!(
                        "handler panicked: {}",
                        panic_message(&*panic)
                    ));
                    let response = render(classifier.classify(&fault, &correlation_id));
                    Err(InternalError::from_response(fault, response).into())
                }
            }
        })
    }
}

fn classify_error(
    classifier: &FaultClassifier,
    err: &Error,
    correlation_id: &CorrelationId,
) -> Classification {
    match err.as_error::<Fault>() {
        Some(fault) => classifier.classify(fault, correlation_id),
        None => classifier.classify(&fault_from_actix(err), correlation_id),
    }
}

fn render(classification: Classification) -> HttpResponse {
    let (status, body) = classification.into_parts();
    json_response(status, &body)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    //! Boundary behaviour for each failure source.
    use super::*;
    use crate::domain::{ApiError, ErrorCode, FaultSink, Severity};
    use crate::inbound::http::correlation::Correlation;
    use actix_web::body::to_bytes;
    use actix_web::error::{ErrorBadGateway, ErrorServiceUnavailable};
    use actix_web::middleware::{Next, from_fn};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingSink {
        records: Mutex<Vec<(String, Severity, Option<String>)>>,
    }

    impl FaultSink for RecordingSink {
        fn record(
            &self,
            correlation_id: &CorrelationId,
            severity: Severity,
            _message: &str,
            cause: Option<&str>,
        ) {
            self.records.lock().expect("sink lock").push((
                correlation_id.to_string(),
                severity,
                cause.map(str::to_owned),
            ));
        }
    }

    #[fixture]
    fn sink() -> Arc<RecordingSink> {
        Arc::new(RecordingSink::default())
    }

    async fn not_found() -> Result<HttpResponse, Fault> {
        Err(Fault::not_found(ErrorCode::MOVIE_NOT_FOUND))
    }

    async fn exploding() -> HttpResponse {
        panic!("index out of range in handler");
    }

    async fn unavailable() -> Result<HttpResponse, Error> {
        Err(ErrorServiceUnavailable("upstream timed out"))
    }

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().json(json!({ "data": "fine" }))
    }

    async fn call(sink: Arc<RecordingSink>, path: &str) -> (StatusCode, Option<String>, Value) {
        let app = actix_test::init_service(
            App::new()
                .wrap(ExceptionBoundary::new(FaultClassifier::new(sink)))
                .wrap(Correlation)
                .route("/missing", web::get().to(not_found))
                .route("/panic", web::get().to(exploding))
                .route("/unavailable", web::get().to(unavailable))
                .route("/ok", web::get().to(ok)),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri(path)
            .insert_header(("x-correlation-id", "boundary-1"))
            .to_request();
        // Errors are written out the way the HTTP dispatcher renders them.
        let response = match actix_test::try_call_service(&app, req).await {
            Ok(res) => res.into_parts().1,
            Err(err) => err.error_response(),
        };
        let status = response.status();
        let header = response
            .headers()
            .get("x-correlation-id")
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        (status, header, body)
    }

    #[rstest]
    #[actix_web::test]
    async fn handler_fault_is_rendered_and_logged_once(sink: Arc<RecordingSink>) {
        let (status, header, body) = call(sink.clone(), "/missing").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(header.as_deref(), Some("boundary-1"));
        assert_eq!(
            body,
            json!({ "data": null, "errors": [{ "code": 40106, "message": "Movie not found" }] })
        );
        let records = sink.records.lock().expect("sink lock").clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "boundary-1");
        assert_eq!(records[0].1, Severity::Warn);
    }

    #[rstest]
    #[actix_web::test]
    async fn panic_becomes_generic_internal_error(sink: Arc<RecordingSink>) {
        let (status, header, body) = call(sink.clone(), "/panic").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(header.as_deref(), Some("boundary-1"));
        let expected = serde_json::to_value(crate::domain::ApiResponse::<Value>::failure(vec![
            ApiError::unexpected(),
        ]))
        .expect("serialise");
        assert_eq!(body, expected);

        let records = sink.records.lock().expect("sink lock").clone();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, "boundary-1");
        assert_eq!(records[0].1, Severity::Error);
        assert!(
            records[0]
                .2
                .as_deref()
                .is_some_and(|cause| cause.contains("index out of range"))
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn framework_errors_are_unexpected(sink: Arc<RecordingSink>) {
        let (status, _, body) = call(sink.clone(), "/unavailable").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["errors"][0]["code"], json!(50001));
        assert!(!body.to_string().contains("upstream timed out"));
    }

    #[rstest]
    #[actix_web::test]
    async fn success_passes_through_without_logging(sink: Arc<RecordingSink>) {
        let (status, header, body) = call(sink.clone(), "/ok").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(header.as_deref(), Some("boundary-1"));
        assert_eq!(body, json!({ "data": "fine" }));
        assert!(sink.records.lock().expect("sink lock").is_empty());
    }

    async fn refuse(
        _req: ServiceRequest,
        _next: Next<impl MessageBody>,
    ) -> Result<ServiceResponse<BoxBody>, Error> {
        Err(ErrorBadGateway("gateway exploded"))
    }

    #[rstest]
    #[actix_web::test]
    async fn inner_errors_are_rendered_with_the_correlation_header(sink: Arc<RecordingSink>) {
        let app = actix_test::init_service(
            App::new()
                .wrap(from_fn(refuse))
                .wrap(ExceptionBoundary::new(FaultClassifier::new(sink.clone())))
                .wrap(Correlation)
                .route("/ok", web::get().to(ok)),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/ok")
            .insert_header(("x-correlation-id", "inner-1"))
            .to_request();
        let err = actix_test::try_call_service(&app, req)
            .await
            .expect_err("inner stage refuses");
        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response
                .headers()
                .get("x-correlation-id")
                .and_then(|value| value.to_str().ok()),
            Some("inner-1")
        );
        let bytes = to_bytes(response.into_body()).await.expect("read body");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["errors"][0]["code"], json!(50001));
        assert!(!body.to_string().contains("gateway exploded"));
        assert_eq!(sink.records.lock().expect("sink lock").len(), 1);
    }

    #[rstest]
    fn panic_message_reads_string_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let borrowed: Box<dyn Any + Send> = Box::new("borrowed");
        assert_eq!(panic_message(&*owned), "owned");
        assert_eq!(panic_message(&*borrowed), "borrowed");
    }
}
