//! Fault classification.
//!
//! [`FaultClassifier::classify`] turns any [`Fault`] into a status and a
//! serialisable [`ApiResponse`]. Every classification writes one record to
//! a [`FaultSink`] with the full fault detail and the active correlation id,
//! while the client-facing body for unexpected faults stays generic.

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, warn};

use super::api_response::{ApiError, ApiResponse};
use super::correlation_id::CorrelationId;
use super::fault::{Fault, FaultStatus, Severity};

/// Logging sink receiving one record per classified fault.
pub trait FaultSink: Send + Sync {
    /// Record a fault for the request identified by `correlation_id`.
    ///
    /// `cause` carries the full detail: the flattened codes of expected
    /// faults, or the error chain of unexpected ones.
    fn record(
        &self,
        correlation_id: &CorrelationId,
        severity: Severity,
        message: &str,
        cause: Option<&str>,
    );
}

/// Sink writing structured `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingFaultSink;

impl FaultSink for TracingFaultSink {
    fn record(
        &self,
        correlation_id: &CorrelationId,
        severity: Severity,
        message: &str,
        cause: Option<&str>,
    ) {
        match severity {
            Severity::Warn => warn!(
                correlation_id = %correlation_id,
                cause = cause.unwrap_or_default(),
                "{message}"
            ),
            Severity::Error => error!(
                correlation_id = %correlation_id,
                cause = cause.unwrap_or_default(),
                "{message}"
            ),
        }
    }
}

/// Status and body produced for a fault.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    status: FaultStatus,
    response: ApiResponse<Value>,
}

impl Classification {
    /// Status to report.
    #[must_use]
    pub fn status(&self) -> FaultStatus {
        self.status
    }

    /// Body to serialise.
    #[must_use]
    pub fn response(&self) -> &ApiResponse<Value> {
        &self.response
    }

    /// Consume the classification, returning its parts.
    #[must_use]
    pub fn into_parts(self) -> (FaultStatus, ApiResponse<Value>) {
        (self.status, self.response)
    }
}

/// Map a fault to its client-facing status and body without logging.
///
/// Dispatch, in order:
/// 1. validation faults keep their status and error list, `data` is null;
/// 2. domain faults keep their status, errors, and optional payload;
/// 3. aggregates are flattened to their leaf errors;
/// 4. unexpected faults become a 500 with the single generic error.
#[must_use]
pub fn render(fault: &Fault) -> Classification {
    let (status, response) = match fault {
        Fault::Validation { status, errors } => (*status, ApiResponse::failure(errors.clone())),
        Fault::Domain {
            status,
            errors,
            payload,
        } => (
            *status,
            ApiResponse::failure_with_payload(errors.clone(), payload.clone()),
        ),
        Fault::Nested { .. } => (fault.status(), ApiResponse::failure(fault.flatten())),
        Fault::Unexpected { .. } => (
            FaultStatus::InternalError,
            ApiResponse::failure(vec![ApiError::unexpected()]),
        ),
    };
    Classification { status, response }
}

/// Classifier bound to a logging sink.
///
/// # Examples
/// ```
/// use movies_backend::domain::{CorrelationId, ErrorCode, Fault, FaultClassifier, FaultStatus};
///
/// let classifier = FaultClassifier::default();
/// let id = CorrelationId::generate();
/// let outcome = classifier.classify(&Fault::not_found(ErrorCode::MOVIE_NOT_FOUND), &id);
/// assert_eq!(outcome.status(), FaultStatus::NotFound);
/// ```
#[derive(Clone)]
pub struct FaultClassifier {
    sink: Arc<dyn FaultSink>,
}

impl Default for FaultClassifier {
    fn default() -> Self {
        Self::new(Arc::new(TracingFaultSink))
    }
}

impl std::fmt::Debug for FaultClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultClassifier").finish_non_exhaustive()
    }
}

impl FaultClassifier {
    /// Create a classifier writing to `sink`.
    #[must_use]
    pub fn new(sink: Arc<dyn FaultSink>) -> Self {
        Self { sink }
    }

    /// Classify `fault` and record it against `correlation_id`.
    #[must_use]
    pub fn classify(&self, fault: &Fault, correlation_id: &CorrelationId) -> Classification {
        let classification = render(fault);
        let severity = fault.severity();
        let detail = fault.detail();
        let message = match severity {
            Severity::Warn => fault.to_string(),
            Severity::Error => "request failed with an unexpected fault".to_owned(),
        };
        self.sink
            .record(correlation_id, severity, &message, Some(detail.as_str()));
        classification
    }
}
