//! Domain primitives, fault taxonomy, and ports.
//!
//! Purpose: keep request-pipeline concepts (correlation, faults, error
//! codes, validation) and the movie resource free of HTTP framework types.
//! Inbound adapters translate these into transport-specific responses.
//!
//! Public surface:
//! - CorrelationId / RequestContext: request-scoped correlation.
//! - ErrorCode and the registry in [`error_codes`].
//! - ApiError / ApiResponse: wire envelope.
//! - Fault / FaultStatus / Severity: failure taxonomy.
//! - FaultClassifier / FaultSink: classification with logging.
//! - ValidationEngine / FieldRules: rule execution.
//! - Movie types, MovieValidator, and the [`ports::MovieCatalogue`] port.

pub mod api_response;
pub mod classifier;
pub mod correlation_id;
pub mod error_codes;
pub mod fault;
pub mod movie;
pub mod movie_validation;
pub mod ports;
pub mod validation;

pub use self::api_response::{ApiError, ApiResponse};
pub use self::classifier::{Classification, FaultClassifier, FaultSink, TracingFaultSink};
pub use self::correlation_id::{
    CORRELATION_ID_HEADER, CorrelationId, CorrelationIdError, RequestContext,
};
pub use self::error_codes::{ErrorCode, ErrorCodeDescriptor};
pub use self::fault::{Fault, FaultStatus, Severity};
pub use self::movie::{Movie, MovieDraft, MovieId, MovieSubmission};
pub use self::movie_validation::MovieValidator;
pub use self::validation::{ExistencePredicate, FieldRules, ValidationEngine};
