//! Fault taxonomy raised by handlers, validation, and domain services.
//!
//! A [`Fault`] aborts normal handler execution. Faults are transport
//! agnostic: they carry a [`FaultStatus`] and coded [`ApiError`] entries,
//! and the inbound adapter decides how to render them.

use color_eyre::eyre;
use serde_json::Value;

use super::api_response::ApiError;
use super::error_codes::ErrorCode;

/// Transport-agnostic outcome category carried by a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultStatus {
    /// Client input or business-rule violation.
    BadRequest,
    /// Authentication is missing or invalid.
    Unauthorized,
    /// The addressed resource does not exist.
    NotFound,
    /// The request conflicts with current state.
    Conflict,
    /// Anything the server did not anticipate.
    InternalError,
}

/// Log severity attached to a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Expected control flow such as validation or not-found.
    Warn,
    /// Unanticipated failure needing operator attention.
    Error,
}

/// Any condition that must become a structured error response.
///
/// # Examples
/// ```
/// use movies_backend::domain::{ErrorCode, Fault, FaultStatus};
///
/// let fault = Fault::not_found(ErrorCode::MOVIE_NOT_FOUND);
/// assert_eq!(fault.status(), FaultStatus::NotFound);
/// assert_eq!(fault.flatten()[0].code(), ErrorCode::MOVIE_NOT_FOUND);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Fault {
    /// One or more validation rules failed. Always carries at least one error.
    #[error("validation failed with {count} error(s)", count = .errors.len())]
    Validation {
        /// Status reported to the client, usually [`FaultStatus::BadRequest`].
        status: FaultStatus,
        /// Every failed rule, in evaluation order.
        errors: Vec<ApiError>,
    },
    /// Expected business condition such as not-found or conflict.
    #[error("domain fault {status:?} with {count} error(s)", count = .errors.len())]
    Domain {
        /// Status reported to the client.
        status: FaultStatus,
        /// Coded errors describing the condition.
        errors: Vec<ApiError>,
        /// Optional auxiliary payload returned as `data`.
        payload: Option<Value>,
    },
    /// Aggregate wrapping other faults.
    #[error("{description}")]
    Nested {
        /// Code used when the aggregate has no children.
        code: ErrorCode,
        /// Description used when the aggregate has no children.
        description: String,
        /// Wrapped faults, flattened in order.
        children: Vec<Fault>,
    },
    /// Anything not raised through the constructors above.
    #[error("unexpected fault: {cause}")]
    Unexpected {
        /// Opaque cause; logged in full, never serialised.
        cause: eyre::Report,
    },
}

impl Fault {
    /// Wrap failed rules in a validation fault.
    ///
    /// Returns `None` when `errors` is empty so a validation fault can never
    /// be constructed without at least one entry.
    #[must_use]
    pub fn validation(errors: Vec<ApiError>) -> Option<Self> {
        (!errors.is_empty()).then_some(Self::Validation {
            status: FaultStatus::BadRequest,
            errors,
        })
    }

    /// Domain fault carrying a single coded error.
    #[must_use]
    pub fn domain(status: FaultStatus, error: ApiError) -> Self {
        Self::Domain {
            status,
            errors: vec![error],
            payload: None,
        }
    }

    /// Not-found domain fault using the registered description of `code`.
    #[must_use]
    pub fn not_found(code: ErrorCode) -> Self {
        Self::domain(FaultStatus::NotFound, ApiError::from_code(code))
    }

    /// Conflict domain fault using the registered description of `code`.
    #[must_use]
    pub fn conflict(code: ErrorCode) -> Self {
        Self::domain(FaultStatus::Conflict, ApiError::from_code(code))
    }

    /// Attach an auxiliary payload to a domain fault.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_payload(self, value: Value) -> Self {
        match self {
            Self::Domain { status, errors, .. } => Self::Domain {
                status,
                errors,
                payload: Some(value),
            },
            other => other,
        }
    }

    /// Aggregate several faults into one event.
    pub fn nested(code: ErrorCode, description: impl Into<String>, children: Vec<Fault>) -> Self {
        Self::Nested {
            code,
            description: description.into(),
            children,
        }
    }

    /// Rebuild an aggregate from an already flattened error list.
    ///
    /// Each entry becomes a childless [`Fault::Nested`], so flattening the
    /// result reproduces `leaves` exactly.
    pub fn from_leaves(code: ErrorCode, description: impl Into<String>, leaves: Vec<ApiError>) -> Self {
        let children = leaves
            .into_iter()
            .map(|leaf| Self::nested(leaf.code(), leaf.message().to_owned(), Vec::new()))
            .collect();
        Self::nested(code, description, children)
    }

    /// Wrap an arbitrary error as an unexpected fault.
    pub fn unexpected(cause: impl Into<eyre::Report>) -> Self {
        Self::Unexpected {
            cause: cause.into(),
        }
    }

    /// Unexpected fault described by a message only.
    pub fn unexpected_message(message: impl Into<String>) -> Self {
        Self::Unexpected {
            cause: eyre::Report::msg(message.into()),
        }
    }

    /// Flatten into leaf error descriptions.
    ///
    /// Validation and domain faults contribute their error lists verbatim.
    /// An aggregate with children contributes its children's leaves and
    /// discards its own message; a childless aggregate contributes its own
    /// code and description. Unexpected faults contribute the generic error.
    /// The walk uses an explicit stack so deep trees cannot exhaust the call
    /// stack.
    #[must_use]
    pub fn flatten(&self) -> Vec<ApiError> {
        let mut leaves = Vec::new();
        let mut pending = vec![self];
        while let Some(fault) = pending.pop() {
            match fault {
                Self::Validation { errors, .. } | Self::Domain { errors, .. } => {
                    leaves.extend(errors.iter().cloned());
                }
                Self::Nested {
                    code,
                    description,
                    children,
                } => {
                    if children.is_empty() {
                        leaves.push(ApiError::new(*code, description.clone()));
                    } else {
                        pending.extend(children.iter().rev());
                    }
                }
                Self::Unexpected { .. } => leaves.push(ApiError::unexpected()),
            }
        }
        leaves
    }

    /// Whether this fault, or any fault nested inside it, is unexpected.
    #[must_use]
    pub fn contains_unexpected(&self) -> bool {
        let mut pending = vec![self];
        while let Some(fault) = pending.pop() {
            match fault {
                Self::Unexpected { .. } => return true,
                Self::Nested { children, .. } => pending.extend(children.iter()),
                Self::Validation { .. } | Self::Domain { .. } => {}
            }
        }
        false
    }

    /// Status the fault should be reported with.
    ///
    /// Aggregates report an internal error when they wrap an unexpected
    /// fault or their own code is in the 5xx class, and a bad request
    /// otherwise.
    #[must_use]
    pub fn status(&self) -> FaultStatus {
        match self {
            Self::Validation { status, .. } | Self::Domain { status, .. } => *status,
            Self::Nested { code, .. } => {
                if self.contains_unexpected() || code.http_class() == 5 {
                    FaultStatus::InternalError
                } else {
                    FaultStatus::BadRequest
                }
            }
            Self::Unexpected { .. } => FaultStatus::InternalError,
        }
    }

    /// Log severity for the fault.
    #[must_use]
    pub fn severity(&self) -> Severity {
        if self.contains_unexpected() {
            Severity::Error
        } else {
            Severity::Warn
        }
    }

    /// Auxiliary payload carried by a domain fault.
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Domain { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Full server-side detail, including cause chains of unexpected faults.
    ///
    /// Expected faults list every flattened code and message, e.g.
    /// `validation failed with 2 error(s): [40101] Title is required; [40103]
    /// Description is required`. Intended for logs only; never send this to
    /// clients.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Unexpected { cause } => format!("{cause:?}"),
            Self::Nested { .. } if self.contains_unexpected() => format!("{self:?}"),
            other => {
                let leaves: Vec<String> = other
                    .flatten()
                    .iter()
                    .map(|leaf| format!("[{}] {}", leaf.code(), leaf.message()))
                    .collect();
                format!("{other}: {}", leaves.join("; "))
            }
        }
    }
}
