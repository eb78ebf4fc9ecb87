//! Wire-level envelope shared by every response.
//!
//! Successful responses carry `data` and no errors; failures carry a
//! non-empty `errors` list and `data` is `null`, except for domain faults
//! that deliberately attach an auxiliary payload.

use serde::{Deserialize, Serialize};

use super::error_codes::ErrorCode;

/// Single coded error entry.
///
/// # Examples
/// ```
/// use movies_backend::domain::{ApiError, ErrorCode};
///
/// let error = ApiError::from_code(ErrorCode::EMPTY_TITLE);
/// assert_eq!(error.code(), ErrorCode::EMPTY_TITLE);
/// assert_eq!(error.message(), "Title is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Build an error with an explicit message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Build an error using the registered description for `code`.
    ///
    /// Unregistered codes fall back to the generic unexpected-error text so
    /// a missing registry entry never produces an empty message.
    #[must_use]
    pub fn from_code(code: ErrorCode) -> Self {
        let message = code
            .description()
            .or_else(|| ErrorCode::UNEXPECTED.description())
            .unwrap_or("An unexpected error occurred");
        Self::new(code, message)
    }

    /// The generic, non-leaking error returned for unexpected faults.
    #[must_use]
    pub fn unexpected() -> Self {
        Self::from_code(ErrorCode::UNEXPECTED)
    }

    /// Numeric error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<ErrorCode> for ApiError {
    fn from(code: ErrorCode) -> Self {
        Self::from_code(code)
    }
}

/// Response envelope `{data, errors}`.
///
/// `data` is always serialised, as `null` when absent. `errors` is omitted
/// from successful responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ApiError>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// Successful response with no payload.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: None,
            errors: Vec::new(),
        }
    }

    /// Failed response; `data` is `null`.
    #[must_use]
    pub fn failure(errors: Vec<ApiError>) -> Self {
        Self { data: None, errors }
    }

    /// Failed response that still carries an auxiliary payload.
    #[must_use]
    pub fn failure_with_payload(errors: Vec<ApiError>, payload: Option<T>) -> Self {
        Self {
            data: payload,
            errors,
        }
    }

    /// Response payload, if any.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Errors in the order they were reported.
    #[must_use]
    pub fn errors(&self) -> &[ApiError] {
        &self.errors
    }

    /// Whether the response reports a failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        !self.errors.is_empty()
    }
}
