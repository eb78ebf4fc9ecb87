//! Request-scoped correlation identifier.
//!
//! `CorrelationId` follows one request end to end: it is established before
//! any handler runs, stamped on every log line emitted for the request, and
//! echoed back to the caller in the [`CORRELATION_ID_HEADER`] response
//! header. The value is threaded explicitly through a [`RequestContext`]
//! rather than living in ambient or task-local state, so code that needs it
//! must receive it from its caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header carrying the correlation identifier in both directions.
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Errors returned when constructing a [`CorrelationId`] from raw input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CorrelationIdError {
    /// The supplied value was empty or contained only whitespace.
    #[error("correlation id must not be empty")]
    Empty,
}

/// Opaque per-request correlation token.
///
/// Any non-empty string is accepted so identifiers minted by upstream
/// callers survive verbatim. Freshly generated identifiers are UUID v4
/// values rendered in hyphenated form.
///
/// # Examples
/// ```
/// use movies_backend::domain::CorrelationId;
///
/// let adopted = CorrelationId::adopt("req-42").expect("non-empty header");
/// assert_eq!(adopted.as_ref(), "req-42");
/// assert!(CorrelationId::adopt("   ").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Adopt an inbound value verbatim, or `None` when it is blank.
    #[must_use]
    pub fn adopt(raw: &str) -> Option<Self> {
        Self::new(raw).ok()
    }

    /// Adopt `raw` when present and non-blank, otherwise generate a new id.
    #[must_use]
    pub fn adopt_or_generate(raw: Option<&str>) -> Self {
        raw.and_then(Self::adopt).unwrap_or_else(Self::generate)
    }

    /// Validate and construct an identifier from borrowed input.
    pub fn new(raw: impl Into<String>) -> Result<Self, CorrelationIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CorrelationIdError::Empty);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<CorrelationId> for String {
    fn from(value: CorrelationId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CorrelationId {
    type Error = CorrelationIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Read-only facts established for the lifetime of one request.
///
/// Built once at request entry and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    correlation_id: CorrelationId,
}

impl RequestContext {
    /// Create a context for a request identified by `correlation_id`.
    #[must_use]
    pub fn new(correlation_id: CorrelationId) -> Self {
        Self { correlation_id }
    }

    /// Correlation identifier assigned at request entry.
    #[must_use]
    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }
}
