//! Closed catalogue of numeric error codes.
//!
//! Codes are five-digit values laid out as `[http-class][domain][sequence]`:
//! the leading digit is the HTTP status class (4 or 5), the next two digits
//! identify the owning domain block (`00` general, `01` movies) and the last
//! two digits are a sequence number within that block. The layout is a
//! convention for anyone adding codes; lookups never validate it.
//!
//! The table is assembled once on first use and is read-only afterwards.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

/// Numeric error code drawn from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(u32);

impl ErrorCode {
    /// The request body could not be parsed.
    pub const MALFORMED_REQUEST: Self = Self(40001);
    /// Authentication is missing or invalid.
    pub const AUTHENTICATION_REQUIRED: Self = Self(40002);
    /// No route matched the request path.
    pub const ROUTE_NOT_FOUND: Self = Self(40003);

    /// Movie title is missing or blank.
    pub const EMPTY_TITLE: Self = Self(40101);
    /// Movie title falls outside the allowed length.
    pub const TITLE_LENGTH: Self = Self(40102);
    /// Movie description is missing or blank.
    pub const EMPTY_DESCRIPTION: Self = Self(40103);
    /// Movie description falls outside the allowed length.
    pub const DESCRIPTION_LENGTH: Self = Self(40104);
    /// Another movie already uses the requested title.
    pub const DUPLICATE_TITLE: Self = Self(40105);
    /// No movie exists for the requested identifier.
    pub const MOVIE_NOT_FOUND: Self = Self(40106);
    /// Release year is outside the supported range.
    pub const RELEASE_YEAR_RANGE: Self = Self(40107);

    /// Catch-all for faults with no specific classification.
    pub const UNEXPECTED: Self = Self(50001);

    /// Wrap a raw numeric value.
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Leading digit of the code, used as the HTTP status class.
    #[must_use]
    pub const fn http_class(self) -> u32 {
        let mut value = self.0;
        while value >= 10 {
            value /= 10;
        }
        value
    }

    /// Registered description, if the code is known.
    #[must_use]
    pub fn description(self) -> Option<&'static str> {
        describe(self)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ErrorCode> for u32 {
    fn from(value: ErrorCode) -> Self {
        value.0
    }
}

/// Static entry of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCodeDescriptor {
    /// Registered code.
    pub code: ErrorCode,
    /// Human-readable description returned to clients.
    pub description: &'static str,
}

const DESCRIPTORS: &[ErrorCodeDescriptor] = &[
    ErrorCodeDescriptor {
        code: ErrorCode::MALFORMED_REQUEST,
        description: "The request body is malformed",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::AUTHENTICATION_REQUIRED,
        description: "Authentication is required",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::ROUTE_NOT_FOUND,
        description: "The requested route does not exist",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::EMPTY_TITLE,
        description: "Title is required",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::TITLE_LENGTH,
        description: "Title must be between 2 and 100 characters",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::EMPTY_DESCRIPTION,
        description: "Description is required",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::DESCRIPTION_LENGTH,
        description: "Description must be between 10 and 1000 characters",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::DUPLICATE_TITLE,
        description: "A movie with this title already exists",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::MOVIE_NOT_FOUND,
        description: "Movie not found",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::RELEASE_YEAR_RANGE,
        description: "Release year must be between 1888 and 2100",
    },
    ErrorCodeDescriptor {
        code: ErrorCode::UNEXPECTED,
        description: "An unexpected error occurred",
    },
];

static REGISTRY: LazyLock<HashMap<ErrorCode, &'static str>> = LazyLock::new(|| {
    DESCRIPTORS
        .iter()
        .map(|descriptor| (descriptor.code, descriptor.description))
        .collect()
});

/// Look up the description registered for `code`.
///
/// # Examples
/// ```
/// use movies_backend::domain::error_codes::{describe, ErrorCode};
///
/// assert_eq!(describe(ErrorCode::EMPTY_TITLE), Some("Title is required"));
/// assert_eq!(describe(ErrorCode::from_u32(49999)), None);
/// ```
#[must_use]
pub fn describe(code: ErrorCode) -> Option<&'static str> {
    REGISTRY.get(&code).copied()
}

/// Every registered descriptor in declaration order.
pub fn descriptors() -> impl Iterator<Item = &'static ErrorCodeDescriptor> {
    DESCRIPTORS.iter()
}
