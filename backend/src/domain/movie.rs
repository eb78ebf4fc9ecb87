//! Movie resource model.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Allowed title length, counted in characters after trimming.
pub const TITLE_LENGTH: RangeInclusive<usize> = 2..=100;
/// Allowed description length, counted in characters after trimming.
pub const DESCRIPTION_LENGTH: RangeInclusive<usize> = 10..=1000;
/// Supported release years.
pub const RELEASE_YEARS: RangeInclusive<i64> = 1888..=2100;

/// Stable movie identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(Uuid);

impl MovieId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from its textual form.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for MovieId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated movie fields as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSubmission {
    /// Proposed title.
    #[serde(default)]
    pub title: Option<String>,
    /// Proposed description.
    #[serde(default)]
    pub description: Option<String>,
    /// Proposed release year.
    #[serde(default)]
    pub release_year: Option<i64>,
}

impl MovieSubmission {
    /// Title as text, if supplied.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Description as text, if supplied.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether the release year is absent or within [`RELEASE_YEARS`].
    #[must_use]
    pub fn release_year_in_range(&self) -> bool {
        self.release_year
            .is_none_or(|year| RELEASE_YEARS.contains(&year))
    }
}

/// Validated fields ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    /// Trimmed title.
    pub title: String,
    /// Trimmed description.
    pub description: String,
    /// Release year within [`RELEASE_YEARS`].
    pub release_year: Option<u16>,
}

/// Stored movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    id: MovieId,
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    release_year: Option<u16>,
}

impl Movie {
    /// Materialise a movie from its identifier and validated fields.
    #[must_use]
    pub fn new(id: MovieId, draft: MovieDraft) -> Self {
        let MovieDraft {
            title,
            description,
            release_year,
        } = draft;
        Self {
            id,
            title,
            description,
            release_year,
        }
    }

    /// Identifier.
    #[must_use]
    pub fn id(&self) -> MovieId {
        self.id
    }

    /// Title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Release year, when known.
    #[must_use]
    pub fn release_year(&self) -> Option<u16> {
        self.release_year
    }
}
