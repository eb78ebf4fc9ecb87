//! Business rules for movie submissions.
//!
//! Field order is title, description, release year; errors are reported in
//! that order. The title chain is presence, uniqueness, then length, so a
//! duplicate title never also reports a length failure.

use async_trait::async_trait;

use super::error_codes::ErrorCode;
use super::fault::Fault;
use super::movie::{DESCRIPTION_LENGTH, MovieDraft, MovieId, MovieSubmission, TITLE_LENGTH};
use super::ports::MovieCatalogue;
use super::validation::{ExistencePredicate, FieldRules, ValidationEngine};

/// Title uniqueness check against the catalogue, optionally ignoring the
/// movie being updated.
struct TitleTaken<'a> {
    catalogue: &'a dyn MovieCatalogue,
    excluding: Option<MovieId>,
}

#[async_trait]
impl ExistencePredicate for TitleTaken<'_> {
    async fn exists(&self, key: &str) -> Result<bool, Fault> {
        self.catalogue.title_exists(key, self.excluding).await
    }
}

/// Validates submissions against the movie rules.
pub struct MovieValidator<'a> {
    catalogue: &'a dyn MovieCatalogue,
}

impl<'a> MovieValidator<'a> {
    /// Validator consulting `catalogue` for title uniqueness.
    #[must_use]
    pub fn new(catalogue: &'a dyn MovieCatalogue) -> Self {
        Self { catalogue }
    }

    /// Validate a submission for a new movie.
    ///
    /// # Errors
    /// Returns a validation fault listing every failed rule, or the fault
    /// raised by the catalogue during the uniqueness check.
    pub async fn validate_new(&self, submission: &MovieSubmission) -> Result<MovieDraft, Fault> {
        self.validate(submission, None).await
    }

    /// Validate a submission replacing the movie `id`.
    ///
    /// The movie may keep its own title.
    ///
    /// # Errors
    /// As [`MovieValidator::validate_new`].
    pub async fn validate_update(
        &self,
        id: MovieId,
        submission: &MovieSubmission,
    ) -> Result<MovieDraft, Fault> {
        self.validate(submission, Some(id)).await
    }

    async fn validate(
        &self,
        submission: &MovieSubmission,
        excluding: Option<MovieId>,
    ) -> Result<MovieDraft, Fault> {
        let taken = TitleTaken {
            catalogue: self.catalogue,
            excluding,
        };
        ValidationEngine::new()
            .field(
                FieldRules::text("title", MovieSubmission::title)
                    .required(ErrorCode::EMPTY_TITLE)
                    .unique(&taken, ErrorCode::DUPLICATE_TITLE)
                    .length(TITLE_LENGTH, ErrorCode::TITLE_LENGTH),
            )
            .field(
                FieldRules::text("description", MovieSubmission::description)
                    .required(ErrorCode::EMPTY_DESCRIPTION)
                    .length(DESCRIPTION_LENGTH, ErrorCode::DESCRIPTION_LENGTH),
            )
            .field(FieldRules::custom("releaseYear").satisfies(
                MovieSubmission::release_year_in_range,
                ErrorCode::RELEASE_YEAR_RANGE,
            ))
            .ensure_valid(submission)
            .await?;

        into_draft(submission)
    }
}

fn into_draft(submission: &MovieSubmission) -> Result<MovieDraft, Fault> {
    let (Some(title), Some(description)) = (submission.title(), submission.description()) else {
        return Err(Fault::unexpected_message(
            "validated movie submission is missing required fields",
        ));
    };
    let release_year = submission
        .release_year
        .map(u16::try_from)
        .transpose()
        .map_err(Fault::unexpected)?;
    Ok(MovieDraft {
        title: title.trim().to_owned(),
        description: description.trim().to_owned(),
        release_year,
    })
}

#[cfg(test)]
mod tests {
    //! Movie rule scenarios.
    use super::*;
    use crate::domain::ports::MockMovieCatalogue;
    use crate::domain::{ApiError, FaultStatus};
    use mockall::predicate::{eq, function};
    use rstest::{fixture, rstest};

    const DESCRIPTION: &str = "A crew meets something nasty in deep space.";

    #[fixture]
    fn free_titles() -> MockMovieCatalogue {
        let mut catalogue = MockMovieCatalogue::new();
        catalogue.expect_title_exists().returning(|_, _| Ok(false));
        catalogue
    }

    fn submission(title: Option<&str>, description: Option<&str>, year: Option<i64>) -> MovieSubmission {
        MovieSubmission {
            title: title.map(str::to_owned),
            description: description.map(str::to_owned),
            release_year: year,
        }
    }

    fn codes(fault: Fault) -> Vec<ErrorCode> {
        match fault {
            Fault::Validation { status, errors } => {
                assert_eq!(status, FaultStatus::BadRequest);
                errors.iter().map(ApiError::code).collect()
            }
            other => panic!("expected validation fault, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn valid_submission_becomes_trimmed_draft(free_titles: MockMovieCatalogue) {
        let draft = MovieValidator::new(&free_titles)
            .validate_new(&submission(Some("  Alien "), Some(DESCRIPTION), Some(1979)))
            .await
            .expect("valid submission");
        assert_eq!(draft.title, "Alien");
        assert_eq!(draft.release_year, Some(1979));
    }

    #[rstest]
    #[tokio::test]
    async fn empty_title_and_description_report_two_errors_in_field_order(
        free_titles: MockMovieCatalogue,
    ) {
        let fault = MovieValidator::new(&free_titles)
            .validate_new(&submission(Some(""), Some(""), None))
            .await
            .expect_err("invalid submission");
        assert_eq!(
            codes(fault),
            vec![ErrorCode::EMPTY_TITLE, ErrorCode::EMPTY_DESCRIPTION]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_short_title_reports_only_the_conflict() {
        let mut catalogue = MockMovieCatalogue::new();
        catalogue
            .expect_title_exists()
            .with(eq("X"), eq(None::<MovieId>))
            .times(1)
            .returning(|_, _| Ok(true));

        let fault = MovieValidator::new(&catalogue)
            .validate_new(&submission(Some("X"), Some(DESCRIPTION), None))
            .await
            .expect_err("duplicate title");
        assert_eq!(codes(fault), vec![ErrorCode::DUPLICATE_TITLE]);
    }

    #[rstest]
    #[tokio::test]
    async fn blank_title_skips_uniqueness_lookup() {
        let mut catalogue = MockMovieCatalogue::new();
        catalogue.expect_title_exists().never();

        let fault = MovieValidator::new(&catalogue)
            .validate_new(&submission(Some("   "), Some(DESCRIPTION), None))
            .await
            .expect_err("blank title");
        assert_eq!(codes(fault), vec![ErrorCode::EMPTY_TITLE]);
    }

    #[rstest]
    #[tokio::test]
    async fn three_independent_failures_are_reported_together(free_titles: MockMovieCatalogue) {
        let fault = MovieValidator::new(&free_titles)
            .validate_new(&submission(Some("A"), Some("short"), Some(1500)))
            .await
            .expect_err("three failures");
        assert_eq!(
            codes(fault),
            vec![
                ErrorCode::TITLE_LENGTH,
                ErrorCode::DESCRIPTION_LENGTH,
                ErrorCode::RELEASE_YEAR_RANGE,
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_excludes_the_movie_itself() {
        let id = MovieId::random();
        let mut catalogue = MockMovieCatalogue::new();
        catalogue
            .expect_title_exists()
            .with(eq("Alien"), function(move |excluding: &Option<MovieId>| *excluding == Some(id)))
            .times(1)
            .returning(|_, _| Ok(false));

        let draft = MovieValidator::new(&catalogue)
            .validate_update(id, &submission(Some("Alien"), Some(DESCRIPTION), None))
            .await
            .expect("own title is allowed");
        assert_eq!(draft.title, "Alien");
    }

    #[rstest]
    #[tokio::test]
    async fn catalogue_failures_propagate_as_unexpected() {
        let mut catalogue = MockMovieCatalogue::new();
        catalogue
            .expect_title_exists()
            .returning(|_, _| Err(Fault::unexpected_message("catalogue offline")));

        let fault = MovieValidator::new(&catalogue)
            .validate_new(&submission(Some("Alien"), Some(DESCRIPTION), None))
            .await
            .expect_err("catalogue failure");
        assert!(matches!(fault, Fault::Unexpected { .. }));
    }
}
