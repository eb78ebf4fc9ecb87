//! Rule-based validation of inbound request models.
//!
//! A [`ValidationEngine`] holds an ordered list of [`FieldRules`]. Rules
//! belonging to one field form a dependent chain: a rule only runs when
//! every earlier rule of that field passed, so a blank title never also
//! reports a length failure. Failures across different fields are always
//! accumulated; a request with three broken fields yields three errors in
//! one response.

use std::ops::RangeInclusive;

use async_trait::async_trait;

use super::api_response::ApiError;
use super::error_codes::ErrorCode;
use super::fault::Fault;

/// Asynchronous existence predicate backed by a domain service.
#[async_trait]
pub trait ExistencePredicate: Send + Sync {
    /// Whether a resource identified by `key` already exists.
    async fn exists(&self, key: &str) -> Result<bool, Fault>;
}

type TextAccessor<T> = fn(&T) -> Option<&str>;

enum Rule<'a, T> {
    Required(ErrorCode),
    Length {
        range: RangeInclusive<usize>,
        code: ErrorCode,
    },
    Unique {
        predicate: &'a dyn ExistencePredicate,
        code: ErrorCode,
    },
    Satisfies {
        check: fn(&T) -> bool,
        code: ErrorCode,
    },
}

/// Ordered rules applied to one field of a request model.
pub struct FieldRules<'a, T> {
    name: &'static str,
    value: Option<TextAccessor<T>>,
    rules: Vec<Rule<'a, T>>,
}

impl<'a, T> FieldRules<'a, T> {
    /// Rules for a text field read through `value`.
    #[must_use]
    pub fn text(name: &'static str, value: TextAccessor<T>) -> Self {
        Self {
            name,
            value: Some(value),
            rules: Vec::new(),
        }
    }

    /// Rules for a non-text field checked through [`FieldRules::satisfies`].
    #[must_use]
    pub fn custom(name: &'static str) -> Self {
        Self {
            name,
            value: None,
            rules: Vec::new(),
        }
    }

    /// Fail with `code` when the value is absent or blank.
    #[must_use]
    pub fn required(mut self, code: ErrorCode) -> Self {
        self.rules.push(Rule::Required(code));
        self
    }

    /// Fail with `code` when the trimmed character count is outside `range`.
    #[must_use]
    pub fn length(mut self, range: RangeInclusive<usize>, code: ErrorCode) -> Self {
        self.rules.push(Rule::Length { range, code });
        self
    }

    /// Fail with `code` when `predicate` reports the value already exists.
    #[must_use]
    pub fn unique(mut self, predicate: &'a dyn ExistencePredicate, code: ErrorCode) -> Self {
        self.rules.push(Rule::Unique { predicate, code });
        self
    }

    /// Fail with `code` when `check` returns `false` for the request.
    #[must_use]
    pub fn satisfies(mut self, check: fn(&T) -> bool, code: ErrorCode) -> Self {
        self.rules.push(Rule::Satisfies { check, code });
        self
    }

    /// Field name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    async fn first_failure(&self, request: &T) -> Result<Option<ApiError>, Fault> {
        let value = self
            .value
            .and_then(|accessor| accessor(request))
            .map(str::trim)
            .filter(|text| !text.is_empty());

        for rule in &self.rules {
            let failed = match (rule, value) {
                (Rule::Required(code), None) => Some(*code),
                (Rule::Required(_), Some(_)) => None,
                // Absent optional text has nothing to measure or look up.
                (Rule::Length { .. } | Rule::Unique { .. }, None) => None,
                (Rule::Length { range, code }, Some(text)) => {
                    (!range.contains(&text.chars().count())).then_some(*code)
                }
                (Rule::Unique { predicate, code }, Some(text)) => {
                    predicate.exists(text).await?.then_some(*code)
                }
                (Rule::Satisfies { check, code }, _) => (!check(request)).then_some(*code),
            };
            if let Some(code) = failed {
                return Ok(Some(ApiError::from_code(code)));
            }
        }
        Ok(None)
    }
}

/// Ordered collection of field rules for a request model.
pub struct ValidationEngine<'a, T> {
    fields: Vec<FieldRules<'a, T>>,
}

impl<T> Default for ValidationEngine<'_, T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<'a, T: Sync> ValidationEngine<'a, T> {
    /// Empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the rules for another field.
    #[must_use]
    pub fn field(mut self, rules: FieldRules<'a, T>) -> Self {
        self.fields.push(rules);
        self
    }

    /// Run every field's rules and collect the failures in field order.
    ///
    /// # Errors
    /// Propagates faults raised by existence predicates; those are not
    /// validation failures.
    pub async fn validate(&self, request: &T) -> Result<Vec<ApiError>, Fault> {
        let mut failures = Vec::new();
        for field in &self.fields {
            if let Some(error) = field.first_failure(request).await? {
                tracing::debug!(field = field.name(), code = %error.code(), "validation rule failed");
                failures.push(error);
            }
        }
        Ok(failures)
    }

    /// Validate and raise a single [`Fault::Validation`] carrying every failure.
    ///
    /// # Errors
    /// Returns the validation fault when any rule fails, or the fault raised
    /// by an existence predicate.
    pub async fn ensure_valid(&self, request: &T) -> Result<(), Fault> {
        let failures = self.validate(request).await?;
        match Fault::validation(failures) {
            Some(fault) => Err(fault),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Engine ordering and short-circuit rules.
    use super::*;
    use crate::domain::FaultStatus;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Form {
        name: Option<String>,
        nickname: Option<String>,
        age: i64,
    }

    struct Taken {
        key: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ExistencePredicate for Taken {
        async fn exists(&self, key: &str) -> Result<bool, Fault> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(key == self.key)
        }
    }

    struct Broken;

    #[async_trait]
    impl ExistencePredicate for Broken {
        async fn exists(&self, _key: &str) -> Result<bool, Fault> {
            Err(Fault::unexpected_message("lookup failed"))
        }
    }

    fn form_name(form: &Form) -> Option<&str> {
        form.name.as_deref()
    }

    fn form_nickname(form: &Form) -> Option<&str> {
        form.nickname.as_deref()
    }

    fn form(name: Option<&str>, nickname: Option<&str>, age: i64) -> Form {
        Form {
            name: name.map(str::to_owned),
            nickname: nickname.map(str::to_owned),
            age,
        }
    }

    fn engine(taken: &Taken) -> ValidationEngine<'_, Form> {
        ValidationEngine::new()
            .field(
                FieldRules::text("name", form_name)
                    .required(ErrorCode::EMPTY_TITLE)
                    .unique(taken, ErrorCode::DUPLICATE_TITLE)
                    .length(2..=5, ErrorCode::TITLE_LENGTH),
            )
            .field(
                FieldRules::text("nickname", form_nickname)
                    .length(3..=10, ErrorCode::DESCRIPTION_LENGTH),
            )
            .field(
                FieldRules::custom("age")
                    .satisfies(|f: &Form| f.age >= 0, ErrorCode::RELEASE_YEAR_RANGE),
            )
    }

    fn taken(key: &'static str) -> Taken {
        Taken {
            key,
            calls: AtomicUsize::new(0),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn valid_request_produces_no_errors() {
        let taken = taken("bob");
        let errors = engine(&taken)
            .validate(&form(Some("ann"), None, 3))
            .await
            .expect("validation runs");
        assert!(errors.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn blank_field_skips_dependent_rules() {
        let taken = taken("bob");
        let errors = engine(&taken)
            .validate(&form(Some("   "), None, 3))
            .await
            .expect("validation runs");
        assert_eq!(errors, vec![ApiError::from_code(ErrorCode::EMPTY_TITLE)]);
        assert_eq!(taken.calls.load(Ordering::SeqCst), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn existence_failure_suppresses_length_rule() {
        let taken = taken("x");
        let errors = engine(&taken)
            .validate(&form(Some("x"), None, 3))
            .await
            .expect("validation runs");
        assert_eq!(errors, vec![ApiError::from_code(ErrorCode::DUPLICATE_TITLE)]);
    }

    #[rstest]
    #[tokio::test]
    async fn failures_accumulate_across_fields_in_order() {
        let taken = taken("bob");
        let errors = engine(&taken)
            .validate(&form(None, Some("ab"), -1))
            .await
            .expect("validation runs");
        let codes: Vec<_> = errors.iter().map(ApiError::code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::EMPTY_TITLE,
                ErrorCode::DESCRIPTION_LENGTH,
                ErrorCode::RELEASE_YEAR_RANGE,
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn ensure_valid_raises_single_validation_fault() {
        let taken = taken("bob");
        let result = engine(&taken).ensure_valid(&form(None, Some("ab"), 3)).await;
        match result {
            Err(Fault::Validation { status, errors }) => {
                assert_eq!(status, FaultStatus::BadRequest);
                assert_eq!(errors.len(), 2);
            }
            other => panic!("expected validation fault, got {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn predicate_faults_propagate() {
        let engine = ValidationEngine::new().field(
            FieldRules::text("name", form_name)
                .required(ErrorCode::EMPTY_TITLE)
                .unique(&Broken, ErrorCode::DUPLICATE_TITLE),
        );
        let result = engine.validate(&form(Some("ann"), None, 0)).await;
        assert!(matches!(result, Err(Fault::Unexpected { .. })));
    }
}
