//! Pre-conditions checked before a mutation proceeds.
//!
//! Validators are plain values; `run_validators` evaluates them in order and
//! stops at the first failure.

use crate::models::ValidationResult;
use crate::parser::NO_DESCRIPTION;

pub trait Validator {
    fn validate(&self) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn() -> ValidationResult,
{
    fn validate(&self) -> ValidationResult {
        self()
    }
}

/// Runs validators in order and returns the first failure, or success.
#[must_use]
pub fn run_validators(validators: &[&dyn Validator]) -> ValidationResult {
    validators
        .iter()
        .map(|validator| validator.validate())
        .find(|result| !result.success)
        .unwrap_or_else(ValidationResult::ok)
}

/// Fails when the parsed description is the "no description" sentinel.
#[derive(Debug, Clone)]
pub struct HasDescriptionValidator {
    description: String,
}

impl HasDescriptionValidator {
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

impl Validator for HasDescriptionValidator {
    fn validate(&self) -> ValidationResult {
        if self.description == NO_DESCRIPTION {
            return ValidationResult::fail(
                "Document must have a description. Add a paragraph after the title (# Title).",
            );
        }
        ValidationResult::ok()
    }
}

/// Fails when the document already exists.
#[derive(Debug, Clone)]
pub struct NotExistsValidator {
    id: String,
    exists: bool,
}

impl NotExistsValidator {
    #[must_use]
    pub fn new(id: impl Into<String>, exists: bool) -> Self {
        Self {
            id: id.into(),
            exists,
        }
    }
}

impl Validator for NotExistsValidator {
    fn validate(&self) -> ValidationResult {
        if self.exists {
            return ValidationResult::fail(format!(
                "Document \"{}\" already exists. Use 'update' to modify it.",
                self.id
            ));
        }
        ValidationResult::ok()
    }
}

/// Fails when the document does not exist.
#[derive(Debug, Clone)]
pub struct ExistsValidator {
    id: String,
    exists: bool,
}

impl ExistsValidator {
    #[must_use]
    pub fn new(id: impl Into<String>, exists: bool) -> Self {
        Self {
            id: id.into(),
            exists,
        }
    }
}

impl Validator for ExistsValidator {
    fn validate(&self) -> ValidationResult {
        if !self.exists {
            return ValidationResult::fail(format!("Document \"{}\" not found.", self.id));
        }
        ValidationResult::ok()
    }
}
