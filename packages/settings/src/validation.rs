// ABOUTME: Input validation for the Facebook settings form
// ABOUTME: Graph API version format check and per-field error collection

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static GRAPH_VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[2-9]\.[0-9]{1,2}$").expect("graph version pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid API version. The syntax for API version is for example 2.8")]
    InvalidGraphVersion(String),

    #[error("{0} field is required.")]
    Required(String),

    #[error("An illegal choice has been detected: {0}")]
    IllegalChoice(String),

    #[error("{field} must be {expected}")]
    InvalidType { field: String, expected: &'static str },
}

/// Check a Graph API version such as `2.8`. The `v` prefix is not accepted.
pub fn validate_graph_version(value: &str) -> Result<(), ValidationError> {
    if GRAPH_VERSION_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidGraphVersion(value.to_string()))
    }
}

/// An error attached to a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub error: ValidationError,
}

impl FieldError {
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

/// Field errors of one submission, at most one per field, in the order raised
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} form field(s) failed validation", .errors.len())]
pub struct FormErrors {
    errors: Vec<FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`. A field keeps its first error.
    pub fn set_error(&mut self, field: impl Into<String>, error: ValidationError) {
        let field = field.into();
        if self.get(&field).is_none() {
            self.errors.push(FieldError { field, error });
        }
    }

    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.error)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }
}
