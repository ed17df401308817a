//! # Error Types
//!
//! Two tiers, kept in separate types so they cannot be confused:
//!
//! - [`RuleError`] is a configuration error raised while a rule is being
//!   set up. It is fatal to rule construction and always synchronous.
//! - [`ValidationFailure`] is the expected negative outcome of evaluating
//!   a rule against data. It carries only the configured message.
//!
//! Schema-level and configuration-file errors live next to the code that
//! produces them (`keyword` and `config`).

use thiserror::Error;

/// Message reported whenever a rule is configured without a usable field name.
pub const NAME_REQUIRED_MESSAGE: &str = "The name argument is required.";

/// Error raised while constructing a rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// An argument was missing or out of range.
    #[error("{0}")]
    InvalidArgument(String),
}

impl RuleError {
    /// The field name was absent, empty, or whitespace only.
    pub fn name_required() -> Self {
        Self::InvalidArgument(NAME_REQUIRED_MESSAGE.to_string())
    }
}

/// A rule rejected the collection under validation.
///
/// `Display` prints the configured message verbatim, which may be empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationFailure {
    message: String,
}

impl ValidationFailure {
    /// Create a failure carrying `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The configured failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
