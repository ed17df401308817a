//! # Schema Validation
//!
//! Compiles JSON Schema documents (Draft 2020-12) with the `unique` keyword
//! attached and validates instances against them, reporting structured
//! violations.
//!
//! Schema compilation is where a misconfigured `unique` keyword surfaces:
//! a blank field name makes [`UniqueValidator::new`] fail before any
//! instance is validated.

use std::fmt;

use jsonschema::{Validator, ValidationOptions};
use serde_json::Value;
use thiserror::Error;

use crate::keyword::with_unique_keyword;

/// Error during schema compilation or validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the schema.
    #[error("validation failed:\n{violations}")]
    ValidationFailed {
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The schema could not be compiled (e.g., a misconfigured `unique`).
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Reason the validator could not be built.
        reason: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Options for Draft 2020-12 with the `unique` keyword attached.
pub fn options() -> ValidationOptions {
    let mut opts = jsonschema::options();
    opts.with_draft(jsonschema::Draft::Draft202012);
    with_unique_keyword(&mut opts);
    opts
}

/// A compiled schema that understands the `unique` keyword.
///
/// `UniqueValidator` is `Send + Sync`; compile once and share.
pub struct UniqueValidator {
    validator: Validator,
}

impl UniqueValidator {
    /// Compile `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidatorBuildError`] if the schema
    /// is invalid, including a `unique` keyword without a usable field name.
    pub fn new(schema: &Value) -> Result<Self, SchemaValidationError> {
        let validator = options().build(schema).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                reason: e.to_string(),
            }
        })?;
        Ok(Self { validator })
    }

    /// Returns `true` if `instance` conforms to the schema.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidationFailed`] with structured
    /// violation details if the instance is invalid.
    pub fn validate_document(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "document failed schema validation");
            Err(SchemaValidationError::ValidationFailed {
                violations: ValidationViolations { violations: errors },
            })
        }
    }
}

impl fmt::Debug for UniqueValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniqueValidator").finish_non_exhaustive()
    }
}
