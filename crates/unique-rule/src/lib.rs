//! # unique-rule — Field-Uniqueness Validation
//!
//! A single validation rule: no two records in a collection may share the
//! same case-insensitive value for a named field. Records whose value is
//! missing or falsy are left out of the comparison.
//!
//! ## Entry Points
//!
//! - [`unique`] / [`UniqueRule`] — the standalone rule. Construction
//!   validates the field name; evaluation is pure and returns the input
//!   unchanged on success.
//! - [`Rule`] — the seam a host pipeline consumes (tag, message, test).
//! - [`keyword`] — the rule as a `unique` keyword for the `jsonschema`
//!   crate, attached explicitly to a `ValidationOptions` builder.
//! - [`config`] — rules described in JSON or YAML.
//!
//! ## Crate Policy
//!
//! - No global registration: hosts opt in per options builder.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Configuration errors ([`RuleError`]) and validation outcomes
//!   ([`ValidationFailure`]) are distinct types.

pub mod config;
pub mod error;
pub mod field;
pub mod keyword;
pub mod rule;
pub mod schema;
pub mod unique;
pub mod value;

pub use config::{ConfigError, RuleSetConfig, UniqueRuleConfig};
pub use error::{RuleError, ValidationFailure, NAME_REQUIRED_MESSAGE};
pub use field::FieldName;
pub use keyword::{with_unique_keyword, UNIQUE_KEYWORD};
pub use rule::{Rule, RuleDescriptor, UNIQUE_RULE_NAME};
pub use schema::{SchemaValidationError, UniqueValidator, ValidationViolations, Violation};
pub use unique::{unique, DuplicatePair, UniqueRule};
