//! # Field Names
//!
//! Newtype for the record property a rule compares on. The constructor is
//! the only place a name is checked, so a rule holding a `FieldName` can
//! never see a blank one at evaluation time.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::RuleError;

/// A non-empty, non-whitespace-only record property name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName(String);

impl FieldName {
    /// Validate and wrap a field name.
    ///
    /// The name is stored as given (no trimming): `" id"` and `"id"` are
    /// different properties.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidArgument`] if `name` is empty or only
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, RuleError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RuleError::name_required());
        }
        Ok(Self(name))
    }

    /// Access the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for FieldName {
    type Error = RuleError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<String> for FieldName {
    type Error = RuleError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<Option<&str>> for FieldName {
    type Error = RuleError;

    fn try_from(name: Option<&str>) -> Result<Self, Self::Error> {
        name.ok_or_else(RuleError::name_required).and_then(Self::new)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for FieldName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}
