//! # Uniqueness Rule
//!
//! Checks that no two records in a collection share the same
//! case-insensitive value for a named field.
//!
//! The rule is configured once through [`unique`] or [`UniqueRule::new`].
//! An unusable field name fails right there, before any data is seen.
//! Evaluation is pure: it borrows the collection immutably, holds no state
//! between calls, and only ever fails with the configured message.
//!
//! Records whose field value is missing or falsy (see [`crate::value`]) are
//! skipped entirely, so an optional field can carry this rule without every
//! blank entry being reported as a duplicate of every other.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{RuleError, ValidationFailure};
use crate::field::FieldName;
use crate::value::participation_key;

/// Positions of two records that collide on the configured field.
///
/// `first < second`; `first` is the earliest record holding the shared
/// value and `second` is the earliest later record repeating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicatePair {
    /// Index of the earlier record.
    pub first: usize,
    /// Index of the later record.
    pub second: usize,
}

/// A configured field-uniqueness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueRule {
    field: FieldName,
    message: String,
}

/// Build a uniqueness rule on `field`, failing with `message` on duplicates.
///
/// `field` accepts anything convertible into a [`FieldName`], including
/// `Option<&str>`, so an absent name is rejected the same way a blank one is.
///
/// # Errors
///
/// Returns [`RuleError::InvalidArgument`] when the field name is absent,
/// empty, or whitespace only. `message` is never validated.
pub fn unique<F>(field: F, message: impl Into<String>) -> Result<UniqueRule, RuleError>
where
    F: TryInto<FieldName, Error = RuleError>,
{
    Ok(UniqueRule::new(field.try_into()?, message))
}

impl UniqueRule {
    /// Build a rule from an already validated field name.
    pub fn new(field: FieldName, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::debug!(field = %field, "configured unique rule");
        Self { field, message }
    }

    /// The field compared across records.
    pub fn field(&self) -> &FieldName {
        &self.field
    }

    /// The message reported on failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Find the first pair of records colliding on the configured field.
    ///
    /// Returns `None` when every participating value is distinct, including
    /// for an empty collection.
    pub fn find_duplicate(&self, records: &[Value]) -> Option<DuplicatePair> {
        let mut seen: HashMap<String, usize> = HashMap::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let Some(key) = participation_key(record, self.field.as_str()) else {
                continue;
            };
            if let Some(&first) = seen.get(&key) {
                tracing::debug!(
                    field = %self.field,
                    first,
                    second = index,
                    "duplicate field value"
                );
                return Some(DuplicatePair {
                    first,
                    second: index,
                });
            }
            seen.insert(key, index);
        }
        None
    }

    /// Returns `true` when no two records collide.
    pub fn is_valid(&self, records: &[Value]) -> bool {
        self.find_duplicate(records).is_none()
    }

    /// Check a collection, failing with the configured message on a duplicate.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] if any two records collide.
    pub fn check(&self, records: &[Value]) -> Result<(), ValidationFailure> {
        match self.find_duplicate(records) {
            None => Ok(()),
            Some(_) => Err(ValidationFailure::new(self.message.as_str())),
        }
    }

    /// Validate a host value, handing the same reference back on success.
    ///
    /// Only arrays are inspected; other values pass untouched, leaving type
    /// checks to the host's own rules.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] if the array holds a duplicate.
    pub fn validate<'a>(&self, value: &'a Value) -> Result<&'a Value, ValidationFailure> {
        if let Value::Array(records) = value {
            self.check(records)?;
        }
        Ok(value)
    }

    /// Asynchronous form of [`validate`](Self::validate) for hosts that
    /// drive rules through futures. Completes on first poll.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationFailure`] if the array holds a duplicate.
    pub async fn validate_async<'a>(
        &self,
        value: &'a Value,
    ) -> Result<&'a Value, ValidationFailure> {
        self.validate(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Records holding a mix of strings, numbers, booleans and gaps under `key`.
    fn record() -> impl Strategy<Value = Value> {
        let field = prop_oneof![
            Just(None),
            Just(Some(Value::Null)),
            any::<bool>().prop_map(|b| Some(Value::Bool(b))),
            (-5i64..5).prop_map(|n| Some(serde_json::json!(n))),
            "[a-cA-C]{0,2}".prop_map(|s| Some(Value::String(s))),
        ];
        field.prop_map(|v| {
            let mut map = serde_json::Map::new();
            map.insert("other".to_string(), Value::Bool(true));
            if let Some(v) = v {
                map.insert("key".to_string(), v);
            }
            Value::Object(map)
        })
    }

    /// Direct pairwise definition: any two distinct participating positions
    /// with equal lower-cased text.
    fn has_pairwise_duplicate(records: &[Value]) -> bool {
        let keys: Vec<Option<String>> = records
            .iter()
            .map(|r| participation_key(r, "key"))
            .collect();
        keys.iter().enumerate().any(|(i, a)| {
            keys.iter()
                .enumerate()
                .any(|(j, b)| i != j && a.is_some() && a == b)
        })
    }

    proptest! {
        /// The hash-based search agrees with the all-pairs definition.
        #[test]
        fn matches_pairwise_definition(records in prop::collection::vec(record(), 0..12)) {
            let rule = unique("key", "dup").unwrap();
            prop_assert_eq!(rule.is_valid(&records), !has_pairwise_duplicate(&records));
        }

        /// Evaluation never mutates its input and always gives the same answer.
        #[test]
        fn pure_and_deterministic(records in prop::collection::vec(record(), 0..12)) {
            let rule = unique("key", "dup").unwrap();
            let snapshot = records.clone();
            let a = rule.check(&records);
            let b = rule.check(&records);
            prop_assert_eq!(a, b);
            prop_assert_eq!(records, snapshot);
        }

        /// Reordering the collection never changes the verdict.
        #[test]
        fn order_independent(mut records in prop::collection::vec(record(), 0..12)) {
            let rule = unique("key", "dup").unwrap();
            let before = rule.is_valid(&records);
            records.reverse();
            prop_assert_eq!(rule.is_valid(&records), before);
        }

        /// A reported pair really does collide.
        #[test]
        fn reported_pair_collides(records in prop::collection::vec(record(), 0..12)) {
            let rule = unique("key", "dup").unwrap();
            if let Some(pair) = rule.find_duplicate(&records) {
                prop_assert!(pair.first < pair.second);
                let a = participation_key(&records[pair.first], "key");
                let b = participation_key(&records[pair.second], "key");
                prop_assert!(a.is_some());
                prop_assert_eq!(a, b);
            }
        }
    }
}
