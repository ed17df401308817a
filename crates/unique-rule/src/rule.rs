//! # Rule Seam
//!
//! The contract a host validation pipeline consumes: a rule tag, a failure
//! message, and a test function over the value under validation. Hosts
//! aggregate rules and decide how to surface the message; this crate only
//! implements the contract.

use serde::Serialize;
use serde_json::Value;

use crate::field::FieldName;
use crate::unique::UniqueRule;

/// Tag under which the uniqueness rule is known to hosts.
pub const UNIQUE_RULE_NAME: &str = "unique";

/// A named, composable validation unit.
pub trait Rule: Send + Sync {
    /// Rule tag, e.g. `"unique"`.
    fn name(&self) -> &str;

    /// Message to surface when [`test`](Self::test) returns `false`.
    fn message(&self) -> &str;

    /// Returns `true` if `value` passes the rule.
    fn test(&self, value: &Value) -> bool;
}

impl Rule for UniqueRule {
    fn name(&self) -> &str {
        UNIQUE_RULE_NAME
    }

    fn message(&self) -> &str {
        UniqueRule::message(self)
    }

    fn test(&self, value: &Value) -> bool {
        self.validate(value).is_ok()
    }
}

/// Serializable metadata describing a configured rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    /// Rule tag.
    pub name: &'static str,
    /// Field the rule compares on.
    pub field: FieldName,
    /// Failure message.
    pub message: String,
}

impl From<&UniqueRule> for RuleDescriptor {
    fn from(rule: &UniqueRule) -> Self {
        Self {
            name: UNIQUE_RULE_NAME,
            field: rule.field().clone(),
            message: rule.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unique::unique;
    use serde_json::json;

    #[test]
    fn unique_rule_through_trait_object() {
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(unique("id", "duplicate id").unwrap()),
            Box::new(unique("email", "duplicate email").unwrap()),
        ];
        let value = json!([
            {"id": 1, "email": "a@example.com"},
            {"id": 2, "email": "A@example.com"},
        ]);

        let failed: Vec<&str> = rules
            .iter()
            .filter(|r| !r.test(&value))
            .map(|r| r.message())
            .collect();
        assert_eq!(failed, vec!["duplicate email"]);
        assert!(rules.iter().all(|r| r.name() == "unique"));
    }

    #[test]
    fn descriptor_serializes_field_as_string() {
        let rule = unique("test", "error message").unwrap();
        let descriptor = RuleDescriptor::from(&rule);
        assert_eq!(
            serde_json::to_value(&descriptor).unwrap(),
            json!({"name": "unique", "field": "test", "message": "error message"})
        );
    }
}
