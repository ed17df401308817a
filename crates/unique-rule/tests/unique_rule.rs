//! Integration test: the `unique` rule through its public entry points.
//!
//! Covers the standalone rule, the async entry point, the `Rule` trait, and
//! the `unique` keyword inside a compiled jsonschema validator, using the
//! same fixtures for each.

use serde_json::{json, Value};
use unique_rule::{
    unique, Rule, RuleError, RuleSetConfig, SchemaValidationError, UniqueValidator,
};

fn array_schema(field: &str) -> Value {
    json!({
        "type": "array",
        "unique": { "field": field, "message": "error message" }
    })
}

#[test]
fn test_name_is_required() {
    for name in [None, Some(""), Some(" ")] {
        let err = unique(name, "error message").unwrap_err();
        assert_eq!(
            err,
            RuleError::InvalidArgument("The name argument is required.".to_string())
        );
    }
    assert!(unique("test", "error message").is_ok());
}

#[test]
fn test_name_is_required_by_schema_compilation() {
    for keyword in [json!(null), json!(""), json!(" "), json!({"message": "x"})] {
        let schema = json!({"type": "array", "unique": keyword});
        let err = UniqueValidator::new(&schema).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::ValidatorBuildError { .. }),
            "Expected ValidatorBuildError, got: {err}"
        );
    }
}

#[tokio::test]
async fn test_passing_collections_resolve_to_input() {
    let cases = [
        ("test", json!([])),
        ("other", json!([{"test": "one"}, {"test": "two"}])),
        ("test", json!([{"test": "one"}, {"test": "two"}])),
        ("test", json!([{"test": 1}, {"test": 2}])),
    ];
    for (field, array) in &cases {
        let rule = unique(*field, "error message").unwrap();
        let resolved = rule.validate_async(array).await.unwrap();
        assert!(std::ptr::eq(resolved, array), "field {field}, array {array}");
    }
}

#[tokio::test]
async fn test_duplicates_reject_with_message() {
    let cases = [
        json!([{"test": "one"}, {"test": "one"}]),
        json!([{"test": "one"}, {"test": "ONE"}]),
        json!([{"test": 1}, {"test": 1}]),
        json!([{"test": "a"}, {"test": "b"}, {"test": "A"}]),
    ];
    let rule = unique("test", "error message").unwrap();
    for array in &cases {
        let err = rule.validate_async(array).await.unwrap_err();
        assert_eq!(err.to_string(), "error message", "array {array}");
    }
}

#[test]
fn test_keyword_agrees_with_rule() {
    let fixtures = [
        json!([]),
        json!([{"test": "one"}, {"test": "two"}]),
        json!([{"test": "one"}, {"test": "ONE"}]),
        json!([{"test": 1}, {"test": 1}]),
        json!([{"test": 0}, {"test": 0}]),
        json!([{"test": 1}, {"test": "1"}]),
    ];
    let rule = unique("test", "error message").unwrap();
    let validator = UniqueValidator::new(&array_schema("test")).unwrap();
    for fixture in &fixtures {
        assert_eq!(validator.is_valid(fixture), rule.test(fixture), "fixture {fixture}");
    }
}

#[test]
fn test_keyword_reports_configured_message() {
    let validator = UniqueValidator::new(&array_schema("test")).unwrap();
    let err = validator
        .validate_document(&json!([{"test": "x"}, {"test": "X"}]))
        .unwrap_err();
    let SchemaValidationError::ValidationFailed { violations } = err else {
        panic!("Expected ValidationFailed");
    };
    let messages: Vec<&str> = violations
        .violations()
        .iter()
        .map(|v| v.message.as_str())
        .collect();
    assert_eq!(messages, vec!["error message"]);
}

#[test]
fn test_configured_rules_check_each_field() {
    let rules = RuleSetConfig::from_yaml_str(
        r#"
rules:
  - field: id
    message: duplicate id
  - field: email
    message: duplicate email
"#,
    )
    .unwrap()
    .build()
    .unwrap();

    let records = json!([
        {"id": 1, "email": "a@example.com"},
        {"id": 2, "email": "b@example.com"},
        {"id": 1, "email": "B@example.com"},
    ]);
    let failed: Vec<&str> = rules
        .iter()
        .filter(|r| !r.test(&records))
        .map(|r| Rule::message(r))
        .collect();
    assert_eq!(failed, vec!["duplicate id", "duplicate email"]);
}
