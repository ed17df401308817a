//! # `unique` Keyword for jsonschema
//!
//! Exposes [`UniqueRule`] as a custom keyword of the `jsonschema` crate.
//! The keyword is attached to a [`ValidationOptions`] builder with
//! [`with_unique_keyword`]; nothing is registered globally, so schemas
//! compiled without it treat `unique` as an unknown (ignored) keyword.
//!
//! Accepted keyword values:
//!
//! ```json
//! { "type": "array", "unique": "email" }
//! { "type": "array", "unique": { "field": "email", "message": "Emails must be unique." } }
//! ```
//!
//! A missing or blank field fails schema compilation, which is the
//! construction-time error of the rule.

use jsonschema::paths::{LazyLocation, Location};
use jsonschema::{Keyword, ValidationError, ValidationOptions};
use serde_json::{Map, Value};

use crate::error::NAME_REQUIRED_MESSAGE;
use crate::field::FieldName;
use crate::unique::UniqueRule;

/// Keyword name used in schemas.
pub const UNIQUE_KEYWORD: &str = "unique";

/// Attach the `unique` keyword to a jsonschema options builder.
pub fn with_unique_keyword(options: &mut ValidationOptions) -> &mut ValidationOptions {
    options.with_keyword(UNIQUE_KEYWORD, unique_keyword_factory)
}

/// Compiled `unique` keyword.
struct UniqueKeyword {
    rule: UniqueRule,
    /// Location of the keyword inside the schema, reported on violations.
    schema_path: Location,
}

impl UniqueKeyword {
    fn failure_message(&self) -> String {
        let message = self.rule.message();
        if message.is_empty() {
            format!("duplicate value for field '{}'", self.rule.field())
        } else {
            message.to_string()
        }
    }
}

impl Keyword for UniqueKeyword {
    fn validate<'i>(
        &self,
        instance: &'i Value,
        location: &LazyLocation,
    ) -> Result<(), ValidationError<'i>> {
        if self.rule.validate(instance).is_ok() {
            return Ok(());
        }
        Err(ValidationError::custom(
            self.schema_path.clone(),
            location.into(),
            instance,
            self.failure_message(),
        ))
    }

    fn is_valid(&self, instance: &Value) -> bool {
        self.rule.validate(instance).is_ok()
    }
}

fn unique_keyword_factory<'a>(
    _parent: &'a Map<String, Value>,
    value: &'a Value,
    path: Location,
) -> Result<Box<dyn Keyword>, ValidationError<'a>> {
    match rule_from_keyword_value(value) {
        Ok(rule) => Ok(Box::new(UniqueKeyword {
            rule,
            schema_path: path,
        })),
        Err(reason) => Err(ValidationError::custom(
            Location::new(),
            path,
            value,
            reason,
        )),
    }
}

/// Parse the keyword's schema value into a rule.
///
/// Returns the human-readable reason on failure.
fn rule_from_keyword_value(value: &Value) -> Result<UniqueRule, String> {
    let (field, message) = match value {
        Value::String(field) => (Some(field.as_str()), ""),
        Value::Object(map) => (
            map.get("field").and_then(Value::as_str),
            map.get("message").and_then(Value::as_str).unwrap_or(""),
        ),
        Value::Null => (None, ""),
        _ => {
            return Err(format!(
                "the '{UNIQUE_KEYWORD}' keyword must be a field name or an object with a 'field' property"
            ))
        }
    };
    let field = FieldName::try_from(field).map_err(|_| NAME_REQUIRED_MESSAGE.to_string())?;
    Ok(UniqueRule::new(field, message))
}
