//! # Field Values
//!
//! Participation and comparison rules for the value a record holds under
//! the configured field.
//!
//! ## Participation
//!
//! A record participates in duplicate detection only when its field value
//! is present and truthy. The falsy set is fixed:
//!
//! | value                  | participates |
//! |------------------------|--------------|
//! | missing key, `null`    | no           |
//! | `false`                | no           |
//! | `0`, `0.0`, `-0.0`     | no           |
//! | `""`                   | no           |
//! | everything else        | yes          |
//!
//! Empty arrays and objects are truthy.
//!
//! ## Comparison
//!
//! Participating values compare by their lower-cased string form, so
//! `1`, `1.0` and `"1"` all collide, and so do `"one"` and `"ONE"`.

use serde_json::{Number, Value};

/// Text used for object values, which have no meaningful scalar form.
const OBJECT_STRING: &str = "[object Object]";

/// Returns `true` if `value` counts as present for participation.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => !number_is_zero(n),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn number_is_zero(n: &Number) -> bool {
    if let Some(i) = n.as_i64() {
        i == 0
    } else if let Some(u) = n.as_u64() {
        u == 0
    } else {
        n.as_f64().map_or(false, |f| f == 0.0)
    }
}

/// Render `value` in its canonical string form.
///
/// Strings render as themselves; numbers as ECMAScript prints them
/// (integral floats without a fractional part, very large or small
/// magnitudes in exponent form such as `1e+21`); arrays as their elements
/// joined with `,` (null elements render empty); objects as
/// `[object Object]`.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => OBJECT_STRING.to_string(),
    }
}

fn number_to_string(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) => format_f64(f),
        None => n.to_string(),
    }
}

/// ECMAScript `Number::toString` for finite floats: plain decimal for
/// magnitudes in `[1e-6, 1e21)`, exponent form (`1e+21`, `1.5e-7`) outside.
fn format_f64(f: f64) -> String {
    // -0.0 prints as "0"
    if f == 0.0 {
        return "0".to_string();
    }
    let sign = if f < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e-7".
    let sci = format!("{:e}", f.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let e_sign = if e < 0 { '-' } else { '+' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{e_sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{e_sign}{}", e.abs())
        }
    };
    format!("{sign}{body}")
}

/// The lower-cased comparison key for `record[field]`, or `None` when the
/// record does not participate.
///
/// Non-object records and records without the field never participate.
pub fn participation_key(record: &Value, field: &str) -> Option<String> {
    let value = record.as_object()?.get(field)?;
    if !is_truthy(value) {
        return None;
    }
    Some(to_js_string(value).to_lowercase())
}
