//! Visibility resolver: which fields are active for the current values.

use std::collections::BTreeSet;

use serde_json::Value;

use super::effective;
use crate::schema::{Condition, FieldSpec, RawValues, Requirement};

/// Ids of the fields that are currently active (visible).
///
/// Conditions are evaluated against raw values, falling back to the
/// referenced field's default. They are never evaluated transitively; the
/// schema validator rejects chained conditions up front.
pub fn resolve_visibility(fields: &[FieldSpec], values: &RawValues) -> BTreeSet<String> {
    fields
        .iter()
        .filter(|field| match &field.condition {
            None => true,
            Some(condition) => condition_holds(fields, condition, values),
        })
        .map(|field| field.id.clone())
        .collect()
}

/// Active fields whose `required` flag currently holds. Used by the form UI
/// to mark fields; enforcement is done by the parameter rules.
pub fn required_fields(
    fields: &[FieldSpec],
    values: &RawValues,
    active: &BTreeSet<String>,
) -> BTreeSet<String> {
    fields
        .iter()
        .filter(|field| active.contains(&field.id))
        .filter(|field| match &field.required {
            Requirement::Always(required) => *required,
            Requirement::When(condition) => condition_holds(fields, condition, values),
        })
        .map(|field| field.id.clone())
        .collect()
}

pub fn condition_holds(fields: &[FieldSpec], condition: &Condition, values: &RawValues) -> bool {
    let current = current_value(fields, &condition.field, values);
    let is_member = current
        .as_ref()
        .is_some_and(|value| condition.values.iter().any(|expected| matches(value, expected)));

    if is_member == condition.not {
        return false;
    }
    match &condition.and {
        Some(and) => condition_holds(fields, and, values),
        None => true,
    }
}

/// The raw value of `field_id`, or its default when unset.
pub fn current_value(fields: &[FieldSpec], field_id: &str, values: &RawValues) -> Option<Value> {
    values.get(field_id).and_then(effective).or_else(|| {
        fields
            .iter()
            .find(|f| f.id == field_id)
            .and_then(FieldSpec::default_value)
            .as_ref()
            .and_then(effective)
    })
}

/// Equality that tolerates the UI layer sending scalars as strings
/// (`"true"` for a switch, `"10"` for a slider). When either side is a
/// number, both are compared as numbers, so `10` matches `10.0`.
fn matches(value: &Value, expected: &Value) -> bool {
    if value == expected {
        return true;
    }
    if value.is_number() || expected.is_number() {
        return match (scalar_number(value), scalar_number(expected)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
    }
    match (scalar_text(value), scalar_text(expected)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_scalar_matching() {
        assert!(matches(&json!("true"), &json!(true)));
        assert!(matches(&json!(10), &json!("10")));
        assert!(!matches(&json!("10"), &json!("100")));
        assert!(!matches(&json!(["a"]), &json!("a")));
    }

    #[test]
    fn numbers_match_by_value() {
        assert!(matches(&json!(10), &json!(10.0)));
        assert!(matches(&json!("10.0"), &json!(10)));
        assert!(matches(&json!(0.5), &json!(" 0.5 ")));
        assert!(!matches(&json!(10), &json!(10.5)));
        assert!(!matches(&json!(1), &json!(true)));
    }
}
