//! Operation map and parameter rule checks (S009–S013, S015).

use std::collections::HashSet;

use serde_json::Value;

use crate::error::SchemaError;
use crate::resolve::visibility::{required_fields, resolve_visibility};
use crate::schema::{BlockDefinition, RawValues, Rule};

pub fn validate_operations(block: &BlockDefinition) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    s009_default_entry_exists(block, &mut errors);
    s010_options_have_entries(block, &mut errors);
    s011_rules_target_known_operations(block, &mut errors);
    s012_rules_target_known_params(block, &mut errors);
    s013_clamp_bounds_ordered(block, &mut errors);
    s015_required_fields_enforced(block, &mut errors);

    errors
}

fn s009_default_entry_exists(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    if block.operations.get(&block.operations.default).is_none() {
        errors.push(SchemaError::new(
            "S009",
            format!(
                "Default operation '{}' has no entry in the operation map",
                block.operations.default
            ),
            None,
        ));
    }
}

fn s010_options_have_entries(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    let Some(field) = block.operation_spec() else {
        return;
    };
    for option in &field.options {
        if block.operations.get(&option.value).is_none() {
            errors.push(SchemaError::new(
                "S010",
                format!(
                    "Operation option '{}' has no entry in the operation map",
                    option.value
                ),
                Some(field.id.clone()),
            ));
        }
    }
}

fn s011_rules_target_known_operations(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    let known: HashSet<&str> = block.operations.backend_ids().collect();
    for operation in block.rules.operations.keys() {
        if !known.contains(operation.as_str()) {
            errors.push(SchemaError::new(
                "S011",
                format!(
                    "Rules declared for operation '{}', which the operation map never selects",
                    operation
                ),
                None,
            ));
        }
    }
}

fn s012_rules_target_known_params(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    let params: HashSet<&str> = block.fields.iter().map(|f| f.canonical_key()).collect();
    let rules = block
        .rules
        .common
        .iter()
        .chain(block.rules.operations.values().flatten());
    let mut reported = HashSet::new();
    for rule in rules {
        if !params.contains(rule.param.as_str()) && reported.insert(rule.param.as_str()) {
            errors.push(SchemaError::new(
                "S012",
                format!("Rule targets parameter '{}', which no field provides", rule.param),
                Some(rule.param.clone()),
            ));
        }
    }
}

fn s013_clamp_bounds_ordered(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    let rules = block
        .rules
        .common
        .iter()
        .chain(block.rules.operations.values().flatten());
    for rule in rules {
        if let Rule::NumericClamp { min, max } = rule.rule {
            if min.is_nan() || max.is_nan() || min > max {
                errors.push(SchemaError::new(
                    "S013",
                    format!(
                        "Clamp on '{}' has min {} greater than max {}",
                        rule.param, min, max
                    ),
                    Some(rule.param.clone()),
                ));
            }
        }
    }
}

/// A field marked required must be backed by a `required` rule on its
/// canonical key for every operation it is required in. Each operation is
/// checked with only the operation field set; other fields take defaults.
fn s015_required_fields_enforced(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    let mut reported = HashSet::new();
    for (key, operation) in &block.operations.entries {
        let values: RawValues =
            [(block.operation_field.clone(), Value::String(key.clone()))].into_iter().collect();
        let active = resolve_visibility(&block.fields, &values);
        let required = required_fields(&block.fields, &values, &active);
        let rules = block.rules.for_operation(operation);

        for field in block.fields.iter().filter(|f| required.contains(&f.id)) {
            let enforced = rules
                .iter()
                .any(|r| r.param == field.canonical_key() && r.rule == Rule::RequiredNonEmpty);
            if !enforced && reported.insert((field.id.as_str(), operation.as_str())) {
                errors.push(SchemaError::new(
                    "S015",
                    format!(
                        "Field '{}' is required for operation '{}' but no required rule \
                         enforces '{}'",
                        field.id,
                        operation,
                        field.canonical_key()
                    ),
                    Some(field.id.clone()),
                ));
            }
        }
    }
}
