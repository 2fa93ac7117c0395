//! Field-level structural rules (S001–S008).

use std::collections::{HashMap, HashSet};

use petgraph::algo::is_cyclic_directed;

use crate::error::SchemaError;
use crate::schema::{BlockDefinition, Dependency, FieldGraph, FieldKind, ValueClass};

/// Run all structural validation rules. Returns all errors found.
pub fn validate_structural(block: &BlockDefinition) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    s001_unique_field_ids(block, &mut errors);
    match FieldGraph::build(block) {
        Ok(graph) => {
            s003_no_self_reference(block, &mut errors);
            s004_no_chained_conditions(block, &graph, &mut errors);
            s005_no_cycles(&graph, &mut errors);
        }
        Err(graph_errors) => errors.extend(graph_errors),
    }
    s006_canonical_groups_agree(block, &mut errors);
    s007_canonical_ids_do_not_shadow(block, &mut errors);
    s008_options_only_on_dropdowns(block, &mut errors);

    errors
}

fn s001_unique_field_ids(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    let mut seen = HashSet::new();
    for field in &block.fields {
        if !seen.insert(field.id.as_str()) {
            errors.push(SchemaError::new(
                "S001",
                format!("Duplicate field id '{}'", field.id),
                Some(field.id.clone()),
            ));
        }
    }
}

fn s003_no_self_reference(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    for field in &block.fields {
        let conditions = [
            (Dependency::Visibility, field.condition.as_ref()),
            (Dependency::Requirement, field.required_condition()),
        ];
        for (kind, condition) in conditions {
            let Some(condition) = condition else {
                continue;
            };
            if condition.referenced_fields().contains(&field.id.as_str()) {
                errors.push(SchemaError::new(
                    "S003",
                    format!("{} on field '{}' references the field itself", kind, field.id),
                    Some(field.id.clone()),
                ));
            }
        }
    }
}

fn s004_no_chained_conditions(
    block: &BlockDefinition,
    graph: &FieldGraph,
    errors: &mut Vec<SchemaError>,
) {
    for field in &block.fields {
        for (dependency, kind) in graph.dependencies(&field.id) {
            if dependency != field.id && graph.is_conditional(dependency) {
                errors.push(SchemaError::new(
                    "S004",
                    format!(
                        "{} on field '{}' depends on '{}', which is itself conditional",
                        kind, field.id, dependency
                    ),
                    Some(field.id.clone()),
                ));
            }
        }
    }
}

fn s005_no_cycles(graph: &FieldGraph, errors: &mut Vec<SchemaError>) {
    let visibility = graph.graph.filter_map(
        |_, id| Some(id.clone()),
        |_, kind| (*kind == Dependency::Visibility).then_some(()),
    );
    if is_cyclic_directed(&visibility) {
        errors.push(SchemaError::new(
            "S005",
            "Field conditions form a cycle",
            None,
        ));
    }
}

fn s006_canonical_groups_agree(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    let mut groups: HashMap<&str, (&str, ValueClass)> = HashMap::new();
    for field in &block.fields {
        let Some(canonical_id) = field.canonical_id.as_deref() else {
            continue;
        };
        let class = field.kind.value_class();
        match groups.get(canonical_id) {
            Some(&(first, first_class)) if first_class != class => {
                errors.push(SchemaError::new(
                    "S006",
                    format!(
                        "Field '{}' ({:?}) and field '{}' ({:?}) share canonical id '{}' \
                         but produce different value types",
                        first, first_class, field.id, class, canonical_id
                    ),
                    Some(field.id.clone()),
                ));
            }
            Some(_) => {}
            None => {
                groups.insert(canonical_id, (&field.id, class));
            }
        }
    }
}

fn s007_canonical_ids_do_not_shadow(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    for field in &block.fields {
        let Some(canonical_id) = field.canonical_id.as_deref() else {
            continue;
        };
        let shadowed = block
            .fields
            .iter()
            .any(|other| other.id == canonical_id && other.canonical_id.as_deref() != Some(canonical_id));
        if shadowed {
            errors.push(SchemaError::new(
                "S007",
                format!(
                    "Canonical id '{}' on field '{}' collides with an unrelated field id",
                    canonical_id, field.id
                ),
                Some(field.id.clone()),
            ));
        }
    }
}

fn s008_options_only_on_dropdowns(block: &BlockDefinition, errors: &mut Vec<SchemaError>) {
    for field in &block.fields {
        let is_dropdown = field.kind == FieldKind::Dropdown;
        if is_dropdown && field.options.is_empty() {
            errors.push(SchemaError::new(
                "S008",
                format!("Dropdown '{}' must declare at least one option", field.id),
                Some(field.id.clone()),
            ));
        } else if !is_dropdown && !field.options.is_empty() {
            errors.push(SchemaError::new(
                "S008",
                format!("Field '{}' declares options but is not a dropdown", field.id),
                Some(field.id.clone()),
            ));
        }
    }
}
