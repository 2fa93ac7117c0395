//! Resolution pipeline: visibility → merge → operation → parameters.

use super::merge::merge_canonical;
use super::operation::select_operation;
use super::params::{ResolvedParameters, build_parameters};
use super::visibility::resolve_visibility;
use super::TRACING_TARGET;
use crate::error::ValidationError;
use crate::schema::{BlockDefinition, FieldSpec, OperationMap, RawValues, RuleSet};

/// Resolve raw form values against a block definition.
pub fn resolve(
    block: &BlockDefinition,
    values: &RawValues,
) -> Result<ResolvedParameters, ValidationError> {
    let operation_key = block
        .operation_spec()
        .map(FieldSpec::canonical_key)
        .unwrap_or(block.operation_field.as_str());

    resolve_with(
        &block.fields,
        operation_key,
        &block.operations,
        &block.rules,
        values,
    )
}

/// Resolve from the individual pieces of a block definition.
/// `operation_key` is the canonical key holding the selected operation.
pub fn resolve_with(
    fields: &[FieldSpec],
    operation_key: &str,
    operations: &OperationMap,
    rules: &RuleSet,
    values: &RawValues,
) -> Result<ResolvedParameters, ValidationError> {
    let active = resolve_visibility(fields, values);
    let canonical = merge_canonical(fields, values, &active);

    let current = canonical.get(operation_key).and_then(|v| v.as_str());
    let operation = select_operation(operations, current);

    tracing::debug!(
        target: TRACING_TARGET,
        operation,
        active_fields = active.len(),
        canonical_params = canonical.len(),
        "Resolving parameters"
    );

    build_parameters(&canonical, operation, &rules.for_operation(operation))
}
