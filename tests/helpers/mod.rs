use blockform::schema::*;
use blockform::{Block, BlockRegistry};
use serde_json::Value;

// =============================================================================
// Raw values
// =============================================================================

/// Build a `RawValues` snapshot from a `json!({...})` object.
pub fn values(json: Value) -> RawValues {
    serde_json::from_value(json).expect("values must be a JSON object")
}

// =============================================================================
// Blocks
// =============================================================================

pub fn builtin(id: &str) -> Block {
    BlockRegistry::builtin()
        .expect("builtin blocks are valid")
        .get(id)
        .unwrap_or_else(|| panic!("no builtin block '{}'", id))
        .clone()
}

/// Messaging block with operation keys `send_message` / `list_messages`.
pub fn messaging_block() -> Block {
    Block::from_json(include_str!("../fixtures/messaging_block.json")).expect("fixture is valid")
}

pub fn definition(json: &str) -> BlockDefinition {
    blockform::schema::parse(json).expect("fixture parses")
}

// =============================================================================
// Field builders
// =============================================================================

pub fn text(id: &str) -> FieldSpec {
    FieldSpec::new(id, FieldKind::ShortText)
}

pub fn dropdown(id: &str, values: &[&str]) -> FieldSpec {
    FieldSpec::new(id, FieldKind::Dropdown).with_options(
        values
            .iter()
            .map(|v| FieldOption::new(v.to_string(), v.to_string()))
            .collect(),
    )
}

pub fn shown_when(field: FieldSpec, on: &str, values: &[&str]) -> FieldSpec {
    field.with_condition(Condition::new(on, values.iter().copied()))
}

/// Picker + manual entry pair sharing one canonical id.
pub fn dual_mode(canonical: &str, picker: &str, manual: &str) -> Vec<FieldSpec> {
    vec![
        text(picker).with_canonical_id(canonical),
        text(manual).with_canonical_id(canonical),
    ]
}

/// Minimal valid block around the given fields and a single operation.
pub fn block_with_fields(fields: Vec<FieldSpec>) -> BlockDefinition {
    BlockDefinition {
        id: "test-block".into(),
        name: "Test Block".into(),
        description: None,
        operation_field: DEFAULT_OPERATION_FIELD.into(),
        fields,
        operations: OperationMap::new("run", [("run".to_string(), "test_run".to_string())]),
        rules: RuleSet::default(),
    }
}
