//! Integration tests for schema validation rules (S001–S015).

#[allow(dead_code)]
mod helpers;

use blockform::schema::*;
use blockform::validate::validate_block;
use blockform::{Block, BlockRegistry, Error};
use helpers::*;

fn codes(block: &BlockDefinition) -> Vec<&'static str> {
    validate_block(block).into_iter().map(|e| e.code).collect()
}

#[test]
fn builtin_blocks_are_valid() {
    let registry = BlockRegistry::builtin().expect("builtin blocks validate");
    for id in registry.ids() {
        let errors = validate_block(registry.get(id).unwrap().definition());
        assert!(errors.is_empty(), "Block '{}' has errors: {:?}", id, errors);
    }
}

#[test]
fn s001_duplicate_field_id() {
    let block = block_with_fields(vec![text("limit"), text("limit")]);
    assert_eq!(codes(&block), vec!["S001"]);
}

#[test]
fn s002_condition_on_unknown_field() {
    let block = block_with_fields(vec![shown_when(text("detail"), "mode", &["advanced"])]);
    let errors = validate_block(&block);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code, "S002");
    assert_eq!(errors[0].field_id.as_deref(), Some("detail"));
}

#[test]
fn s003_condition_on_itself() {
    let block = block_with_fields(vec![shown_when(text("detail"), "detail", &["x"])]);
    let found = codes(&block);
    assert!(found.contains(&"S003"), "Should flag self reference: {:?}", found);
}

#[test]
fn s004_chained_conditions_rejected() {
    let block = definition(include_str!("fixtures/chained_conditions.json"));
    let errors = validate_block(&block);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].code, "S004");
    assert_eq!(errors[0].field_id.as_deref(), Some("detail"));
}

#[test]
fn s005_cyclic_conditions_rejected() {
    let block = definition(include_str!("fixtures/cyclic_conditions.json"));
    let found = codes(&block);
    assert!(found.contains(&"S005"), "Should detect cycle: {:?}", found);
    assert!(found.contains(&"S004"), "Cycle is also a chain: {:?}", found);
}

#[test]
fn s002_required_condition_on_unknown_field() {
    let block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        text("title").with_required(Requirement::When(Condition::new("ghost", ["x"]))),
    ]);
    let errors = validate_block(&block);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].code, "S002");
    assert_eq!(errors[0].field_id.as_deref(), Some("title"));
    assert!(errors[0].message.contains("ghost"));
}

#[test]
fn s003_required_condition_on_itself() {
    let block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        text("title").with_required(Requirement::When(Condition::new("title", ["x"]))),
    ]);
    assert_eq!(codes(&block), vec!["S003"]);
}

#[test]
fn s004_required_condition_on_conditional_field() {
    let block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        shown_when(text("mode"), "operation", &["run"]),
        text("title").with_required(Requirement::When(Condition::new("mode", ["strict"]))),
    ]);
    let errors = validate_block(&block);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].code, "S004");
    assert_eq!(errors[0].field_id.as_deref(), Some("title"));
}

#[test]
fn mutual_required_conditions_are_not_a_cycle() {
    let block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        text("from").with_required(Requirement::When(Condition::new("to", ["x"]))),
        text("to").with_required(Requirement::When(Condition::new("from", ["x"]))),
    ]);
    assert!(codes(&block).is_empty());
}

#[test]
fn and_clause_on_unconditional_field_is_allowed() {
    let detail = text("detail").with_condition(
        Condition::new("operation", ["run"]).and(Condition::new("mode", [true])),
    );
    let block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        FieldSpec::new("mode", FieldKind::Switch),
        detail,
    ]);
    assert!(codes(&block).is_empty());
}

#[test]
fn s006_canonical_group_with_mixed_types() {
    let block = block_with_fields(vec![
        text("contactId").with_canonical_id("contactId"),
        FieldSpec::new("contactToggle", FieldKind::Switch).with_canonical_id("contactId"),
    ]);
    assert_eq!(codes(&block), vec!["S006"]);
}

#[test]
fn dropdown_and_text_share_a_canonical_group() {
    let block = block_with_fields(vec![
        dropdown("channelPicker", &["general", "random"]).with_canonical_id("channel"),
        text("manualChannel").with_canonical_id("channel"),
    ]);
    assert!(codes(&block).is_empty());
}

#[test]
fn s007_canonical_id_shadows_unrelated_field() {
    let mut fields = dual_mode("contactId", "contactPicker", "manualContactId");
    fields.push(text("contactId"));
    let block = block_with_fields(fields);
    let found = codes(&block);
    assert_eq!(found, vec!["S007", "S007"]);
}

#[test]
fn s008_dropdown_needs_options() {
    let block = block_with_fields(vec![
        FieldSpec::new("model", FieldKind::Dropdown),
        text("name").with_options(vec![FieldOption::new("A", "a")]),
    ]);
    assert_eq!(codes(&block), vec!["S008", "S008"]);
}

#[test]
fn s009_to_s013_operation_and_rule_checks() {
    let block = definition(include_str!("fixtures/broken_operations.json"));
    let errors = validate_block(&block);
    let found: Vec<&str> = errors.iter().map(|e| e.code).collect();
    assert_eq!(found, vec!["S009", "S010", "S011", "S012", "S013"], "{:?}", errors);

    let s010 = errors.iter().find(|e| e.code == "S010").unwrap();
    assert!(s010.message.contains("'write'"));
    let s012 = errors.iter().find(|e| e.code == "S012").unwrap();
    assert_eq!(s012.field_id.as_deref(), Some("ghost"));
}

#[test]
fn s015_required_field_without_rule() {
    let block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        text("title").with_required(Requirement::Always(true)),
    ]);
    let errors = validate_block(&block);
    assert_eq!(errors.len(), 1, "{:?}", errors);
    assert_eq!(errors[0].code, "S015");
    assert_eq!(errors[0].field_id.as_deref(), Some("title"));
    assert!(errors[0].message.contains("'test_run'"));
}

#[test]
fn s015_satisfied_by_common_or_operation_rule() {
    let mut block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        text("title").with_required(Requirement::Always(true)),
    ]);
    block.rules.common.push(ParamRule::new("title", Rule::RequiredNonEmpty));
    assert!(codes(&block).is_empty());

    let mut block = block_with_fields(vec![
        dropdown("operation", &["run"]),
        text("title").with_required(Requirement::When(Condition::new("operation", ["run"]))),
    ]);
    assert_eq!(codes(&block), vec!["S015"]);
    block
        .rules
        .operations
        .insert("test_run".into(), vec![ParamRule::new("title", Rule::RequiredNonEmpty)]);
    assert!(codes(&block).is_empty());
}

#[test]
fn s015_checks_the_canonical_key() {
    let mut fields = vec![dropdown("operation", &["run"])];
    fields.extend(
        dual_mode("channel", "channelPicker", "manualChannel")
            .into_iter()
            .map(|f| f.with_required(Requirement::Always(true))),
    );
    let mut block = block_with_fields(fields);
    block.rules.common.push(ParamRule::new("manualChannel", Rule::RequiredNonEmpty));
    assert_eq!(codes(&block), vec!["S015", "S015"]);

    block.rules.common = vec![ParamRule::new("channel", Rule::RequiredNonEmpty)];
    assert!(codes(&block).is_empty());
}

#[test]
fn block_new_rejects_invalid_definition() {
    let json = include_str!("fixtures/cyclic_conditions.json");
    match Block::from_json(json) {
        Err(Error::Schema(errors)) => assert!(!errors.is_empty()),
        other => panic!("Expected schema error, got {:?}", other.map(|b| b.id().to_string())),
    }
}

#[test]
fn s014_duplicate_block_registration() {
    let mut registry = BlockRegistry::new();
    registry.register(messaging_block()).unwrap();
    match registry.register(messaging_block()) {
        Err(Error::Schema(errors)) => assert_eq!(errors[0].code, "S014"),
        other => panic!("Expected duplicate block error, got {:?}", other),
    }
}

#[test]
fn malformed_json_is_a_parse_error() {
    let result = Block::from_json(r#"{ "id": "x", "fields": "nope" }"#);
    assert!(matches!(result, Err(Error::Parse(_))));
}
