use entcache_model::{EntitySchema, MergeStrategy};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn new_uses_defaults() {
    let schema = EntitySchema::new("Transaction");
    assert_eq!(schema.entity_type, "Transaction");
    assert_eq!(schema.merge_strategy, MergeStrategy::Shallow);
    assert_eq!(schema.id_field, None);
}

#[test]
fn builders_set_fields() {
    let schema = EntitySchema::new("CardTransaction")
        .with_merge_strategy(MergeStrategy::Deep)
        .with_id_field("id");
    assert_eq!(schema.merge_strategy, MergeStrategy::Deep);
    assert_eq!(schema.id_field.as_deref(), Some("id"));
}

#[test]
fn deserializes_with_defaults() {
    let schema: EntitySchema = serde_json::from_value(json!({"entity_type": "Transaction"})).unwrap();
    assert_eq!(schema, EntitySchema::new("Transaction"));
}

#[test]
fn merge_strategy_is_snake_case() {
    for (strategy, name) in [
        (MergeStrategy::Shallow, "shallow"),
        (MergeStrategy::Replace, "replace"),
        (MergeStrategy::Deep, "deep"),
        (MergeStrategy::Custom, "custom"),
    ] {
        assert_eq!(serde_json::to_value(strategy).unwrap(), json!(name));
        let parsed: MergeStrategy = serde_json::from_value(json!(name)).unwrap();
        assert_eq!(parsed, strategy);
    }
}

#[test]
fn unknown_merge_strategy_is_rejected() {
    let result: Result<EntitySchema, _> =
        serde_json::from_value(json!({"entity_type": "T", "merge_strategy": "lww"}));
    assert!(result.is_err());
}

#[test]
fn id_field_is_omitted_when_unset() {
    let value = serde_json::to_value(EntitySchema::new("Transaction")).unwrap();
    assert_eq!(value, json!({"entity_type": "Transaction", "merge_strategy": "shallow"}));
}

// ── Identity check ───────────────────────────────────────────────

fn record(value: serde_json::Value) -> entcache_types::EntityRecord {
    entcache_types::EntityRecord::try_from_value(value).unwrap()
}

#[test]
fn identity_check_passes_without_id_field() {
    let schema = EntitySchema::new("Transaction");
    assert!(schema.check_identity(&"1".into(), &record(json!({}))).is_ok());
}

#[test]
fn identity_check_compares_against_key() {
    let schema = EntitySchema::new("Transaction").with_id_field("id");
    assert!(schema.check_identity(&"1".into(), &record(json!({"id": 1}))).is_ok());
    assert!(schema.check_identity(&"a".into(), &record(json!({"id": "a"}))).is_ok());

    let missing = schema.check_identity(&"1".into(), &record(json!({"amount": 1}))).unwrap_err();
    assert!(missing.contains("missing identity field `id`"));

    let mismatch = schema.check_identity(&"1".into(), &record(json!({"id": 2}))).unwrap_err();
    assert!(mismatch.contains("expected `1`"));
}
