use entcache_model::{EntityStore, shallow_merge};
use entcache_types::{EntityKey, EntityRecord, StoreSlice};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn record(value: serde_json::Value) -> EntityRecord {
    EntityRecord::try_from_value(value).unwrap()
}

fn slice(value: serde_json::Value) -> StoreSlice {
    let serde_json::Value::Object(map) = value else {
        panic!("slice must be an object");
    };
    map.into_iter()
        .map(|(k, v)| (EntityKey::from(k), record(v)))
        .collect()
}

// ── Merge ────────────────────────────────────────────────────────

#[test]
fn merge_slice_overwrites_and_preserves_fields() {
    let store = EntityStore::from_slice(slice(json!({"1": {"amount": 10, "note": "x"}})));
    let next = store
        .merge_slice(&slice(json!({"1": {"amount": 20}})), shallow_merge)
        .unwrap();
    assert_eq!(next.to_value(), json!({"1": {"amount": 20, "note": "x"}}));
}

#[test]
fn merge_slice_inserts_new_keys() {
    let store = EntityStore::new();
    let next = store
        .merge_slice(&slice(json!({"7": {"amount": 5}})), shallow_merge)
        .unwrap();
    assert_eq!(next.to_value(), json!({"7": {"amount": 5}}));
}

#[test]
fn merge_slice_leaves_other_keys_untouched() {
    let store = EntityStore::from_slice(slice(json!({"1": {"a": 1}, "2": {"b": 2}})));
    let next = store.merge_slice(&slice(json!({"2": {"b": 3}})), shallow_merge).unwrap();

    assert_eq!(next.get("1"), store.get("1"));
    assert!(Arc::ptr_eq(next.get_shared("1").unwrap(), store.get_shared("1").unwrap()));
    assert_eq!(next.get("2").unwrap().get_number("/b"), Some(3.0));
}

#[test]
fn merge_slice_reports_no_change() {
    let store = EntityStore::from_slice(slice(json!({"1": {"amount": 10, "note": "x"}})));
    assert!(store.merge_slice(&StoreSlice::new(), shallow_merge).is_none());
    assert!(store.merge_slice(&slice(json!({"1": {"amount": 10}})), shallow_merge).is_none());
}

#[test]
fn merge_slice_does_not_mutate_source() {
    let store = EntityStore::from_slice(slice(json!({"1": {"amount": 10}})));
    let before = store.clone();
    let _ = store.merge_slice(&slice(json!({"1": {"amount": 11}, "2": {}})), shallow_merge);
    assert_eq!(store, before);
}

// ── Accessors ────────────────────────────────────────────────────

#[test]
fn lookups_accept_str_and_key() {
    let store = EntityStore::from_slice(slice(json!({"42": {"amount": 1}})));
    assert!(store.contains_key("42"));
    assert!(store.contains_key(&EntityKey::from(42u64)));
    assert_eq!(store.len(), 1);
    assert!(!store.is_empty());
    assert_eq!(store.keys().cloned().collect::<Vec<_>>(), vec![EntityKey::from("42")]);
}

#[test]
fn iter_walks_records_in_key_order() {
    let store = EntityStore::from_slice(slice(json!({"b": {"n": 2}, "a": {"n": 1}})));
    let seen: Vec<_> = store
        .iter()
        .map(|(k, r)| (k.as_str().to_string(), r.get_number("/n")))
        .collect();
    assert_eq!(seen, vec![("a".to_string(), Some(1.0)), ("b".to_string(), Some(2.0))]);
}

#[test]
fn serializes_as_plain_mapping() {
    let store = EntityStore::from_slice(slice(json!({"1": {"amount": 10}, "2": {"amount": 20}})));
    assert_eq!(serde_json::to_value(&store).unwrap(), store.to_value());
    let parsed: EntityStore = serde_json::from_value(store.to_value()).unwrap();
    assert_eq!(parsed, store);
}

// ── Properties ───────────────────────────────────────────────────

fn slice_strategy() -> impl Strategy<Value = StoreSlice> {
    prop::collection::btree_map(
        "[0-9]{1,2}",
        prop::collection::btree_map("[a-c]", 0i64..5, 0..3),
        0..6,
    )
    .prop_map(|records| {
        records
            .into_iter()
            .map(|(k, fields)| {
                let map = fields.into_iter().map(|(f, v)| (f, json!(v))).collect();
                (EntityKey::from(k), EntityRecord::from_map(map))
            })
            .collect()
    })
}

proptest! {
    /// Merging the same slice twice is the same as merging it once.
    #[test]
    fn merge_is_idempotent(base in slice_strategy(), incoming in slice_strategy()) {
        let store = EntityStore::from_slice(base);
        let once = store.merge_slice(&incoming, shallow_merge).unwrap_or_else(|| store.clone());
        prop_assert!(once.merge_slice(&incoming, shallow_merge).is_none());
    }

    /// Every incoming key is present afterwards, every old key survives.
    #[test]
    fn merge_keeps_all_keys(base in slice_strategy(), incoming in slice_strategy()) {
        let store = EntityStore::from_slice(base.clone());
        let next = store.merge_slice(&incoming, shallow_merge).unwrap_or_else(|| store.clone());
        for key in base.keys().chain(incoming.keys()) {
            prop_assert!(next.contains_key(key));
        }
        prop_assert_eq!(store, EntityStore::from_slice(base));
    }
}
