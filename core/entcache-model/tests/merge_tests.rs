use entcache_model::{EntityHandler, MergeStrategy, deep_merge, shallow_merge};
use entcache_types::{EntityKey, EntityRecord};
use pretty_assertions::assert_eq;
use serde_json::json;

fn record(value: serde_json::Value) -> EntityRecord {
    EntityRecord::try_from_value(value).unwrap()
}

// ── Shallow ──────────────────────────────────────────────────────

#[test]
fn shallow_overwrites_and_preserves() {
    let old = record(json!({"amount": 10, "note": "x"}));
    let new = record(json!({"amount": 20}));
    assert_eq!(shallow_merge(&old, &new), record(json!({"amount": 20, "note": "x"})));
}

#[test]
fn shallow_replaces_nested_objects_whole() {
    let old = record(json!({"merchant": {"name": "Cafe", "city": "Auckland"}}));
    let new = record(json!({"merchant": {"name": "Bar"}}));
    assert_eq!(shallow_merge(&old, &new), record(json!({"merchant": {"name": "Bar"}})));
}

#[test]
fn shallow_does_not_touch_inputs() {
    let old = record(json!({"amount": 10}));
    let new = record(json!({"note": "y"}));
    let _ = shallow_merge(&old, &new);
    assert_eq!(old, record(json!({"amount": 10})));
    assert_eq!(new, record(json!({"note": "y"})));
}

#[test]
fn explicit_null_overwrites() {
    let old = record(json!({"note": "x"}));
    let new = record(json!({"note": null}));
    assert_eq!(shallow_merge(&old, &new), record(json!({"note": null})));
}

// ── Deep ─────────────────────────────────────────────────────────

#[test]
fn deep_merges_nested_objects() {
    let old = record(json!({"merchant": {"name": "Cafe", "city": "Auckland"}, "amount": 1}));
    let new = record(json!({"merchant": {"name": "Bar"}}));
    assert_eq!(
        deep_merge(&old, &new),
        record(json!({"merchant": {"name": "Bar", "city": "Auckland"}, "amount": 1}))
    );
}

#[test]
fn deep_replaces_arrays_and_type_changes() {
    let old = record(json!({"tags": ["a", "b"], "meta": {"x": 1}}));
    let new = record(json!({"tags": ["c"], "meta": 5}));
    assert_eq!(deep_merge(&old, &new), record(json!({"tags": ["c"], "meta": 5})));
}

// ── Strategy dispatch ────────────────────────────────────────────

struct KeepHigherAmount;
impl EntityHandler for KeepHigherAmount {
    fn merge(&self, existing: &EntityRecord, incoming: &EntityRecord) -> EntityRecord {
        let old = existing.get_number("/amount").unwrap_or(f64::MIN);
        let new = incoming.get_number("/amount").unwrap_or(f64::MIN);
        if new >= old { incoming.clone() } else { existing.clone() }
    }
}

#[test]
fn replace_discards_old_fields() {
    let old = record(json!({"amount": 10, "note": "x"}));
    let new = record(json!({"amount": 20}));
    assert_eq!(MergeStrategy::Replace.merge(&old, &new, None), new);
}

#[test]
fn custom_uses_handler() {
    let old = record(json!({"amount": 30}));
    let new = record(json!({"amount": 20}));
    let handler = KeepHigherAmount;
    assert_eq!(MergeStrategy::Custom.merge(&old, &new, Some(&handler)), old);
}

#[test]
fn custom_without_handler_is_shallow() {
    let old = record(json!({"amount": 10, "note": "x"}));
    let new = record(json!({"amount": 20}));
    assert_eq!(
        MergeStrategy::Custom.merge(&old, &new, None),
        record(json!({"amount": 20, "note": "x"}))
    );
}

#[test]
fn default_handler_validates_everything_and_merges_shallow() {
    struct Plain;
    impl EntityHandler for Plain {}

    let old = record(json!({"amount": 10, "note": "x"}));
    let new = record(json!({"amount": 20}));
    assert!(Plain.validate(&EntityKey::from("1"), &new).is_ok());
    assert_eq!(Plain.merge(&old, &new), record(json!({"amount": 20, "note": "x"})));
}
