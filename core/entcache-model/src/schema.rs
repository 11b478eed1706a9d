use entcache_types::{EntityKey, EntityRecord};
use serde::{Deserialize, Serialize};

/// Describes one cached entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Payload key of this type (e.g., "Transaction").
    pub entity_type: String,
    #[serde(default)]
    pub merge_strategy: MergeStrategy,
    /// Record field that must repeat the store key. Unchecked when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_field: Option<String>,
}

impl EntitySchema {
    /// Schema with the default (shallow) merge strategy and no identity check.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            merge_strategy: MergeStrategy::default(),
            id_field: None,
        }
    }

    #[must_use]
    pub fn with_merge_strategy(mut self, strategy: MergeStrategy) -> Self {
        self.merge_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = Some(field.into());
        self
    }

    /// Checks that `record` repeats `key` in `id_field`. Always passes when
    /// no identity field is configured.
    pub fn check_identity(&self, key: &EntityKey, record: &EntityRecord) -> Result<(), String> {
        let Some(field) = &self.id_field else {
            return Ok(());
        };
        match record.get(field) {
            None => Err(format!("missing identity field `{field}`")),
            Some(value) if !key.matches_value(value) => {
                Err(format!("identity field `{field}` is {value}, expected `{key}`"))
            }
            Some(_) => Ok(()),
        }
    }
}

/// How an incoming record is combined with the record already stored under
/// the same key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Top-level fields of the incoming record overwrite, fields only in the
    /// stored record are kept.
    #[default]
    Shallow,
    /// The incoming record replaces the stored one.
    Replace,
    /// Like `Shallow`, recursing into nested objects. Arrays and scalars
    /// are replaced.
    Deep,
    /// Delegates to `EntityHandler::merge`. Falls back to `Shallow` when no
    /// handler is attached.
    Custom,
}
