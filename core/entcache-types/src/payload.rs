//! Type-keyed payloads delivered by one fetch.
//!
//! The wire shape is `type name -> identifier -> record`. Deserialization
//! goes through [`RootPayload::try_from_value`] so that every shape
//! violation is reported with the entity type (and key) it occurred in.

use crate::{EntityKey, EntityRecord, Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The records of one entity type carried by a payload.
pub type StoreSlice = BTreeMap<EntityKey, EntityRecord>;

/// Record updates for any number of entity types.
///
/// A type that is absent means "no update for that type"; a type that is
/// present with an empty slice means "update issued, no records".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RootPayload(BTreeMap<String, StoreSlice>);

impl RootPayload {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds (or replaces) the slice for one entity type.
    #[must_use]
    pub fn with_slice(mut self, entity_type: impl Into<String>, slice: StoreSlice) -> Self {
        self.0.insert(entity_type.into(), slice);
        self
    }

    /// Adds one record, creating the type's slice if needed.
    #[must_use]
    pub fn with_record(
        mut self,
        entity_type: impl Into<String>,
        key: impl Into<EntityKey>,
        record: EntityRecord,
    ) -> Self {
        self.0
            .entry(entity_type.into())
            .or_default()
            .insert(key.into(), record);
        self
    }

    /// Returns the slice for `entity_type`, if the payload carries one.
    pub fn slice(&self, entity_type: &str) -> Option<&StoreSlice> {
        self.0.get(entity_type)
    }

    /// Names of the entity types present in this payload.
    pub fn entity_types(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Total number of records across all slices.
    pub fn record_count(&self) -> usize {
        self.0.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Validates and converts a raw JSON value into a payload.
    ///
    /// The top level must be an object of objects of objects. The first
    /// violation found aborts the conversion; nothing is partially accepted.
    pub fn try_from_value(value: Value) -> Result<Self> {
        let types = match value {
            Value::Object(types) => types,
            other => {
                return Err(Error::MalformedPayload(format!(
                    "expected an object keyed by entity type, got {}",
                    kind_of(&other)
                )));
            }
        };

        let mut out = BTreeMap::new();
        for (entity_type, slice) in types {
            let records = match slice {
                Value::Object(records) => records,
                other => {
                    return Err(Error::MalformedSlice {
                        reason: format!("expected an object keyed by identifier, got {}", kind_of(&other)),
                        entity_type,
                    });
                }
            };

            let mut parsed = StoreSlice::new();
            for (key, record) in records {
                match EntityRecord::try_from_value(record) {
                    Ok(record) => {
                        parsed.insert(EntityKey::from(key), record);
                    }
                    Err(other) => {
                        return Err(Error::MalformedRecord {
                            entity_type,
                            reason: format!("expected an object, got {}", kind_of(&other)),
                            key,
                        });
                    }
                }
            }
            out.insert(entity_type, parsed);
        }
        Ok(Self(out))
    }

    /// Parses a payload from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::try_from_value(value)
    }
}

impl<'de> Deserialize<'de> for RootPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from_value(value).map_err(serde::de::Error::custom)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
