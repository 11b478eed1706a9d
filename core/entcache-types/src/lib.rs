//! Core type definitions for the normalized entity cache.
//!
//! This crate defines the wire-level types every other crate builds on:
//! - [`EntityKey`] and [`EntityRecord`], one entity and its identifier
//! - [`RootPayload`], the type-keyed bundle of records delivered by one fetch
//! - [`Action`], the closed set of actions the caches react to
//!
//! Shape checking happens here, when a payload is built or deserialized, so
//! that a malformed slice can never reach a store.

mod action;
mod ids;
mod payload;
mod record;

pub use action::{Action, ActionKind};
pub use ids::EntityKey;
pub use payload::{RootPayload, StoreSlice};
pub use record::EntityRecord;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding actions and payloads.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("malformed slice for entity type `{entity_type}`: {reason}")]
    MalformedSlice { entity_type: String, reason: String },

    #[error("malformed record `{key}` of entity type `{entity_type}`: {reason}")]
    MalformedRecord {
        entity_type: String,
        key: String,
        reason: String,
    },
}
