//! Actions the entity caches react to.
//!
//! Actions keep the wire shape of the front-end store they were lifted
//! from: a `type` discriminator next to the variant's fields, e.g.
//! `{"type": "ROOT_FETCH_GRAPHQL_QUERY_SUCCEEDED", "payload": {...}}`.
//! Any `type` this crate does not know decodes as [`Action::Unrecognized`]
//! instead of failing, because unrelated actions share the same channel.

use crate::{Error, Result, RootPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// An action dispatched to the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    /// The root query was sent.
    #[serde(rename = "ROOT_FETCH_GRAPHQL_QUERY_REQUESTED")]
    FetchRequested,

    /// The root query returned; `payload` holds its normalized entities.
    #[serde(rename = "ROOT_FETCH_GRAPHQL_QUERY_SUCCEEDED")]
    FetchSucceeded { payload: RootPayload },

    /// The root query failed. `error` is whatever the transport reported
    /// (a message, a GraphQL error object, an errors array) and may be null.
    #[serde(rename = "ROOT_FETCH_GRAPHQL_QUERY_FAILED")]
    FetchFailed {
        #[serde(default)]
        error: Value,
    },

    /// Any action type not listed above.
    #[serde(other)]
    Unrecognized,
}

impl Action {
    /// Creates a fetch-succeeded action.
    #[must_use]
    pub fn fetch_succeeded(payload: RootPayload) -> Self {
        Self::FetchSucceeded { payload }
    }

    /// Creates a fetch-failed action.
    #[must_use]
    pub fn fetch_failed(error: impl Into<Value>) -> Self {
        Self::FetchFailed { error: error.into() }
    }

    /// Parses one action from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decodes one action from a JSON value.
    ///
    /// A fetch-succeeded payload is checked by [`RootPayload::try_from_value`],
    /// so shape violations come back as `MalformedPayload`, `MalformedSlice`
    /// or `MalformedRecord` rather than as a serialization error.
    pub fn from_value(mut value: Value) -> Result<Self> {
        let succeeded = value.get("type").and_then(Value::as_str)
            == Some(ActionKind::FetchSucceeded.as_str());
        if !succeeded {
            return Ok(serde_json::from_value(value)?);
        }

        let payload = value
            .as_object_mut()
            .and_then(|fields| fields.remove("payload"))
            .ok_or_else(|| Error::MalformedPayload("fetch-succeeded action has no payload".into()))?;
        Ok(Self::FetchSucceeded {
            payload: RootPayload::try_from_value(payload)?,
        })
    }

    /// Returns the discriminator of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::FetchRequested => ActionKind::FetchRequested,
            Self::FetchSucceeded { .. } => ActionKind::FetchSucceeded,
            Self::FetchFailed { .. } => ActionKind::FetchFailed,
            Self::Unrecognized => ActionKind::Unrecognized,
        }
    }

    /// Returns the payload if this is a fetch-succeeded action.
    pub fn payload(&self) -> Option<&RootPayload> {
        match self {
            Self::FetchSucceeded { payload } => Some(payload),
            _ => None,
        }
    }
}

/// Payload-free discriminator of an [`Action`], used for logging and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    FetchRequested,
    FetchSucceeded,
    FetchFailed,
    Unrecognized,
}

impl ActionKind {
    /// The wire name of this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchRequested => "ROOT_FETCH_GRAPHQL_QUERY_REQUESTED",
            Self::FetchSucceeded => "ROOT_FETCH_GRAPHQL_QUERY_SUCCEEDED",
            Self::FetchFailed => "ROOT_FETCH_GRAPHQL_QUERY_FAILED",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
