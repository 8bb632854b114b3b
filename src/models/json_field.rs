//! Serde adapters for JSON-blob attributes.
//!
//! The provider has no JSON column type, so structured fields are stored as
//! JSON text inside string attributes. Writing encodes to text; reading accepts
//! either the text form or an already-structured value, and treats `null` as
//! empty.

use serde::de::{DeserializeOwned, Error as _};
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

fn decode<T: DeserializeOwned>(raw: Value) -> serde_json::Result<T> {
    match raw {
        Value::String(text) => serde_json::from_str(&text),
        other => serde_json::from_value(other),
    }
}

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    let encoded = serde_json::to_string(value).map_err(S::Error::custom)?;
    serializer.serialize_str(&encoded)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: DeserializeOwned + Default,
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        raw => decode(raw).map_err(D::Error::custom),
    }
}

/// Same encoding for optional blobs; `None` stays a provider `null`.
pub mod option {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => super::serialize(inner, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: DeserializeOwned,
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::String(text) if text.trim().is_empty() => Ok(None),
            raw => decode(raw).map(Some).map_err(D::Error::custom),
        }
    }
}
