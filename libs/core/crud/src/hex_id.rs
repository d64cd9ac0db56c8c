//! `#[serde(with = "crud::hex_id")]` for ObjectId fields kept as hex strings.
//!
//! Entities carry ids as `String` so handlers and JSON stay plain. In MongoDB
//! the value is a real ObjectId, which keeps `_id` and reference fields
//! joinable with documents written by other clients.

use mongodb::bson::{Bson, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

pub fn serialize<S: Serializer>(value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        return serializer.serialize_str(value);
    }
    match ObjectId::parse_str(value) {
        Ok(id) => id.serialize(serializer),
        Err(_) => serializer.serialize_str(value),
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    if deserializer.is_human_readable() {
        return String::deserialize(deserializer);
    }
    match Bson::deserialize(deserializer)? {
        Bson::ObjectId(id) => Ok(id.to_hex()),
        Bson::String(hex) => Ok(hex),
        other => Err(D::Error::custom(format!(
            "expected an ObjectId, got {:?}",
            other.element_type()
        ))),
    }
}

/// Query value for a hex id: an ObjectId, or the raw string if it does not parse
pub fn to_bson(value: &str) -> Bson {
    ObjectId::parse_str(value).map_or_else(|_| Bson::String(value.to_string()), Bson::ObjectId)
}

/// Same representation for `Option<String>`; pair with `#[serde(default)]`.
pub mod option {
    use super::*;

    struct Stored(String);

    impl Serialize for Stored {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            super::serialize(&self.0, serializer)
        }
    }

    impl<'de> Deserialize<'de> for Stored {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            super::deserialize(deserializer).map(Stored)
        }
    }

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&Stored(value.clone())),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(Option::<Stored>::deserialize(deserializer)?.map(|stored| stored.0))
    }
}
