//! `#[serde(with = "crud::datetime")]` for `DateTime<Utc>` fields.
//!
//! In MongoDB the value is a BSON Date, so range queries and sorts compare
//! instants. In JSON it is an RFC 3339 string. JSON input may also be a
//! plain `YYYY-MM-DD` date, read as midnight UTC.
//!
//! The driver's raw BSON (de)serializers report `is_human_readable() ==
//! false`; serde_json reports `true`. That flag picks the representation.

use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::{self, Bson};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    if serializer.is_human_readable() {
        value.serialize(serializer)
    } else {
        bson::DateTime::from_millis(value.timestamp_millis()).serialize(serializer)
    }
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    if deserializer.is_human_readable() {
        let text = String::deserialize(deserializer)?;
        return parse(&text).map_err(D::Error::custom);
    }

    // Documents written before dates were stored natively hold strings
    match Bson::deserialize(deserializer)? {
        Bson::DateTime(date) => DateTime::from_timestamp_millis(date.timestamp_millis())
            .ok_or_else(|| D::Error::custom("BSON date out of range")),
        Bson::String(text) => parse(&text).map_err(D::Error::custom),
        other => Err(D::Error::custom(format!(
            "expected a date, got {:?}",
            other.element_type()
        ))),
    }
}

/// RFC 3339 timestamp or `YYYY-MM-DD` (midnight UTC)
pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| format!("invalid date {text:?}, expected YYYY-MM-DD or RFC 3339"))
}

/// Same representation for `Option<DateTime<Utc>>`; pair with `#[serde(default)]`.
pub mod option {
    use super::*;

    struct Stored(DateTime<Utc>);

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

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&Stored(*value)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Ok(Option::<Stored>::deserialize(deserializer)?.map(|stored| stored.0))
    }
}
