//! Tolerant date-only field codec for `#[serde(with = "serde_tolerant::date")]`.
//!
//! Canonical type is [`chrono::NaiveDate`] — a calendar date with no
//! time-of-day or zone. Input must be a string; known formats are tried in
//! order before a general date-time fallback. Encoding always writes
//! `YYYY-MM-DD`.

use crate::error::Error;
use chrono::{DateTime, NaiveDate};
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserializer, Serializer,
};

/// Accepted input formats, matched in order.
const FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y%m%d"];

const OUTPUT_FORMAT: &str = "%Y-%m-%d";

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DateVisitor)
}

pub fn serialize<S>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.format(OUTPUT_FORMAT).to_string())
}

pub(crate) fn parse(value: &str) -> Option<NaiveDate> {
    for format in FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(value, format) {
            return Some(parsed);
        }
    }
    // Fallback for full date-time payloads landing in a date-only field.
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.date_naive())
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = NaiveDate;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a date string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        parse(value.trim())
            .ok_or_else(|| Error::UnparseableValue("date", value.to_owned()).into_de())
    }

    fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("date", "number").into_de())
    }

    fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("date", "number").into_de())
    }

    fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("date", "number").into_de())
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("date", "boolean").into_de())
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(Error::MalformedToken("date", "sequence").into_de())
    }

    fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let text = crate::text_node::from_map(access, "date")?;
        self.visit_str(text.as_deref().unwrap_or(""))
    }
}
