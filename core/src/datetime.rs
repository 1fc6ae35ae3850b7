//! Tolerant date-time field codec for `#[serde(with = "serde_tolerant::datetime")]`.
//!
//! Canonical type is [`chrono::DateTime<Utc>`] — an absolute instant, always
//! written back as an RFC 3339 string in UTC. Input may be a Unix epoch
//! number, an all-digits epoch string, or one of an ordered list of known
//! date-time formats (assumed UTC when no offset is present).

use crate::error::Error;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserializer, Serializer,
};

/// Epoch values at or above this are treated as milliseconds, everything
/// below (negative values included) as seconds. Instants past the year 33658
/// exceed the threshold in seconds and decode as milliseconds; pre-1970
/// instants needing millisecond precision must use a string format instead.
pub const EPOCH_MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// Offset-free formats assumed to be UTC, matched in order.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Formats carrying their own offset, matched after the naive list.
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z"];

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DateTimeVisitor)
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

pub(crate) fn from_epoch(value: i64) -> Option<DateTime<Utc>> {
    if value >= EPOCH_MILLIS_THRESHOLD {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn is_epoch_string(value: &str) -> bool {
    let digits = value
        .strip_prefix(['+', '-'])
        .unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn parse(value: &str) -> Option<DateTime<Utc>> {
    if is_epoch_string(value) {
        return from_epoch(value.parse::<i64>().ok()?);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Some(parsed.and_utc());
        }
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(value, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}

struct DateTimeVisitor;

impl<'de> Visitor<'de> for DateTimeVisitor {
    type Value = DateTime<Utc>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a date-time string or Unix epoch number")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        from_epoch(value)
            .ok_or_else(|| Error::RangeOverflow("date-time", value.to_string()).into_de())
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let value = i64::try_from(value)
            .map_err(|_| Error::RangeOverflow("date-time", value.to_string()).into_de())?;
        self.visit_i64(value)
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        // Sub-epoch-unit fractions are dropped before the unit heuristic.
        if !value.is_finite() || value < i64::MIN as f64 || value > i64::MAX as f64 {
            return Err(Error::RangeOverflow("date-time", value.to_string()).into_de());
        }
        self.visit_i64(value.trunc() as i64)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        parse(value.trim())
            .ok_or_else(|| Error::UnparseableValue("date-time", value.to_owned()).into_de())
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("date-time", "boolean").into_de())
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(Error::MalformedToken("date-time", "sequence").into_de())
    }

    fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let text = crate::text_node::from_map(access, "date-time")?;
        self.visit_str(text.as_deref().unwrap_or(""))
    }
}
