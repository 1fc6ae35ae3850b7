//! Tolerant decimal field codec for `#[serde(with = "serde_tolerant::decimal")]`.
//!
//! Canonical type is [`rust_decimal::Decimal`]; binary floating point only
//! ever appears as a last-resort parse intermediate. Encoding writes a native
//! number token through f64, which can shave digits past its precision — the
//! same trade-off as `rust_decimal::serde::float`.

use crate::error::Error;
use rust_decimal::{
    prelude::{FromPrimitive, ToPrimitive},
    Decimal,
};
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserializer, Serializer,
};
use std::str::FromStr;

pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalVisitor)
}

pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.to_f64() {
        Some(value) => serializer.serialize_f64(value),
        None => Err(serde::ser::Error::custom(Error::RangeOverflow(
            "f64",
            value.to_string(),
        ))),
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = Decimal;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a number or numeric string fitting a decimal")
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Decimal::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(Decimal::from(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Decimal::from_f64(value)
            .ok_or_else(|| Error::RangeOverflow("decimal", value.to_string()).into_de())
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::UnparseableValue("decimal", value.to_owned()).into_de());
        }
        if let Ok(parsed) = Decimal::from_str(trimmed) {
            return Ok(parsed);
        }
        Decimal::from_scientific(trimmed)
            .map_err(|_| Error::UnparseableValue("decimal", value.to_owned()).into_de())
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(Error::MalformedToken("decimal", "sequence").into_de())
    }

    fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let text = crate::text_node::from_map(access, "decimal")?;
        self.visit_str(text.as_deref().unwrap_or(""))
    }
}
