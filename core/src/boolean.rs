//! Tolerant boolean field codec for `#[serde(with = "serde_tolerant::boolean")]`.
//!
//! Accepts native booleans, numbers (zero is false, anything else is true)
//! and a closed set of string spellings. Always writes a native boolean.

use crate::error::Error;
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserializer, Serializer,
};

const TRUE_WORDS: &[&str] = &["true", "1", "yes", "y"];
const FALSE_WORDS: &[&str] = &["false", "0", "no", "n"];

pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(BoolVisitor)
}

pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_bool(*value)
}

struct BoolVisitor;

impl<'de> Visitor<'de> for BoolVisitor {
    type Value = bool;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a boolean, a number, or a boolean-like string")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value)
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value != 0)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(value != 0)
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        // False iff approximately zero; NaN is not zero and reads as true.
        Ok(!(value.abs() < f64::EPSILON))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let trimmed = value.trim();
        if TRUE_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
            Ok(true)
        } else if FALSE_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
            Ok(false)
        } else {
            Err(Error::UnparseableValue("bool", value.to_owned()).into_de())
        }
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(Error::MalformedToken("bool", "sequence").into_de())
    }

    fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let text = crate::text_node::from_map(access, "bool")?;
        self.visit_str(text.as_deref().unwrap_or(""))
    }
}
