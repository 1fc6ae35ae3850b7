//! Canonical union for "string literal or nested object" wire shapes.
//!
//! Exactly one side is ever populated. Null decodes to [`StringOr::Text`]
//! holding an absent string — the historical wire behavior, kept for
//! compatibility instead of a separate empty tag — and `Text(None)` encodes
//! back to null.

use crate::error::Error;
use serde::{
    de::{
        value::MapAccessDeserializer, DeserializeSeed, IntoDeserializer, MapAccess, SeqAccess,
        Visitor,
    },
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StringOr<T> {
    Text(Option<String>),
    Structured(T),
}

impl<T> StringOr<T> {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(Some(value.into()))
    }

    pub fn structured(value: T) -> Self {
        Self::Structured(value)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(Some(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_structured(&self) -> Option<&T> {
        match self {
            Self::Structured(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_structured(self) -> Option<T> {
        match self {
            Self::Structured(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for StringOr<T> {
    fn default() -> Self {
        Self::Text(None)
    }
}

impl<T> From<String> for StringOr<T> {
    fn from(value: String) -> Self {
        Self::Text(Some(value))
    }
}

impl<T> From<&str> for StringOr<T> {
    fn from(value: &str) -> Self {
        Self::Text(Some(value.to_owned()))
    }
}

impl<T> Serialize for StringOr<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Text(Some(value)) => serializer.serialize_str(value),
            Self::Text(None) => serializer.serialize_none(),
            Self::Structured(value) => value.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for StringOr<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StringOrVisitor(PhantomData))
    }
}

struct StringOrVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for StringOrVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = StringOr<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a string, an object, or null")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(StringOr::Text(Some(value.to_owned())))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(StringOr::Text(Some(value)))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        // A map keyed `$text` (or `$value`) is an XML text node, not an
        // object; any other first key replays into the structured decode.
        let first = match access.next_key::<String>()? {
            Some(key) => key,
            None => {
                return T::deserialize(MapAccessDeserializer::new(access))
                    .map(StringOr::Structured)
            }
        };
        if first == crate::text_node::TEXT_KEY || first == crate::text_node::VALUE_KEY {
            let text = access.next_value::<String>()?;
            if access.next_key::<String>()?.is_some() {
                return Err(Error::MalformedToken("string-or-structured", "map").into_de());
            }
            return Ok(StringOr::Text(Some(text)));
        }
        let replay = ReplayAccess {
            first: Some(first),
            rest: access,
        };
        T::deserialize(MapAccessDeserializer::new(replay)).map(StringOr::Structured)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(StringOr::Text(None))
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(StringOr::Text(None))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E>(self, _: bool) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("string-or-structured", "boolean").into_de())
    }

    fn visit_i64<E>(self, _: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("string-or-structured", "number").into_de())
    }

    fn visit_u64<E>(self, _: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("string-or-structured", "number").into_de())
    }

    fn visit_f64<E>(self, _: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Err(Error::MalformedToken("string-or-structured", "number").into_de())
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(Error::MalformedToken("string-or-structured", "sequence").into_de())
    }
}

/// Map access re-yielding an already-consumed first key before delegating
/// to the underlying entries.
struct ReplayAccess<A> {
    first: Option<String>,
    rest: A,
}

impl<'de, A> MapAccess<'de> for ReplayAccess<A>
where
    A: MapAccess<'de>,
{
    type Error = A::Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>, Self::Error>
    where
        K: DeserializeSeed<'de>,
    {
        match self.first.take() {
            Some(key) => seed.deserialize(key.into_deserializer()).map(Some),
            None => self.rest.next_key_seed(seed),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value, Self::Error>
    where
        V: DeserializeSeed<'de>,
    {
        self.rest.next_value_seed(seed)
    }
}
