//! Tolerant enum decoding between symbolic names, ordinal numbers, and a
//! per-type unknown-value policy.
//!
//! A consuming enum implements [`TolerantEnum`] (usually through the
//! [`tolerant_enum!`](crate::tolerant_enum) macro), fixing its variant table,
//! fallback variant, and policy flags at the impl site. Fields then use the
//! [`Tolerant`] wrapper:
//!
//! ```ignore
//! tolerant_enum! {
//!     Priority { Low = 0, Normal = 1, High = 2 }
//!     fallback = Priority::Normal,
//!     unknown_as_fallback = true,
//! }
//!
//! #[derive(Serialize, Deserialize)]
//! struct Ticket {
//!     priority: Tolerant<Priority>,
//! }
//! ```
//!
//! Only the "no variant matched" condition is ever downgraded to the
//! fallback; malformed tokens and nested decode failures always propagate.

use crate::error::Error;
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::marker::PhantomData;

/// Closed set of named variants with ordinals, a designated fallback, and
/// decode policy flags fixed per implementing type.
pub trait TolerantEnum: Copy + PartialEq + 'static {
    const NAME: &'static str;
    /// (variant name, ordinal, value) for every declared variant.
    const VARIANTS: &'static [(&'static str, i64, Self)];
    /// Variant produced for null, blank, and (policy permitting) unknown input.
    const FALLBACK: Self;
    /// Unrecognized names and ordinals decode to `FALLBACK` instead of failing.
    const UNKNOWN_AS_FALLBACK: bool = false;
    /// Name matching ignores ASCII case.
    const IGNORE_CASE: bool = true;

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(candidate, _, _)| {
                if Self::IGNORE_CASE {
                    candidate.eq_ignore_ascii_case(name)
                } else {
                    *candidate == name
                }
            })
            .map(|(_, _, value)| *value)
    }

    fn from_ordinal(ordinal: i64) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(_, candidate, _)| *candidate == ordinal)
            .map(|(_, _, value)| *value)
    }

    fn name(&self) -> &'static str {
        Self::VARIANTS
            .iter()
            .find(|(_, _, value)| value == self)
            .map(|(name, _, _)| *name)
            .unwrap_or(Self::NAME)
    }

    fn ordinal(&self) -> i64 {
        Self::VARIANTS
            .iter()
            .find(|(_, _, value)| value == self)
            .map(|(_, ordinal, _)| *ordinal)
            .unwrap_or_default()
    }
}

/// Wrapper routing a [`TolerantEnum`] through the tolerant decode grammar.
/// Encoding always writes the canonical variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tolerant<T>(pub T);

impl<T> Tolerant<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Default for Tolerant<T>
where
    T: TolerantEnum,
{
    fn default() -> Self {
        Self(T::FALLBACK)
    }
}

impl<T> From<T> for Tolerant<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Serialize for Tolerant<T>
where
    T: TolerantEnum,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de, T> Deserialize<'de> for Tolerant<T>
where
    T: TolerantEnum,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer
            .deserialize_any(EnumVisitor(PhantomData))
            .map(Tolerant)
    }
}

fn unknown<T, E>(repr: String) -> Result<T, E>
where
    T: TolerantEnum,
    E: serde::de::Error,
{
    if T::UNKNOWN_AS_FALLBACK {
        Ok(T::FALLBACK)
    } else {
        Err(Error::UnknownEnumValue(T::NAME, repr).into_de())
    }
}

struct EnumVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for EnumVisitor<T>
where
    T: TolerantEnum,
{
    type Value = T;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "a {} name or ordinal", T::NAME)
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(T::FALLBACK);
        }
        match T::from_name(trimmed) {
            Some(value) => Ok(value),
            None => unknown(trimmed.to_owned()),
        }
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match T::from_ordinal(value) {
            Some(value) => Ok(value),
            None => unknown(value.to_string()),
        }
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        match i64::try_from(value) {
            Ok(value) => self.visit_i64(value),
            Err(_) => unknown(value.to_string()),
        }
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        if value.is_finite() && value.fract() == 0.0 {
            if let Ok(ordinal) = i64::try_from(value as i128) {
                return self.visit_i64(ordinal);
            }
        }
        // Fractional and out-of-range ordinals match no variant.
        unknown(value.to_string())
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(T::FALLBACK)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(T::FALLBACK)
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
        Err(Error::MalformedToken(T::NAME, "boolean").into_de())
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(Error::MalformedToken(T::NAME, "sequence").into_de())
    }

    fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let text = crate::text_node::from_map(access, T::NAME)?;
        self.visit_str(text.as_deref().unwrap_or(""))
    }
}

/// Declares a [`TolerantEnum`] impl from a variant table.
///
/// Flags are optional and default to `unknown_as_fallback = false`,
/// `ignore_case = true`.
#[macro_export]
macro_rules! tolerant_enum {
    (
        $type:ident {
            $( $variant:ident = $ordinal:expr ),+ $(,)?
        }
        fallback = $fallback:expr
        $(, unknown_as_fallback = $unknown:expr)?
        $(, ignore_case = $case:expr)?
        $(,)?
    ) => {
        impl $crate::enums::TolerantEnum for $type {
            const NAME: &'static str = stringify!($type);
            const VARIANTS: &'static [(&'static str, i64, Self)] = &[
                $( (stringify!($variant), $ordinal, Self::$variant) ),+
            ];
            const FALLBACK: Self = $fallback;
            $( const UNKNOWN_AS_FALLBACK: bool = $unknown; )?
            $( const IGNORE_CASE: bool = $case; )?
        }
    };
}
