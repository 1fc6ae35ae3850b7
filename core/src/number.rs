//! Tolerant integer and float field codecs.
//!
//! Each submodule pairs with `#[serde(with = "serde_tolerant::number::int32")]`
//! (or `int64`, `float64`). Native numbers are range-checked into the target
//! width, floats narrow only when they carry no fraction, and strings fall
//! back from an exact integer parse to a float parse with the same narrowing
//! rule, so `"123.0"` decodes where `"123.5"` fails. Encoding always writes a
//! native number token.

use crate::error::Error;
use serde::{
    de::{MapAccess, SeqAccess, Visitor},
    Deserializer, Serializer,
};

macro_rules! impl_int_module {
    ($name:ident, $type:ty, $serialize:ident, $target:literal) => {
        pub mod $name {
            use super::*;

            pub fn deserialize<'de, D>(deserializer: D) -> Result<$type, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(IntVisitor)
            }

            pub fn serialize<S>(value: &$type, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.$serialize(*value)
            }

            fn narrow<E>(value: f64, repr: &str) -> Result<$type, E>
            where
                E: serde::de::Error,
            {
                if !value.is_finite() || value.fract() != 0.0 {
                    return Err(Error::RangeOverflow($target, repr.to_owned()).into_de());
                }
                // Range check through i128; comparing against MAX as f64 would
                // round the bound up past the type's range and saturate.
                <$type>::try_from(value as i128)
                    .map_err(|_| Error::RangeOverflow($target, repr.to_owned()).into_de())
            }

            struct IntVisitor;

            impl<'de> Visitor<'de> for IntVisitor {
                type Value = $type;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str(concat!("a number or numeric string fitting ", $target))
                }

                fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    <$type>::try_from(value).map_err(|_| {
                        Error::RangeOverflow($target, value.to_string()).into_de()
                    })
                }

                fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    <$type>::try_from(value).map_err(|_| {
                        Error::RangeOverflow($target, value.to_string()).into_de()
                    })
                }

                fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    narrow(value, &value.to_string())
                }

                fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    let trimmed = value.trim();
                    if trimmed.is_empty() {
                        return Err(
                            Error::UnparseableValue($target, value.to_owned()).into_de()
                        );
                    }
                    if let Ok(parsed) = trimmed.parse::<$type>() {
                        return Ok(parsed);
                    }
                    match trimmed.parse::<f64>() {
                        Ok(parsed) => narrow(parsed, trimmed),
                        Err(_) => {
                            Err(Error::UnparseableValue($target, value.to_owned()).into_de())
                        }
                    }
                }

                fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    Err(Error::MalformedToken($target, "sequence").into_de())
                }

                fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    let text = crate::text_node::from_map(access, $target)?;
                    self.visit_str(text.as_deref().unwrap_or(""))
                }
            }
        }
    };
}

impl_int_module!(int32, i32, serialize_i32, "i32");
impl_int_module!(int64, i64, serialize_i64, "i64");

pub mod float64 {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(FloatVisitor)
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }

    struct FloatVisitor;

    impl<'de> Visitor<'de> for FloatVisitor {
        type Value = f64;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value as f64)
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(Error::UnparseableValue("f64", value.to_owned()).into_de());
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| Error::UnparseableValue("f64", value.to_owned()).into_de())
        }

        fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            Err(Error::MalformedToken("f64", "sequence").into_de())
        }

        fn visit_map<A>(self, access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let text = crate::text_node::from_map(access, "f64")?;
            self.visit_str(text.as_deref().unwrap_or(""))
        }
    }
}
