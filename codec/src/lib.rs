//! Thin dispatch between the two wire backends the tolerant converters are
//! consumed through. A [`Codec`] is built explicitly and passed to call
//! sites; there is no process-wide instance.

#[cfg(test)]
mod tests;

use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
    XmlDecode(quick_xml::DeError),
    XmlEncode(quick_xml::SeError),
}

impl Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Json(error) => write!(formatter, "json: {}", error),
            Error::XmlDecode(error) => write!(formatter, "xml decode: {}", error),
            Error::XmlEncode(error) => write!(formatter, "xml encode: {}", error),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Json(error) => Some(error),
            Error::XmlDecode(error) => Some(error),
            Error::XmlEncode(error) => Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json(error)
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(error: quick_xml::DeError) -> Self {
        Error::XmlDecode(error)
    }
}

impl From<quick_xml::SeError> for Error {
    fn from(error: quick_xml::SeError) -> Self {
        Error::XmlEncode(error)
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

/// Immutable backend selector. Cheap to copy, safe to share across threads,
/// and holding no caches: encode and decode are pure functions of the input.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Codec {
    format: Format,
}

impl Codec {
    pub fn new(format: Format) -> Self {
        Self { format }
    }

    pub fn json() -> Self {
        Self::new(Format::Json)
    }

    pub fn xml() -> Self {
        Self::new(Format::Xml)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn encode<T>(&self, value: &T) -> Result<String>
    where
        T: Serialize,
    {
        match self.format {
            Format::Json => Ok(serde_json::to_string(value)?),
            Format::Xml => Ok(quick_xml::se::to_string(value)?),
        }
    }

    pub fn encode_pretty<T>(&self, value: &T) -> Result<String>
    where
        T: Serialize,
    {
        match self.format {
            Format::Json => Ok(serde_json::to_string_pretty(value)?),
            Format::Xml => {
                let mut output = String::new();
                let mut serializer = quick_xml::se::Serializer::new(&mut output);
                serializer.indent(' ', 2);
                value.serialize(serializer)?;
                Ok(output)
            }
        }
    }

    pub fn decode<T>(&self, text: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        match self.format {
            Format::Json => Ok(serde_json::from_str(text)?),
            Format::Xml => Ok(quick_xml::de::from_str(text)?),
        }
    }
}
