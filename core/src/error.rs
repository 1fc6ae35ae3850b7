use std::fmt::Display;

pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a tolerant conversion rejects a wire value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Message(String),
    /// (target type, token kind seen)
    MalformedToken(&'static str, &'static str),
    /// (target type, rejected text)
    UnparseableValue(&'static str, String),
    /// (target type, out-of-range representation)
    RangeOverflow(&'static str, String),
    /// (enum type, rejected name or ordinal)
    UnknownEnumValue(&'static str, String),
}

impl Error {
    /// Surfaces the taxonomy through a foreign format's error type.
    pub(crate) fn into_de<E>(self) -> E
    where
        E: serde::de::Error,
    {
        E::custom(self)
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Message(msg) => formatter.write_str(msg),
            Error::MalformedToken(target, kind) => {
                write!(formatter, "{} cannot decode from {} token", target, kind)
            }
            Error::UnparseableValue(target, repr) => {
                write!(formatter, "cannot parse {:?} as {}", repr, target)
            }
            Error::RangeOverflow(target, repr) => {
                write!(formatter, "value {:?} does not fit {}", repr, target)
            }
            Error::UnknownEnumValue(name, repr) => {
                write!(formatter, "unknown {} value: {:?}", name, repr)
            }
        }
    }
}

impl std::error::Error for Error {}
