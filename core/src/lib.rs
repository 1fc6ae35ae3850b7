pub mod blank_string;
pub mod boolean;
pub mod date;
pub mod datetime;
pub mod decimal;
pub mod enums;
pub mod error;
pub mod number;
pub mod one_or_many;
pub mod string_or;
mod text_node;


pub use crate::{
    datetime::EPOCH_MILLIS_THRESHOLD,
    enums::{Tolerant, TolerantEnum},
    error::Error,
    one_or_many::OneOrMany,
    string_or::StringOr,
};
