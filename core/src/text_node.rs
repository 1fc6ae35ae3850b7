//! Map-shaped text tokens.
//!
//! XML backends surface `<tag>text</tag>` to `deserialize_any` as a
//! single-entry map keyed `$text` (or `$value`) rather than a bare string.
//! Converters unwrap that shape and route the text through their string
//! grammar; any other map stays a malformed token.

use crate::error::Error;
use serde::de::MapAccess;

pub(crate) const TEXT_KEY: &str = "$text";
pub(crate) const VALUE_KEY: &str = "$value";

/// Extracts the text of a map-shaped text node. `Ok(None)` is an empty map
/// (an empty element); a map with any other key fails as malformed.
pub(crate) fn from_map<'de, A>(
    mut access: A,
    target: &'static str,
) -> Result<Option<String>, A::Error>
where
    A: MapAccess<'de>,
{
    let key = match access.next_key::<String>()? {
        Some(key) => key,
        None => return Ok(None),
    };
    if key != TEXT_KEY && key != VALUE_KEY {
        return Err(Error::MalformedToken(target, "map").into_de());
    }
    let value = access.next_value::<String>()?;
    if access.next_key::<String>()?.is_some() {
        return Err(Error::MalformedToken(target, "map").into_de());
    }
    Ok(Some(value))
}
