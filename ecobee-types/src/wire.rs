//! Decoding helpers for the ecobee wire format.

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default, the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
