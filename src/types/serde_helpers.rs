//! Custom serde helpers for Kraken's quirky serialization formats.

use serde::{Deserialize, Deserializer};

/// Helper for empty strings that should be deserialized as None.
///
/// Some Kraken fields return `""` instead of null (e.g. a ledger entry's
/// `subtype`).
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use kraken_account_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Entry {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     subtype: Option<String>,
/// }
///
/// let entry: Entry = serde_json::from_str(r#"{"subtype":""}"#).unwrap();
/// assert!(entry.subtype.is_none());
///
/// let entry: Entry = serde_json::from_str(r#"{"subtype":"spottostaking"}"#).unwrap();
/// assert_eq!(entry.subtype.unwrap(), "spottostaking");
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

/// Helper for decimal fields Kraken sends either as a string or as a number.
///
/// Trade volume figures have appeared in both shapes.
///
/// ```rust
/// use serde::Deserialize;
/// use rust_decimal::Decimal;
/// use kraken_account_client::types::serde_helpers::string_or_number_decimal;
///
/// #[derive(Deserialize, Debug)]
/// struct Volume {
///     #[serde(deserialize_with = "string_or_number_decimal::deserialize")]
///     volume: Decimal,
/// }
///
/// let v: Volume = serde_json::from_str(r#"{"volume":"10.5"}"#).unwrap();
/// assert_eq!(v.volume.to_string(), "10.5");
/// let v: Volume = serde_json::from_str(r#"{"volume":10.5}"#).unwrap();
/// assert_eq!(v.volume.to_string(), "10.5");
/// ```
pub mod string_or_number_decimal {
    use super::*;
    use rust_decimal::Decimal;
    use serde::de;
    use serde_json::Value;

    /// Deserialize a decimal from either a JSON string or a JSON number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            other => {
                return Err(de::Error::custom(format!(
                    "expected a decimal string or number, got {other}"
                )));
            }
        };
        text.parse().map_err(de::Error::custom)
    }
}
