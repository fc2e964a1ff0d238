//! Field decoders for rows the backend returns straight from SQLite.
//!
//! Boolean columns are stored as `INTEGER` and arrive as `0`/`1`; nullable
//! columns arrive as `null`.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

/// Accept `true`/`false`, any integer (non-zero is true) or `null` (false).
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean, 0/1 or null")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            Ok(value != 0)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            Ok(value != 0)
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// Decode a nullable column, mapping `null` to the type's default.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "flag")]
        enabled: bool,
        #[serde(default, deserialize_with = "or_default")]
        nickname: String,
        #[serde(default, deserialize_with = "or_default")]
        count: u64,
    }

    #[test]
    fn test_flag_accepts_integers_and_booleans() {
        for (json, expected) in [
            (r#"{"enabled": 1}"#, true),
            (r#"{"enabled": 0}"#, false),
            (r#"{"enabled": true}"#, true),
            (r#"{"enabled": null}"#, false),
            (r#"{}"#, false),
        ] {
            let row: Row = serde_json::from_str(json).unwrap();
            assert_eq!(row.enabled, expected, "{}", json);
        }
    }

    #[test]
    fn test_flag_rejects_strings() {
        assert!(serde_json::from_str::<Row>(r#"{"enabled": "yes"}"#).is_err());
    }

    #[test]
    fn test_null_columns_become_defaults() {
        let row: Row = serde_json::from_str(r#"{"nickname": null, "count": null}"#).unwrap();
        assert_eq!(row.nickname, "");
        assert_eq!(row.count, 0);
    }
}
