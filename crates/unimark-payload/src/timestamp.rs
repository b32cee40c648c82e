//! Timestamp acceptance and normalization.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::PayloadError;

/// Accepts a `timestamp` field in any of the forms the data model allows
/// (integer epoch seconds, float epoch seconds, or an ISO-8601 string) and
/// normalizes it to a canonical ISO-8601 UTC string with second precision
/// and a `Z` suffix.
pub fn normalize_timestamp(value: &Value) -> Result<String, PayloadError> {
    let dt = match value {
        Value::Number(n) => {
            let secs = n
                .as_f64()
                .ok_or_else(|| PayloadError::InvalidTimestamp(n.to_string()))?;
            DateTime::<Utc>::from_timestamp(secs.trunc() as i64, 0)
                .ok_or_else(|| PayloadError::InvalidTimestamp(n.to_string()))?
        }
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| PayloadError::InvalidTimestamp(s.clone()))?,
        other => return Err(PayloadError::InvalidTimestamp(other.to_string())),
    };
    Ok(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_epoch_normalizes_to_second_precision_iso8601() {
        let got = normalize_timestamp(&json!(1714832824)).unwrap();
        assert_eq!(got, "2024-05-04T14:27:04Z");
    }

    #[test]
    fn float_epoch_truncates_fractional_seconds() {
        let got = normalize_timestamp(&json!(1714832824.999)).unwrap();
        assert_eq!(got, "2024-05-04T14:27:04Z");
    }

    #[test]
    fn iso8601_string_input_is_preserved_in_canonical_form() {
        let got = normalize_timestamp(&json!("2024-05-04T14:27:04Z")).unwrap();
        assert_eq!(got, "2024-05-04T14:27:04Z");
    }

    #[test]
    fn iso8601_string_with_offset_is_normalized_to_utc() {
        let got = normalize_timestamp(&json!("2024-05-04T16:27:04+02:00")).unwrap();
        assert_eq!(got, "2024-05-04T14:27:04Z");
    }

    #[test]
    fn garbage_string_is_rejected() {
        assert!(normalize_timestamp(&json!("not a timestamp")).is_err());
    }

    #[test]
    fn non_scalar_value_is_rejected() {
        assert!(normalize_timestamp(&json!({"nested": true})).is_err());
    }
}
