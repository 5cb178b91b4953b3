//! Lenient field codecs.
//!
//! The backend is loose about scalar types: amounts arrive as numbers or
//! strings, ids sometimes as strings, flags as `0`/`1`. These codecs read
//! every variant seen and always write the canonical one.

use std::str::FromStr;

use atelier_core::workflow::{DocumentKind, DocumentStatus, normalize_optional};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Unknown fields carried through a read-edit-write cycle.
pub type Extra = serde_json::Map<String, Value>;

fn decimal_from_value(value: &Value) -> Result<Option<Decimal>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(Some)
                .map_err(|e| e.to_string())
        }
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Decimal::from_str(s.trim())
            .map(Some)
            .map_err(|e| format!("invalid amount '{s}': {e}")),
        other => Err(format!("expected amount, got {other}")),
    }
}

fn decimal_to_number(value: Decimal) -> Result<serde_json::Number, String> {
    serde_json::Number::from_str(&value.normalize().to_string()).map_err(|e| e.to_string())
}

/// Decimal amount; missing or null reads as zero, written as a JSON number.
pub mod amount {
    use super::*;

    /// Serialize.
    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        decimal_to_number(*value)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }

    /// Deserialize.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(decimal_from_value(&value)
            .map_err(D::Error::custom)?
            .unwrap_or(Decimal::ZERO))
    }
}

/// Optional decimal amount, written as a JSON number or null.
pub mod opt_amount {
    use super::*;

    /// Serialize.
    pub fn serialize<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => decimal_to_number(*v)
                .map_err(S::Error::custom)?
                .serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value).map_err(D::Error::custom)
    }
}

/// Optional integer id, read from a number or a numeric string.
pub mod opt_id {
    use super::*;

    /// Serialize.
    pub fn serialize<S: Serializer>(value: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    /// Deserialize.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_i64()
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid id {n}"))),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid id '{s}'"))),
            other => Err(D::Error::custom(format!("expected id, got {other}"))),
        }
    }
}

/// Optional non-negative count.
pub mod opt_count {
    use super::*;

    /// Serialize.
    pub fn serialize<S: Serializer>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error> {
        value.serialize(serializer)
    }

    /// Deserialize.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let id = super::opt_id::deserialize(deserializer)?;
        id.map(|n| u32::try_from(n.max(0)).map_err(D::Error::custom))
            .transpose()
    }
}

/// Boolean flag, read from `true`/`false`, `0`/`1` or `"0"`/`"1"`.
pub mod flag {
    use super::*;

    /// Serialize.
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(*value)
    }

    /// Deserialize.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(false),
            Value::Bool(b) => Ok(b),
            Value::Number(n) => Ok(n.as_i64().is_some_and(|v| v != 0)),
            Value::String(s) => Ok(matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "co"
            )),
            other => Err(D::Error::custom(format!("expected flag, got {other}"))),
        }
    }
}

/// Parses a calendar date from `YYYY-MM-DD`, an ISO timestamp, or
/// `DD/MM/YYYY`. Timestamps keep their own calendar day.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .or_else(|| NaiveDate::parse_from_str(raw, "%d/%m/%Y").ok())
}

/// Parses the business-timezone day of a timestamp.
///
/// Offset timestamps are converted into `tz`; naive ones are already
/// local time.
#[must_use]
pub fn parse_day_in(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&tz).date_naive());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(local) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(local.date());
        }
    }
    parse_date(raw)
}

/// Writes `value` into `raw` unless `raw` already parses to it.
pub fn keep_or_write_date(raw: &mut Option<String>, value: Option<NaiveDate>) {
    if raw.as_deref().and_then(parse_date) != value {
        *raw = value.map(|d| d.format("%Y-%m-%d").to_string());
    }
}

/// Writes the status label into `raw` unless `raw` already normalizes to
/// the same status.
pub fn keep_or_write_status(raw: &mut Option<String>, kind: DocumentKind, status: DocumentStatus) {
    if normalize_optional(kind, raw.as_deref()) != status {
        *raw = Some(status.label().to_string());
    }
}

/// Writes `value` into `raw` unless they already agree. Blank reads as
/// absent.
pub fn keep_or_write_text(raw: &mut Option<String>, value: Option<&str>) {
    let current = raw.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let wanted = value.map(str::trim).filter(|s| !s.is_empty());
    if current != wanted {
        *raw = value.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Fields {
        #[serde(with = "amount", default)]
        total: Decimal,
        #[serde(with = "opt_id", default)]
        id: Option<i64>,
        #[serde(with = "flag", default)]
        on: bool,
    }

    #[rstest]
    #[case(r#"{"total":1500000,"id":7,"on":true}"#)]
    #[case(r#"{"total":"1500000","id":"7","on":1}"#)]
    #[case(r#"{"total":"1500000.00","id":" 7 ","on":"1"}"#)]
    fn test_lenient_reads(#[case] body: &str) {
        let fields: Fields = serde_json::from_str(body).unwrap();
        assert_eq!(
            fields,
            Fields {
                total: dec!(1500000),
                id: Some(7),
                on: true
            }
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let fields: Fields = serde_json::from_str("{}").unwrap();
        assert_eq!(fields.total, Decimal::ZERO);
        assert_eq!(fields.id, None);
        assert!(!fields.on);
    }

    #[test]
    fn test_amount_written_as_number() {
        let fields = Fields {
            total: dec!(250000.50),
            id: None,
            on: false,
        };
        assert_eq!(
            serde_json::to_string(&fields).unwrap(),
            r#"{"total":250000.5,"id":null,"on":false}"#
        );
    }

    #[rstest]
    #[case("2026-03-01", Some((2026, 3, 1)))]
    #[case("2026-03-01T17:30:00Z", Some((2026, 3, 1)))]
    #[case("01/03/2026", Some((2026, 3, 1)))]
    #[case("not a date", None)]
    fn test_parse_date(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        let expected = expected.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        assert_eq!(parse_date(raw), expected);
    }

    #[test]
    fn test_parse_day_in_business_timezone() {
        let tz = chrono_tz::Asia::Ho_Chi_Minh;
        // 18:30 UTC is 01:30 the next day in Vietnam.
        assert_eq!(
            parse_day_in("2026-03-01T18:30:00Z", tz),
            NaiveDate::from_ymd_opt(2026, 3, 2)
        );
        assert_eq!(
            parse_day_in("2026-03-01 23:10:00", tz),
            NaiveDate::from_ymd_opt(2026, 3, 1)
        );
    }

    #[test]
    fn test_keep_or_write() {
        let mut raw = Some("2026-03-01T00:00:00Z".to_string());
        keep_or_write_date(&mut raw, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(raw.as_deref(), Some("2026-03-01T00:00:00Z"));
        keep_or_write_date(&mut raw, NaiveDate::from_ymd_opt(2026, 3, 5));
        assert_eq!(raw.as_deref(), Some("2026-03-05"));

        let mut status = Some("chờ duyệt".to_string());
        keep_or_write_status(&mut status, DocumentKind::PurchaseOrder, DocumentStatus::PendingReview);
        assert_eq!(status.as_deref(), Some("chờ duyệt"));
        keep_or_write_status(&mut status, DocumentKind::PurchaseOrder, DocumentStatus::Approved);
        assert_eq!(status.as_deref(), Some("Đã duyệt"));
    }
}
