//! Canonical encodings for the well-known value types.
//!
//! - Duration: `HH:MM:SS[.fffffffff]`, hours unbounded, fraction only when nonzero
//! - Timestamp: native instant for stores, RFC 3339 text for JSON
//! - Struct: compact JSON object with sorted keys

use crate::duration::{Duration, NANOS_PER_HOUR, NANOS_PER_MINUTE, NANOS_PER_SECOND};
use crate::error::{Result, WktError};
use crate::structure::{StructValue, MAX_NESTING_DEPTH};
use crate::timestamp::Timestamp;
use crate::values::ExternalValue;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};

/// Encode a duration as `HH:MM:SS` or `HH:MM:SS.fffffffff`.
///
/// Negative durations get a single leading `-`.
pub fn encode_duration(d: Duration) -> String {
    let sign = if d.is_negative() { "-" } else { "" };
    let magnitude = d.as_nanos().unsigned_abs();

    let hours = magnitude / NANOS_PER_HOUR as u64;
    let minutes = (magnitude % NANOS_PER_HOUR as u64) / NANOS_PER_MINUTE as u64;
    let seconds = (magnitude % NANOS_PER_MINUTE as u64) / NANOS_PER_SECOND as u64;
    let nanos = magnitude % NANOS_PER_SECOND as u64;

    if nanos > 0 {
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}.{nanos:09}")
    } else {
        // omit the fraction unless there is one
        format!("{sign}{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// Decode `[-]H+:MM:SS[.f{1,9}]`.
///
/// A fraction shorter than nine digits is read as a decimal fraction, so
/// `00:00:01.5` is one and a half seconds.
pub fn decode_duration(s: &str) -> Result<Duration> {
    let malformed = || WktError::malformed("duration", s);

    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (clock, fraction) = match body.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (body, None),
    };

    let mut parts = clock.split(':');
    let (Some(h), Some(m), Some(sec), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(malformed());
    };

    if h.is_empty() || !is_digits(h) || m.len() != 2 || !is_digits(m) {
        return Err(malformed());
    }
    if sec.len() != 2 || !is_digits(sec) {
        return Err(malformed());
    }

    let hours: u128 = h.parse().map_err(|_| malformed())?;
    let minutes: u128 = m.parse().map_err(|_| malformed())?;
    let seconds: u128 = sec.parse().map_err(|_| malformed())?;
    if minutes >= 60 || seconds >= 60 {
        return Err(malformed());
    }

    let nanos: u128 = match fraction {
        None => 0,
        Some(f) if !f.is_empty() && f.len() <= 9 && is_digits(f) => {
            let digits: u128 = f.parse().map_err(|_| malformed())?;
            digits * 10u128.pow(9 - f.len() as u32)
        }
        Some(_) => return Err(malformed()),
    };

    let magnitude = hours
        .checked_mul(NANOS_PER_HOUR as u128)
        .and_then(|n| n.checked_add(minutes * NANOS_PER_MINUTE as u128))
        .and_then(|n| n.checked_add(seconds * NANOS_PER_SECOND as u128))
        .and_then(|n| n.checked_add(nanos))
        .filter(|n| *n <= i64::MAX as u128)
        .ok_or_else(|| {
            WktError::out_of_range("duration", format!("{s:?} exceeds i64::MAX nanoseconds"))
        })?;

    let total = magnitude as i128;
    Duration::from_total_nanos(if negative { -total } else { total })
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Encode a timestamp as the store-native instant.
pub fn encode_timestamp(ts: Timestamp) -> ExternalValue {
    ExternalValue::Instant(ts.to_datetime())
}

/// Render a timestamp as RFC 3339 in UTC with 0, 3, 6 or 9 fractional digits.
pub fn timestamp_to_text(ts: Timestamp) -> String {
    ts.to_datetime().to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Decode a timestamp from an instant, text or UTF-8 bytes.
pub fn decode_timestamp(value: &ExternalValue) -> Result<Timestamp> {
    match value {
        ExternalValue::Instant(dt) => Timestamp::from_datetime(*dt),
        ExternalValue::Text(s) => parse_timestamp_text(s),
        ExternalValue::Bytes(b) => {
            let s = std::str::from_utf8(b)
                .map_err(|_| WktError::malformed("timestamp", String::from_utf8_lossy(b)))?;
            parse_timestamp_text(s)
        }
        ExternalValue::Null => Err(WktError::NullInput { kind: "timestamp" }),
        other => Err(WktError::unsupported("timestamp", other.type_name())),
    }
}

/// Parse a timestamp from text.
///
/// Supports:
/// - RFC 3339: "2024-01-01T12:00:00Z", "2024-01-01T12:00:00.5+02:00"
/// - SQL timestamp (UTC): "2024-01-01 12:00:00" and "2024-01-01 12:00:00.123456"
/// - SQL timestamp with offset: "2024-01-01 12:00:00+00", "2024-01-01 12:00:00.5-05:30"
pub fn parse_timestamp_text(s: &str) -> Result<Timestamp> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Timestamp::from_datetime(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Timestamp::from_datetime(Utc.from_utc_datetime(&naive));
    }

    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Timestamp::from_datetime(dt.with_timezone(&Utc));
    }

    Err(WktError::malformed("timestamp", s))
}

/// Encode a struct as a compact JSON object with sorted keys.
pub fn encode_struct(sv: &StructValue) -> Vec<u8> {
    serde_json::Value::Object(sv.as_map())
        .to_string()
        .into_bytes()
}

/// Decode a JSON object. Any key order is accepted; other roots are rejected.
pub fn decode_struct(bytes: &[u8]) -> Result<StructValue> {
    match parse_json("struct", bytes)? {
        serde_json::Value::Object(map) => StructValue::from_map(map),
        other => Err(WktError::type_mismatch("object", json_type_name(&other))),
    }
}

/// Parse JSON text on behalf of `kind`.
///
/// Documents nested deeper than the parser allows are reported as
/// `OutOfRange`, everything else that fails to parse as `MalformedInput`.
pub fn parse_json(kind: &'static str, bytes: &[u8]) -> Result<serde_json::Value> {
    serde_json::from_slice(bytes).map_err(|e| {
        if e.to_string().starts_with("recursion limit exceeded") {
            WktError::out_of_range(
                kind,
                format!("nesting deeper than {MAX_NESTING_DEPTH} levels"),
            )
        } else {
            WktError::malformed(kind, String::from_utf8_lossy(bytes))
        }
    })
}

/// JSON type name, for diagnostics.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::Value;
    use serde_json::json;

    fn d(h: i64, m: i64, s: i64, n: i64) -> Duration {
        Duration::new(h, m, s, n).unwrap()
    }

    #[test]
    fn test_encode_duration_without_fraction() {
        assert_eq!(encode_duration(Duration::ZERO), "00:00:00");
        assert_eq!(encode_duration(d(1, 2, 3, 0)), "01:02:03");
        assert_eq!(encode_duration(d(1, 0, 0, 0)), "01:00:00");
    }

    #[test]
    fn test_encode_duration_with_fraction() {
        assert_eq!(encode_duration(d(0, 0, 0, 1)), "00:00:00.000000001");
        assert_eq!(encode_duration(d(1, 2, 3, 500_000_000)), "01:02:03.500000000");
    }

    #[test]
    fn test_encode_duration_hours_do_not_wrap() {
        assert_eq!(encode_duration(d(26, 0, 0, 0)), "26:00:00");
        assert_eq!(encode_duration(d(838, 59, 59, 0)), "838:59:59");
    }

    #[test]
    fn test_encode_negative_duration() {
        assert_eq!(encode_duration(d(-1, -2, -3, 0)), "-01:02:03");
        assert_eq!(encode_duration(d(0, 0, 0, -5)), "-00:00:00.000000005");
    }

    #[test]
    fn test_decode_duration() {
        assert_eq!(decode_duration("01:02:03").unwrap(), d(1, 2, 3, 0));
        assert_eq!(decode_duration("01:02:03.000000004").unwrap(), d(1, 2, 3, 4));
        assert_eq!(decode_duration("838:59:59").unwrap(), d(838, 59, 59, 0));
        assert_eq!(decode_duration("-00:00:01").unwrap(), d(0, 0, -1, 0));
    }

    #[test]
    fn test_decode_short_fraction_is_decimal() {
        assert_eq!(decode_duration("00:00:01.5").unwrap(), d(0, 0, 1, 500_000_000));
        assert_eq!(decode_duration("10:00:00.123456").unwrap(), d(10, 0, 0, 123_456_000));
    }

    #[test]
    fn test_decode_duration_malformed() {
        for input in [
            "",
            "1:2",
            "01:02",
            "01:02:03:04",
            "aa:bb:cc",
            "01:2:03",
            "01:02:3",
            "01:60:00",
            "01:00:60",
            "01:02:03.",
            "01:02:03.1234567890",
            "01:02:03.x",
            " 01:02:03",
            "+01:02:03",
        ] {
            let err = decode_duration(input).unwrap_err();
            assert!(
                matches!(err, WktError::MalformedInput { .. }),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_decode_duration_out_of_range() {
        let err = decode_duration("99999999999:00:00").unwrap_err();
        assert!(matches!(err, WktError::OutOfRange { .. }));
    }

    #[test]
    fn test_duration_round_trip() {
        for nanos in [
            0,
            1,
            999_999_999,
            NANOS_PER_SECOND,
            NANOS_PER_HOUR * 100 + 7,
            -NANOS_PER_MINUTE - 1,
            i64::MAX,
            -i64::MAX,
        ] {
            let duration = Duration::from_nanos(nanos).unwrap();
            assert_eq!(decode_duration(&encode_duration(duration)).unwrap(), duration);
        }
    }

    #[test]
    fn test_timestamp_round_trip_through_instant() {
        for (seconds, nanos) in [
            (0, 0),
            (1_700_000_000, 123_456_789),
            (-62_135_596_800, 1),
            (-1, 999_999_999),
            (253_402_300_799, 999_999_999),
        ] {
            let ts = Timestamp::new(seconds, nanos).unwrap();
            assert_eq!(decode_timestamp(&encode_timestamp(ts)).unwrap(), ts);
        }
    }

    #[test]
    fn test_timestamp_text_round_trip() {
        for (seconds, nanos) in [(0, 0), (1_700_000_000, 120_000_000), (-86_400, 7)] {
            let ts = Timestamp::new(seconds, nanos).unwrap();
            let text = timestamp_to_text(ts);
            assert_eq!(parse_timestamp_text(&text).unwrap(), ts);
        }
    }

    #[test]
    fn test_timestamp_text_precision() {
        let ts = Timestamp::new(1_700_000_000, 0).unwrap();
        assert_eq!(timestamp_to_text(ts), "2023-11-14T22:13:20Z");
        let ts = Timestamp::new(1_700_000_000, 1).unwrap();
        assert_eq!(timestamp_to_text(ts), "2023-11-14T22:13:20.000000001Z");
    }

    #[test]
    fn test_parse_sql_timestamp_forms() {
        let expected = Timestamp::new(1_704_110_400, 0).unwrap();
        assert_eq!(parse_timestamp_text("2024-01-01 12:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp_text("2024-01-01T14:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp_text("2024-01-01 12:00:00+00").unwrap(), expected);
        assert_eq!(
            parse_timestamp_text("2024-01-01 12:00:00.25").unwrap(),
            Timestamp::new(1_704_110_400, 250_000_000).unwrap()
        );
    }

    #[test]
    fn test_decode_timestamp_errors() {
        assert!(matches!(
            decode_timestamp(&ExternalValue::Text("yesterday".into())),
            Err(WktError::MalformedInput { .. })
        ));
        assert!(matches!(
            decode_timestamp(&ExternalValue::Null),
            Err(WktError::NullInput { .. })
        ));
        assert!(matches!(
            decode_timestamp(&ExternalValue::Bool(true)),
            Err(WktError::UnsupportedSourceType { .. })
        ));
    }

    #[test]
    fn test_decode_timestamp_from_bytes() {
        let ts = decode_timestamp(&ExternalValue::Bytes(b"1970-01-01T00:00:01Z".to_vec())).unwrap();
        assert_eq!(ts, Timestamp::new(1, 0).unwrap());
    }

    #[test]
    fn test_struct_round_trip_any_key_order() {
        let sv = decode_struct(br#"{"tags":["tag1","tag2"],"name":"json-1","age":18}"#).unwrap();
        let again = decode_struct(&encode_struct(&sv)).unwrap();
        assert_eq!(again.as_map(), sv.as_map());
        assert_eq!(
            String::from_utf8(encode_struct(&sv)).unwrap(),
            r#"{"age":18,"name":"json-1","tags":["tag1","tag2"]}"#
        );
    }

    #[test]
    fn test_struct_nested_object_preserved() {
        let sv = decode_struct(br#"{"a":{"b":1}}"#).unwrap();
        let reparsed: serde_json::Value = serde_json::from_slice(&encode_struct(&sv)).unwrap();
        assert_eq!(reparsed, json!({"a": {"b": 1}}));
        assert_eq!(
            sv.get("a").and_then(Value::as_struct).and_then(|a| a.get("b")),
            Some(&Value::Number(1.0))
        );
    }

    #[test]
    fn test_decode_struct_rejects_non_object_root() {
        for input in [&b"[1,2]"[..], &b"\"text\""[..], &b"42"[..], &b"null"[..]] {
            assert!(matches!(
                decode_struct(input),
                Err(WktError::TypeMismatch { .. })
            ));
        }
        assert!(matches!(
            decode_struct(b"{not json"),
            Err(WktError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_empty_struct() {
        assert_eq!(encode_struct(&StructValue::new()), b"{}");
        assert!(decode_struct(b"{}").unwrap().is_empty());
    }

    fn nested_json(levels: usize) -> String {
        format!("{}{{}}{}", r#"{"a":"#.repeat(levels), "}".repeat(levels))
    }

    #[test]
    fn test_deepest_struct_round_trips() {
        let mut sv = StructValue::new();
        for _ in 1..MAX_NESTING_DEPTH {
            sv = StructValue::new().with("a", sv).unwrap();
        }
        let bytes = encode_struct(&sv);
        assert_eq!(decode_struct(&bytes).unwrap(), sv);
    }

    #[test]
    fn test_decode_too_deep_is_out_of_range() {
        // past the limit but within the parser's recursion limit
        assert!(matches!(
            decode_struct(nested_json(110).as_bytes()),
            Err(WktError::OutOfRange { kind: "struct", .. })
        ));
        // past the parser's recursion limit
        assert!(matches!(
            decode_struct(nested_json(200).as_bytes()),
            Err(WktError::OutOfRange { kind: "struct", .. })
        ));
    }

    #[test]
    fn test_timestamp_outside_four_digit_years_is_rejected() {
        assert!(matches!(
            parse_timestamp_text("0000-12-31T23:59:59Z"),
            Err(WktError::OutOfRange { .. })
        ));
        let far = Utc.with_ymd_and_hms(10_000, 1, 1, 0, 0, 0).unwrap();
        assert!(matches!(
            decode_timestamp(&ExternalValue::Instant(far)),
            Err(WktError::OutOfRange { .. })
        ));
        assert_eq!(
            parse_timestamp_text("9999-12-31T23:59:59.999999999Z").unwrap(),
            Timestamp::new(Timestamp::MAX_SECONDS, 999_999_999).unwrap()
        );
    }
}
